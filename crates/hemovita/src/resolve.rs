//! Marker-to-nutrient deficiency resolution.
//!
//! Several markers can implicate one nutrient (the anemia cluster Hemoglobin,
//! MCV and ferritin all point at iron), and inverse markers flag a nutrient
//! when *high* (elevated homocysteine implicates B12). The mapping is a static
//! signal table, not branching logic, so alternate tables can be substituted
//! in tests.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::classify::MarkerStatus;
use crate::error::Result;
use crate::tables::keys::validate_key;

/// One row of the signal table: a marker at a trigger status implicates a
/// nutrient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeficiencySignal {
    /// Marker key that fires this signal.
    pub marker: String,
    /// Status that triggers it (usually `Low`; `High` for inverse markers).
    pub trigger: MarkerStatus,
    /// Nutrient key implicated.
    pub nutrient: String,
}

/// A nutrient implicated by one or more non-normal markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutrientFlag {
    /// Nutrient key.
    pub nutrient: String,
    /// Number of contributing markers. Used only for ordering, never dosage.
    pub strength: u32,
    /// Contributing marker keys, sorted.
    pub markers: Vec<String>,
}

/// Resolves classified panels into flagged nutrients.
#[derive(Debug, Clone)]
pub struct DeficiencyResolver {
    signals: Vec<DeficiencySignal>,
}

impl DeficiencyResolver {
    /// Built-in signal table for the built-in marker set.
    pub fn builtin() -> Self {
        let rows = [
            // anemia cluster, many-to-one onto iron
            ("Hemoglobin", MarkerStatus::Low, "iron"),
            ("MCV", MarkerStatus::Low, "iron"),
            ("ferritin", MarkerStatus::Low, "iron"),
            // B vitamins; high homocysteine is an inverse functional marker
            ("vitamin_B12", MarkerStatus::Low, "vitamin_B12"),
            ("folate_plasma", MarkerStatus::Low, "folate"),
            ("homocysteine", MarkerStatus::High, "vitamin_B12"),
            // one-to-one vitamins and minerals
            ("vitamin_D", MarkerStatus::Low, "vitamin_D"),
            ("vitamin_A", MarkerStatus::Low, "vitamin_A"),
            ("vitamin_E", MarkerStatus::Low, "vitamin_E"),
            ("vitamin_C", MarkerStatus::Low, "vitamin_C"),
            ("vitamin_B6", MarkerStatus::Low, "vitamin_B6"),
            ("magnesium", MarkerStatus::Low, "magnesium"),
            ("calcium", MarkerStatus::Low, "calcium"),
            ("zinc", MarkerStatus::Low, "zinc"),
        ];

        let signals = rows
            .into_iter()
            .map(|(marker, trigger, nutrient)| DeficiencySignal {
                marker: marker.to_string(),
                trigger,
                nutrient: nutrient.to_string(),
            })
            .collect();
        Self { signals }
    }

    /// Build a resolver from an explicit signal table.
    pub fn from_signals(signals: Vec<DeficiencySignal>) -> Result<Self> {
        for signal in &signals {
            validate_key("marker", &signal.marker)?;
            validate_key("nutrient", &signal.nutrient)?;
        }
        Ok(Self { signals })
    }

    /// Resolve classified labels into flagged nutrients.
    ///
    /// Ordering is deterministic: strength descending, then nutrient key
    /// ascending. It never depends on the iteration order of `labels`.
    /// A nutrient with no firing signal never appears in the output.
    pub fn resolve(&self, labels: &IndexMap<String, MarkerStatus>) -> Vec<NutrientFlag> {
        // BTreeMap keeps aggregation keyed by nutrient name, not input order.
        let mut contributions: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

        for signal in &self.signals {
            if labels.get(&signal.marker) == Some(&signal.trigger) {
                contributions
                    .entry(signal.nutrient.as_str())
                    .or_default()
                    .push(signal.marker.as_str());
            }
        }

        let mut flags: Vec<NutrientFlag> = contributions
            .into_iter()
            .map(|(nutrient, mut markers)| {
                markers.sort_unstable();
                NutrientFlag {
                    nutrient: nutrient.to_string(),
                    strength: markers.len() as u32,
                    markers: markers.into_iter().map(String::from).collect(),
                }
            })
            .collect();

        flags.sort_by(|a, b| {
            b.strength
                .cmp(&a.strength)
                .then_with(|| a.nutrient.cmp(&b.nutrient))
        });
        flags
    }

    /// Iterate the signal table.
    pub fn signals(&self) -> impl Iterator<Item = &DeficiencySignal> {
        self.signals.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, MarkerStatus)]) -> IndexMap<String, MarkerStatus> {
        pairs
            .iter()
            .map(|(k, s)| (k.to_string(), *s))
            .collect()
    }

    #[test]
    fn test_anemia_cluster_aggregates_to_iron() {
        let resolver = DeficiencyResolver::builtin();
        let flags = resolver.resolve(&labels(&[
            ("Hemoglobin", MarkerStatus::Low),
            ("ferritin", MarkerStatus::Low),
            ("MCV", MarkerStatus::Low),
        ]));

        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].nutrient, "iron");
        assert_eq!(flags[0].strength, 3);
        assert_eq!(flags[0].markers, vec!["Hemoglobin", "MCV", "ferritin"]);
    }

    #[test]
    fn test_inverse_marker_high_homocysteine() {
        let resolver = DeficiencyResolver::builtin();
        let flags = resolver.resolve(&labels(&[("homocysteine", MarkerStatus::High)]));

        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].nutrient, "vitamin_B12");
    }

    #[test]
    fn test_normal_and_unknown_never_flag() {
        let resolver = DeficiencyResolver::builtin();
        let flags = resolver.resolve(&labels(&[
            ("Hemoglobin", MarkerStatus::Normal),
            ("vitamin_D", MarkerStatus::Unknown),
            ("homocysteine", MarkerStatus::Low),
        ]));
        assert!(flags.is_empty());
    }

    #[test]
    fn test_ordering_is_strength_then_key() {
        let resolver = DeficiencyResolver::builtin();
        // iron gets 2 contributing markers; vitamin_D and calcium get 1 each.
        let flags = resolver.resolve(&labels(&[
            ("vitamin_D", MarkerStatus::Low),
            ("calcium", MarkerStatus::Low),
            ("Hemoglobin", MarkerStatus::Low),
            ("ferritin", MarkerStatus::Low),
        ]));

        let order: Vec<&str> = flags.iter().map(|f| f.nutrient.as_str()).collect();
        assert_eq!(order, vec!["iron", "calcium", "vitamin_D"]);
    }

    #[test]
    fn test_ordering_ignores_input_order() {
        let resolver = DeficiencyResolver::builtin();
        let a = resolver.resolve(&labels(&[
            ("zinc", MarkerStatus::Low),
            ("calcium", MarkerStatus::Low),
        ]));
        let b = resolver.resolve(&labels(&[
            ("calcium", MarkerStatus::Low),
            ("zinc", MarkerStatus::Low),
        ]));
        assert_eq!(a, b);
    }
}
