//! Marker classification against reference ranges.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::tables::{Marker, ReferenceRangeTable};

/// Classification of a single lab value against its reference range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerStatus {
    /// Below the reference range.
    Low,
    /// Within the reference range (bounds inclusive).
    Normal,
    /// Above the reference range.
    High,
    /// No reading supplied, no reference range known, or unusable value.
    Unknown,
}

impl MarkerStatus {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            MarkerStatus::Low => "low",
            MarkerStatus::Normal => "normal",
            MarkerStatus::High => "high",
            MarkerStatus::Unknown => "unknown",
        }
    }
}

/// Classifies lab readings. Classification never fails; it degrades to
/// [`MarkerStatus::Unknown`].
#[derive(Debug, Clone, Default)]
pub struct MarkerClassifier;

impl MarkerClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify one reading against a marker definition.
    ///
    /// Bounds are inclusive: a value exactly at `low` or `high` is `Normal`.
    /// Missing definitions, missing values, and values outside physical
    /// plausibility (non-finite or negative) all classify as `Unknown`.
    pub fn classify(&self, marker: Option<&Marker>, value: Option<f64>) -> MarkerStatus {
        let (marker, value) = match (marker, value) {
            (Some(m), Some(v)) => (m, v),
            _ => return MarkerStatus::Unknown,
        };

        if !value.is_finite() || value < 0.0 {
            return MarkerStatus::Unknown;
        }

        if value < marker.low {
            MarkerStatus::Low
        } else if value > marker.high {
            MarkerStatus::High
        } else {
            MarkerStatus::Normal
        }
    }

    /// Classify a whole panel, preserving the input key order.
    ///
    /// Every submitted key appears in the output, including keys absent from
    /// the reference table (as `Unknown`). An empty panel reports every
    /// marker in the reference table as `Unknown` instead, so the caller
    /// still sees the full known marker set.
    pub fn classify_panel(
        &self,
        table: &ReferenceRangeTable,
        labs: &IndexMap<String, f64>,
    ) -> IndexMap<String, MarkerStatus> {
        if labs.is_empty() {
            return table
                .markers()
                .map(|marker| (marker.key.clone(), MarkerStatus::Unknown))
                .collect();
        }

        labs.iter()
            .map(|(key, value)| (key.clone(), self.classify(table.get(key), Some(*value))))
            .collect()
    }
}
