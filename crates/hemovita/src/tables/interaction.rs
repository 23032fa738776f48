//! Nutrient interaction rules.
//!
//! An [`InteractionRuleTable`] holds pairwise constraints between nutrients:
//! pairs that must not share a time slot, pairs that absorb better together,
//! and pairs that want a minimum spacing between doses. Rules are symmetric
//! and looked up by unordered nutrient pair.
//!
//! The built-in rule set is an explicit clinical assumption, spelled out as
//! data rather than derived from an external interaction network. Callers
//! with their own clinical policy can load a replacement table with
//! [`InteractionRuleTable::from_csv`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HemovitaError, Result};
use crate::tables::keys::validate_key;

/// How two nutrients interact when scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "relation", rename_all = "snake_case")]
pub enum Relation {
    /// The pair must never share a time slot.
    AvoidSameSlot,
    /// The pair absorbs better together; prefer the same slot.
    CoAdminister,
    /// Doses should be at least `hours` apart.
    MinSpacingHours { hours: u8 },
}

/// A symmetric pairwise constraint between two nutrients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRule {
    /// First nutrient key.
    pub a: String,
    /// Second nutrient key.
    pub b: String,
    /// Constraint relation.
    pub relation: Relation,
    /// Short mechanism note, used verbatim in explanatory notes.
    pub note: String,
}

impl InteractionRule {
    /// Whether this rule applies to the unordered pair `(x, y)`.
    pub fn matches(&self, x: &str, y: &str) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }

    /// Given one nutrient of the pair, return the other, if this rule
    /// involves `nutrient` at all.
    pub fn partner_of(&self, nutrient: &str) -> Option<&str> {
        if self.a == nutrient {
            Some(&self.b)
        } else if self.b == nutrient {
            Some(&self.a)
        } else {
            None
        }
    }
}

/// Immutable table of nutrient interaction rules.
#[derive(Debug, Clone)]
pub struct InteractionRuleTable {
    rules: Vec<InteractionRule>,
}

impl InteractionRuleTable {
    /// Create an empty table. Mostly useful in tests.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Built-in interaction rules.
    ///
    /// Iron kept away from calcium and zinc, absorption boosters co-dosed,
    /// and bulk minerals spaced apart.
    pub fn builtin() -> Self {
        let rules = [
            (
                "iron",
                "calcium",
                Relation::AvoidSameSlot,
                "calcium interferes with iron absorption when taken together",
            ),
            (
                "iron",
                "zinc",
                Relation::AvoidSameSlot,
                "iron and zinc compete for shared intestinal transport",
            ),
            (
                "iron",
                "vitamin_C",
                Relation::CoAdminister,
                "vitamin C enhances non-heme iron absorption",
            ),
            (
                "vitamin_D",
                "magnesium",
                Relation::CoAdminister,
                "magnesium is a cofactor for vitamin D activation",
            ),
            (
                "vitamin_E",
                "vitamin_C",
                Relation::CoAdminister,
                "vitamin C regenerates oxidized vitamin E",
            ),
            (
                "calcium",
                "magnesium",
                Relation::MinSpacingHours { hours: 4 },
                "large doses of calcium and magnesium compete for uptake",
            ),
        ];

        let mut table = Self::empty();
        for (a, b, relation, note) in rules {
            table
                .insert(InteractionRule {
                    a: a.to_string(),
                    b: b.to_string(),
                    relation,
                    note: note.to_string(),
                })
                .expect("built-in interaction table is valid");
        }
        table
    }

    /// Build a table from explicit rules.
    pub fn from_rules(rules: impl IntoIterator<Item = InteractionRule>) -> Result<Self> {
        let mut table = Self::empty();
        for rule in rules {
            table.insert(rule)?;
        }
        Ok(table)
    }

    /// Load interaction rules from a CSV file.
    ///
    /// Expected header: `nutrient_a,nutrient_b,relation,hours,note` where
    /// `relation` is one of `avoid_same_slot`, `co_administer`,
    /// `min_spacing_hours` and `hours` is only read for the spacing relation.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| HemovitaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = csv::Reader::from_reader(file);

        let mut table = Self::empty();
        for record in reader.deserialize() {
            let row: InteractionRow = record?;
            let relation = match row.relation.as_str() {
                "avoid_same_slot" => Relation::AvoidSameSlot,
                "co_administer" => Relation::CoAdminister,
                "min_spacing_hours" => {
                    let hours = row.hours.ok_or_else(|| {
                        HemovitaError::Config(format!(
                            "rule '{}/{}' needs an hours value for min_spacing_hours",
                            row.nutrient_a, row.nutrient_b
                        ))
                    })?;
                    Relation::MinSpacingHours { hours }
                }
                other => {
                    return Err(HemovitaError::Config(format!(
                        "unknown interaction relation '{}'",
                        other
                    )))
                }
            };
            table.insert(InteractionRule {
                a: row.nutrient_a,
                b: row.nutrient_b,
                relation,
                note: row.note,
            })?;
        }
        Ok(table)
    }

    fn insert(&mut self, rule: InteractionRule) -> Result<()> {
        validate_key("nutrient", &rule.a)?;
        validate_key("nutrient", &rule.b)?;
        if rule.a == rule.b {
            return Err(HemovitaError::Config(format!(
                "interaction rule pairs nutrient '{}' with itself",
                rule.a
            )));
        }
        if self.rules.iter().any(|r| r.matches(&rule.a, &rule.b)) {
            return Err(HemovitaError::Config(format!(
                "duplicate interaction rule for pair '{}'/'{}'",
                rule.a, rule.b
            )));
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Look up the rule for an unordered pair, if any.
    pub fn between(&self, x: &str, y: &str) -> Option<&InteractionRule> {
        self.rules.iter().find(|r| r.matches(x, y))
    }

    /// Whether the pair is subject to an avoid-same-slot rule.
    pub fn conflicts(&self, x: &str, y: &str) -> bool {
        matches!(
            self.between(x, y).map(|r| r.relation),
            Some(Relation::AvoidSameSlot)
        )
    }

    /// Co-administration partners of a nutrient, in table order.
    pub fn co_partners(&self, nutrient: &str) -> Vec<&str> {
        self.rules
            .iter()
            .filter(|r| r.relation == Relation::CoAdminister)
            .filter_map(|r| r.partner_of(nutrient))
            .collect()
    }

    /// Iterate all rules in table order.
    pub fn rules(&self) -> impl Iterator<Item = &InteractionRule> {
        self.rules.iter()
    }

    /// Number of rules in the table.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[derive(Deserialize)]
struct InteractionRow {
    nutrient_a: String,
    nutrient_b: String,
    relation: String,
    hours: Option<u8>,
    note: String,
}
