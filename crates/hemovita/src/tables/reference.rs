//! Marker reference ranges.
//!
//! A [`ReferenceRangeTable`] holds the per-marker `[low, high]` interval that
//! counts as physiologically normal, keyed by marker key. Tables can come
//! from:
//!
//! 1. The built-in set of 14 common micronutrient/hematology markers
//! 2. A CSV file with columns `marker,label,unit,low,high`
//!
//! ```ignore
//! use hemovita::ReferenceRangeTable;
//!
//! // Use built-in ranges
//! let table = ReferenceRangeTable::builtin();
//!
//! // Or load lab-specific ranges
//! let table = ReferenceRangeTable::from_csv("reference_ranges.csv")?;
//! ```
//!
//! Tables are immutable after construction; a malformed row is a fatal
//! [`HemovitaError::Config`](crate::HemovitaError) at load time, never a
//! request-time error.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{HemovitaError, Result};
use crate::tables::keys::validate_key;

/// A lab marker definition with its normal range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Stable marker key (e.g. `Hemoglobin`, `vitamin_B12`). Identity.
    pub key: String,
    /// Human-readable label for reports.
    pub label: String,
    /// Measurement unit the range is expressed in.
    pub unit: String,
    /// Inclusive lower bound of the normal range.
    pub low: f64,
    /// Inclusive upper bound of the normal range.
    pub high: f64,
}

/// Immutable table of marker reference ranges.
#[derive(Debug, Clone)]
pub struct ReferenceRangeTable {
    markers: IndexMap<String, Marker>,
}

impl ReferenceRangeTable {
    /// Create an empty table. Mostly useful in tests.
    pub fn empty() -> Self {
        Self {
            markers: IndexMap::new(),
        }
    }

    /// Built-in reference ranges for common micronutrient panel markers.
    ///
    /// Cutoffs follow WHO-derived adult, non-pregnant population cutoffs.
    pub fn builtin() -> Self {
        let rows = [
            ("Hemoglobin", "Hemoglobin", "g/dL", 12.0, 16.0),
            ("MCV", "Mean corpuscular volume", "fL", 80.0, 100.0),
            ("ferritin", "Serum ferritin", "ug/L", 20.0, 200.0),
            ("vitamin_B12", "Vitamin B12", "pg/mL", 200.0, 900.0),
            ("folate_plasma", "Plasma folate", "nmol/L", 10.0, 45.0),
            ("vitamin_D", "Vitamin D (25(OH)D)", "ng/mL", 30.0, 80.0),
            ("vitamin_A", "Vitamin A (retinol)", "umol/L", 0.7, 2.8),
            ("vitamin_E", "Vitamin E (alpha-tocopherol)", "umol/L", 12.0, 42.0),
            ("vitamin_C", "Plasma vitamin C", "umol/L", 23.0, 85.0),
            ("vitamin_B6", "Vitamin B6 (PLP)", "nmol/L", 20.0, 125.0),
            ("magnesium", "Serum magnesium", "mmol/L", 0.75, 1.05),
            ("calcium", "Serum total calcium", "mmol/L", 2.2, 2.6),
            ("zinc", "Plasma zinc", "ug/dL", 70.0, 120.0),
            ("homocysteine", "Plasma homocysteine", "umol/L", 5.0, 15.0),
        ];

        let mut table = Self::empty();
        for (key, label, unit, low, high) in rows {
            let marker = Marker {
                key: key.to_string(),
                label: label.to_string(),
                unit: unit.to_string(),
                low,
                high,
            };
            table
                .insert(marker)
                .expect("built-in reference table is valid");
        }
        table
    }

    /// Build a table from marker definitions.
    pub fn from_markers(markers: impl IntoIterator<Item = Marker>) -> Result<Self> {
        let mut table = Self::empty();
        for marker in markers {
            table.insert(marker)?;
        }
        Ok(table)
    }

    /// Load reference ranges from a CSV file.
    ///
    /// Expected header: `marker,label,unit,low,high`.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| HemovitaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = csv::Reader::from_reader(file);

        let mut table = Self::empty();
        for record in reader.deserialize() {
            let row: ReferenceRow = record?;
            table.insert(Marker {
                key: row.marker,
                label: row.label,
                unit: row.unit,
                low: row.low,
                high: row.high,
            })?;
        }

        if table.is_empty() {
            return Err(HemovitaError::Config(format!(
                "reference range table '{}' contains no markers",
                path.display()
            )));
        }
        Ok(table)
    }

    fn insert(&mut self, marker: Marker) -> Result<()> {
        validate_key("marker", &marker.key)?;
        if !marker.low.is_finite() || !marker.high.is_finite() {
            return Err(HemovitaError::Config(format!(
                "marker '{}' has a non-finite bound",
                marker.key
            )));
        }
        if marker.low > marker.high {
            return Err(HemovitaError::Config(format!(
                "marker '{}' has low {} above high {}",
                marker.key, marker.low, marker.high
            )));
        }
        if self.markers.contains_key(&marker.key) {
            return Err(HemovitaError::Config(format!(
                "duplicate marker key '{}'",
                marker.key
            )));
        }
        self.markers.insert(marker.key.clone(), marker);
        Ok(())
    }

    /// Look up a marker definition by key.
    pub fn get(&self, key: &str) -> Option<&Marker> {
        self.markers.get(key)
    }

    /// Iterate markers in table order.
    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers.values()
    }

    /// Number of markers in the table.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

#[derive(Deserialize)]
struct ReferenceRow {
    marker: String,
    label: String,
    unit: String,
    low: f64,
    high: f64,
}
