//! Marker and nutrient key handling.
//!
//! Keys are identifiers like `Hemoglobin`, `vitamin_B12`, or `iron`. They are
//! validated once at table-load time; request handling never re-validates
//! (unknown keys simply classify as `unknown`).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{HemovitaError, Result};

static KEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9]*(_[A-Za-z0-9]+)*$").unwrap());

/// Validate a marker or nutrient key at table-load time.
pub(crate) fn validate_key(kind: &str, key: &str) -> Result<()> {
    if KEY_PATTERN.is_match(key) {
        Ok(())
    } else {
        Err(HemovitaError::Config(format!(
            "invalid {} key '{}': expected letters, digits and single underscores",
            kind, key
        )))
    }
}

/// Human-friendly display name for a marker or nutrient key.
///
/// `iron` becomes `Iron`, `vitamin_B12` becomes `Vitamin B12`. Used in
/// interaction notes and the narrative report; the structured response always
/// carries the raw keys.
pub fn display_name(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
