//! Request payload types — the engine's inbound boundary with the web layer.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::tables::DietFilter;

/// Patient sex as reported on the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

/// Advisory patient context. Never mutates any table; only influences
/// suppressions and narrative wording.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientInfo {
    /// Age in years.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pregnant: Option<bool>,
    /// Free-text intake notes, echoed into the narrative only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A report request as consumed from the web layer.
///
/// An empty `labs` map is accepted; it yields a report labeling every known
/// marker `unknown`, with empty plan and food sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    /// Raw panel: marker key to measured value.
    pub labs: IndexMap<String, f64>,
    /// Patient context.
    #[serde(default)]
    pub patient: PatientInfo,
    /// Diet preference restricting food suggestions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet_filter: Option<DietFilter>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_request() {
        let json = r#"{
            "labs": {"Hemoglobin": 11.4, "ferritin": 12.0},
            "patient": {"age": 34, "sex": "female", "pregnant": true, "country": "DE"},
            "diet_filter": "vegan"
        }"#;

        let request: ReportRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.labs["Hemoglobin"], 11.4);
        assert_eq!(request.patient.sex, Some(Sex::Female));
        assert_eq!(request.patient.pregnant, Some(true));
        assert_eq!(request.diet_filter, Some(DietFilter::Vegan));
    }

    #[test]
    fn test_deserialize_minimal_request() {
        let request: ReportRequest = serde_json::from_str(r#"{"labs": {}}"#).unwrap();
        assert!(request.labs.is_empty());
        assert_eq!(request.patient, PatientInfo::default());
        assert_eq!(request.diet_filter, None);
    }
}
