//! Report assembly and narrative rendering.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::classify::MarkerStatus;
use crate::recommend::FoodPick;
use crate::request::{ReportRequest, Sex};
use crate::schedule::{Slot, SupplementPlan};
use crate::tables::{display_name, ReferenceRangeTable};

/// The assembled lab report — the engine's single output payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Per-marker classification, in submitted panel order. Every submitted
    /// key appears here.
    pub labels: IndexMap<String, MarkerStatus>,
    /// Supplement schedule covering all three slots.
    pub supplement_plan: SupplementPlan,
    /// Food suggestions per flagged nutrient (possibly empty lists).
    pub foods: IndexMap<String, Vec<FoodPick>>,
    /// Interaction notes explaining the schedule.
    pub network_notes: Vec<String>,
    /// Deterministic narrative summary.
    pub report_text: String,
}

/// Assembles the final [`Report`] and applies patient-specific suppressions.
#[derive(Debug, Clone, Default)]
pub struct ReportComposer;

impl ReportComposer {
    pub fn new() -> Self {
        Self
    }

    /// Compose the report from the pipeline's intermediate products.
    ///
    /// Never fails for well-formed inputs; a nutrient in the plan that traces
    /// to no flag would be a programming error upstream, not a runtime
    /// condition reported to the caller.
    #[allow(clippy::too_many_arguments)]
    pub fn compose(
        &self,
        request: &ReportRequest,
        reference: &ReferenceRangeTable,
        labels: IndexMap<String, MarkerStatus>,
        mut plan: SupplementPlan,
        mut foods: IndexMap<String, Vec<FoodPick>>,
        network_notes: Vec<String>,
    ) -> Report {
        let mut caveats = Vec::new();

        // Pregnancy suppression: high-dose vitamin A is contraindicated
        // regardless of marker status. The foods entry is kept (emptied) so
        // the caller can render the withholding instead of losing the key.
        if request.patient.pregnant == Some(true) {
            let suppressed_from_plan = plan.remove_nutrient("vitamin_A");
            let had_foods = foods
                .get_mut("vitamin_A")
                .map(|list| {
                    let had = !list.is_empty();
                    list.clear();
                    had
                })
                .unwrap_or(false);
            if suppressed_from_plan || had_foods {
                caveats.push(
                    "Vitamin A supplementation and retinol-rich foods are withheld during pregnancy; discuss dosing with a clinician."
                        .to_string(),
                );
            }
        }

        let report_text =
            self.render_narrative(request, reference, &labels, &plan, &foods, &network_notes, &caveats);

        Report {
            labels,
            supplement_plan: plan,
            foods,
            network_notes,
            report_text,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn render_narrative(
        &self,
        request: &ReportRequest,
        reference: &ReferenceRangeTable,
        labels: &IndexMap<String, MarkerStatus>,
        plan: &SupplementPlan,
        foods: &IndexMap<String, Vec<FoodPick>>,
        network_notes: &[String],
        caveats: &[String],
    ) -> String {
        let mut lines = Vec::new();

        lines.push("HemoVita micronutrient report".to_string());
        lines.push("=============================".to_string());
        lines.push(String::new());
        lines.push(self.patient_line(request));
        lines.push(String::new());

        lines.push("Lab results:".to_string());
        if labels.is_empty() {
            lines.push("- No labs provided.".to_string());
        }
        for (key, status) in labels {
            let value = request.labs.get(key);
            let (label, unit) = reference
                .get(key)
                .map(|m| (m.label.as_str(), m.unit.as_str()))
                .unwrap_or((key.as_str(), ""));
            match value {
                Some(v) if !unit.is_empty() => {
                    lines.push(format!("- {}: {} {} ({})", label, v, unit, status.label()))
                }
                Some(v) => lines.push(format!("- {}: {} ({})", label, v, status.label())),
                None => lines.push(format!("- {}: ({})", label, status.label())),
            }
        }
        lines.push(String::new());

        lines.push("Supplement schedule:".to_string());
        if plan.is_empty() {
            lines.push("- No supplements recommended based on the current panel.".to_string());
        } else {
            for slot in Slot::ALL {
                let nutrients = plan.nutrients_in(slot);
                if nutrients.is_empty() {
                    continue;
                }
                let pretty: Vec<String> = nutrients.iter().map(|n| display_name(n)).collect();
                lines.push(format!("- {}: {}", slot.title(), pretty.join(", ")));
            }
        }
        lines.push(String::new());

        lines.push("Food suggestions:".to_string());
        if foods.is_empty() {
            lines.push("- None.".to_string());
        }
        for (nutrient, picks) in foods {
            if picks.is_empty() {
                lines.push(format!(
                    "- {}: no matching foods for the selected diet.",
                    display_name(nutrient)
                ));
            } else {
                let names: Vec<&str> = picks.iter().map(|p| p.name.as_str()).collect();
                lines.push(format!("- {}: {}", display_name(nutrient), names.join(", ")));
            }
        }
        lines.push(String::new());

        lines.push("Notes:".to_string());
        for note in network_notes {
            lines.push(format!("- {}", note));
        }

        if !caveats.is_empty() {
            lines.push(String::new());
            lines.push("Caveats:".to_string());
            for caveat in caveats {
                lines.push(format!("- {}", caveat));
            }
        }

        lines.join("\n")
    }

    fn patient_line(&self, request: &ReportRequest) -> String {
        let patient = &request.patient;
        let mut parts = Vec::new();

        if let Some(age) = patient.age {
            parts.push(format!("age {}", age));
        }
        match patient.sex {
            Some(Sex::Female) => parts.push("female".to_string()),
            Some(Sex::Male) => parts.push("male".to_string()),
            None => {}
        }
        if patient.pregnant == Some(true) {
            parts.push("pregnant".to_string());
        }
        if let Some(ref country) = patient.country {
            parts.push(format!("country {}", country));
        }
        if let Some(ref notes) = patient.notes {
            parts.push(format!("notes: {}", notes));
        }

        if parts.is_empty() {
            "Patient: no details provided.".to_string()
        } else {
            format!("Patient: {}.", parts.join(", "))
        }
    }
}
