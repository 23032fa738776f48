//! Rendering of scheduler trace events into human-readable notes.

use crate::tables::{display_name, InteractionRuleTable};

use super::{PlacementTrace, TraceEvent};

/// Renders a [`PlacementTrace`] into natural-language notes.
///
/// Notes are derived purely from the trace and the rule table, in trace
/// order; identical inputs always yield identical note text.
#[derive(Debug, Clone, Default)]
pub struct InteractionAnnotator;

impl InteractionAnnotator {
    pub fn new() -> Self {
        Self
    }

    /// Render all notes for one scheduling run.
    ///
    /// Never returns an empty vec: with nothing flagged a single
    /// no-deficiency note is emitted, and with flagged nutrients but no
    /// interaction events a generic scheduling note stands in, so the
    /// caller never renders an empty section.
    pub fn annotate(
        &self,
        trace: &PlacementTrace,
        rules: &InteractionRuleTable,
        any_flagged: bool,
    ) -> Vec<String> {
        if !any_flagged {
            return vec![
                "No deficiencies were detected; no supplements were scheduled.".to_string(),
            ];
        }

        let notes: Vec<String> = trace
            .events
            .iter()
            .map(|event| self.render(event, rules))
            .collect();

        if notes.is_empty() {
            return vec![
                "Supplement timing groups compatible nutrients and separates antagonistic ones; no interactions needed resolving for this plan."
                    .to_string(),
            ];
        }
        notes
    }

    fn render(&self, event: &TraceEvent, rules: &InteractionRuleTable) -> String {
        match event {
            TraceEvent::CoPlaced {
                nutrient,
                partner,
                slot,
            } => {
                let reason = rules
                    .between(nutrient, partner)
                    .map(|r| r.note.as_str())
                    .unwrap_or("they are absorbed better together");
                format!(
                    "{} and {} were scheduled together in the {} slot because {}.",
                    display_name(nutrient),
                    display_name(partner),
                    slot.label(),
                    reason
                )
            }
            TraceEvent::Separated { a, b, slot_a, slot_b } => {
                let reason = rules
                    .between(a, b)
                    .map(|r| r.note.as_str())
                    .unwrap_or("they interfere with each other's absorption");
                format!(
                    "{} ({}) and {} ({}) were placed in different slots because {}.",
                    display_name(a),
                    slot_a.label(),
                    display_name(b),
                    slot_b.label(),
                    reason
                )
            }
            TraceEvent::Spaced {
                a,
                b,
                slot_a,
                slot_b,
                hours,
            } => format!(
                "{} ({}) and {} ({}) are at least {} hours apart, which satisfies their spacing requirement.",
                display_name(a),
                slot_a.label(),
                display_name(b),
                slot_b.label(),
                hours
            ),
            TraceEvent::Overflow { nutrient, slot } => format!(
                "No conflict-free slot was available for {}; it was assigned to the least occupied slot ({}). Review timing manually.",
                display_name(nutrient),
                slot.label()
            ),
        }
    }
}
