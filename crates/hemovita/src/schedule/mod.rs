//! Supplement scheduling under interaction constraints.
//!
//! Flagged nutrients are assigned to the fixed `{morning, midday, evening}`
//! slots so that no avoid-same-slot pair shares a slot and co-administration
//! partners land together when possible. Placement is fully deterministic:
//! nutrients are processed strongest-first (ties by key), slots are tried in
//! fixed day order, and an unplaceable nutrient falls back to the least
//! populated slot with an explanatory trace event instead of failing.
//!
//! Minimum-spacing rules are satisfied structurally (slots are at least four
//! hours apart) and only contribute notes; they never block placement.

pub mod annotate;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::resolve::NutrientFlag;
use crate::tables::InteractionRuleTable;

/// A fixed time-of-day slot for taking supplements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Morning,
    Midday,
    Evening,
}

impl Slot {
    /// All slots in fixed day order.
    pub const ALL: [Slot; 3] = [Slot::Morning, Slot::Midday, Slot::Evening];

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Slot::Morning => "morning",
            Slot::Midday => "midday",
            Slot::Evening => "evening",
        }
    }

    /// Title-case label for narrative headings.
    pub fn title(&self) -> &'static str {
        match self {
            Slot::Morning => "Morning",
            Slot::Midday => "Midday",
            Slot::Evening => "Evening",
        }
    }
}

/// The per-slot supplement assignment. Always covers all three slots; empty
/// lists are permitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplementPlan {
    slots: IndexMap<Slot, Vec<String>>,
}

impl SupplementPlan {
    /// Create an empty plan covering all three slots.
    pub fn empty() -> Self {
        let mut slots = IndexMap::new();
        for slot in Slot::ALL {
            slots.insert(slot, Vec::new());
        }
        Self { slots }
    }

    /// Nutrients assigned to a slot, in placement order.
    pub fn nutrients_in(&self, slot: Slot) -> &[String] {
        self.slots.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The slot a nutrient was placed in, if scheduled.
    pub fn slot_of(&self, nutrient: &str) -> Option<Slot> {
        Slot::ALL
            .into_iter()
            .find(|slot| self.nutrients_in(*slot).iter().any(|n| n == nutrient))
    }

    /// All scheduled nutrients in (slot, placement) order.
    pub fn scheduled(&self) -> impl Iterator<Item = &str> {
        self.slots.values().flatten().map(String::as_str)
    }

    /// Whether no nutrient is scheduled at all.
    pub fn is_empty(&self) -> bool {
        self.slots.values().all(Vec::is_empty)
    }

    pub(crate) fn place(&mut self, slot: Slot, nutrient: &str) {
        self.slots
            .get_mut(&slot)
            .expect("plan covers all slots")
            .push(nutrient.to_string());
    }

    /// Remove a nutrient from whatever slot holds it. Returns whether it was
    /// scheduled at all.
    pub(crate) fn remove_nutrient(&mut self, nutrient: &str) -> bool {
        let mut removed = false;
        for list in self.slots.values_mut() {
            let before = list.len();
            list.retain(|n| n != nutrient);
            removed |= list.len() != before;
        }
        removed
    }

    fn least_populated(&self) -> Slot {
        // Earliest slot wins ties.
        Slot::ALL
            .into_iter()
            .min_by_key(|slot| self.nutrients_in(*slot).len())
            .expect("slot set is non-empty")
    }
}

/// One resolution the scheduler made while placing nutrients.
///
/// The trace is the annotator's input; it is recorded in placement order and
/// therefore deterministic for identical inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    /// A co-administration pair ended up sharing a slot.
    CoPlaced {
        nutrient: String,
        partner: String,
        slot: Slot,
    },
    /// An avoid-same-slot pair was kept in different slots.
    Separated {
        a: String,
        b: String,
        slot_a: Slot,
        slot_b: Slot,
    },
    /// A spacing rule is satisfied by the slots chosen.
    Spaced {
        a: String,
        b: String,
        slot_a: Slot,
        slot_b: Slot,
        hours: u8,
    },
    /// No conflict-free slot existed; the nutrient went to the least
    /// populated slot anyway.
    Overflow { nutrient: String, slot: Slot },
}

/// Trace of all constraint resolutions for one scheduling run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementTrace {
    pub events: Vec<TraceEvent>,
}

/// Deterministic slot scheduler.
#[derive(Debug, Clone, Default)]
pub struct SupplementScheduler;

impl SupplementScheduler {
    pub fn new() -> Self {
        Self
    }

    /// Assign flagged nutrients to slots.
    ///
    /// `flags` is expected in resolver order (strength descending, key
    /// ascending); the scheduler re-sorts defensively so its output never
    /// depends on caller ordering.
    pub fn schedule(
        &self,
        flags: &[NutrientFlag],
        rules: &InteractionRuleTable,
    ) -> (SupplementPlan, PlacementTrace) {
        let mut ordered: Vec<&NutrientFlag> = flags.iter().collect();
        ordered.sort_by(|a, b| {
            b.strength
                .cmp(&a.strength)
                .then_with(|| a.nutrient.cmp(&b.nutrient))
        });

        let mut plan = SupplementPlan::empty();
        let mut trace = PlacementTrace::default();

        for flag in &ordered {
            let nutrient = flag.nutrient.as_str();
            let slot = self.choose_slot(nutrient, &plan, rules, &mut trace);
            plan.place(slot, nutrient);

            // Record honored co-administrations against already placed
            // nutrients; each pair is seen exactly once this way.
            for partner in rules.co_partners(nutrient) {
                if plan.nutrients_in(slot).iter().any(|n| n == partner) {
                    trace.events.push(TraceEvent::CoPlaced {
                        nutrient: nutrient.to_string(),
                        partner: partner.to_string(),
                        slot,
                    });
                }
            }
        }

        self.record_pair_outcomes(&plan, rules, &mut trace);
        (plan, trace)
    }

    /// Pick the slot for one nutrient.
    fn choose_slot(
        &self,
        nutrient: &str,
        plan: &SupplementPlan,
        rules: &InteractionRuleTable,
        trace: &mut PlacementTrace,
    ) -> Slot {
        // Prefer the slot of an already-placed co-administration partner.
        for partner in rules.co_partners(nutrient) {
            if let Some(slot) = plan.slot_of(partner) {
                if self.conflict_free(nutrient, slot, plan, rules) {
                    return slot;
                }
            }
        }

        // First conflict-free slot in fixed day order.
        for slot in Slot::ALL {
            if self.conflict_free(nutrient, slot, plan, rules) {
                return slot;
            }
        }

        // Nowhere is conflict-free: take the least populated slot and note it.
        let slot = plan.least_populated();
        trace.events.push(TraceEvent::Overflow {
            nutrient: nutrient.to_string(),
            slot,
        });
        slot
    }

    fn conflict_free(
        &self,
        nutrient: &str,
        slot: Slot,
        plan: &SupplementPlan,
        rules: &InteractionRuleTable,
    ) -> bool {
        plan.nutrients_in(slot)
            .iter()
            .all(|placed| !rules.conflicts(nutrient, placed))
    }

    /// After placement, record which avoid and spacing rules were satisfied
    /// by the chosen slots. Iterates the rule table, so note order follows
    /// the table, not the input.
    fn record_pair_outcomes(
        &self,
        plan: &SupplementPlan,
        rules: &InteractionRuleTable,
        trace: &mut PlacementTrace,
    ) {
        use crate::tables::Relation;

        for rule in rules.rules() {
            let (slot_a, slot_b) = match (plan.slot_of(&rule.a), plan.slot_of(&rule.b)) {
                (Some(a), Some(b)) => (a, b),
                _ => continue,
            };
            if slot_a == slot_b {
                continue;
            }
            match rule.relation {
                Relation::AvoidSameSlot => trace.events.push(TraceEvent::Separated {
                    a: rule.a.clone(),
                    b: rule.b.clone(),
                    slot_a,
                    slot_b,
                }),
                Relation::MinSpacingHours { hours } => trace.events.push(TraceEvent::Spaced {
                    a: rule.a.clone(),
                    b: rule.b.clone(),
                    slot_a,
                    slot_b,
                    hours,
                }),
                Relation::CoAdminister => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag(nutrient: &str, strength: u32) -> NutrientFlag {
        NutrientFlag {
            nutrient: nutrient.to_string(),
            strength,
            markers: Vec::new(),
        }
    }

    #[test]
    fn test_conflicting_pair_lands_in_different_slots() {
        let scheduler = SupplementScheduler::new();
        let rules = InteractionRuleTable::builtin();
        let flags = vec![flag("iron", 3), flag("calcium", 1)];

        let (plan, trace) = scheduler.schedule(&flags, &rules);

        let iron = plan.slot_of("iron").unwrap();
        let calcium = plan.slot_of("calcium").unwrap();
        assert_ne!(iron, calcium);
        assert_eq!(iron, Slot::Morning);
        assert_eq!(calcium, Slot::Midday);
        assert!(trace
            .events
            .iter()
            .any(|e| matches!(e, TraceEvent::Separated { .. })));
    }

    #[test]
    fn test_co_administer_partner_shares_slot() {
        let scheduler = SupplementScheduler::new();
        let rules = InteractionRuleTable::builtin();
        // iron places first (higher strength), vitamin_C should join it.
        let flags = vec![flag("iron", 2), flag("vitamin_C", 1)];

        let (plan, trace) = scheduler.schedule(&flags, &rules);

        assert_eq!(plan.slot_of("iron"), plan.slot_of("vitamin_C"));
        assert!(trace.events.iter().any(|e| matches!(
            e,
            TraceEvent::CoPlaced { nutrient, partner, .. }
                if nutrient == "vitamin_C" && partner == "iron"
        )));
    }

    #[test]
    fn test_overflow_goes_to_least_populated_slot() {
        let scheduler = SupplementScheduler::new();
        // Pathological table: every pair conflicts, so b, c and d occupy one
        // slot each and a has no clean slot left.
        let rules = InteractionRuleTable::from_rules([
            rule("a", "b"),
            rule("a", "c"),
            rule("a", "d"),
            rule("b", "c"),
            rule("b", "d"),
            rule("c", "d"),
        ])
        .unwrap();
        let flags = vec![flag("b", 2), flag("c", 2), flag("d", 2), flag("a", 1)];

        let (plan, trace) = scheduler.schedule(&flags, &rules);

        assert!(plan.slot_of("a").is_some());
        assert!(trace
            .events
            .iter()
            .any(|e| matches!(e, TraceEvent::Overflow { nutrient, .. } if nutrient == "a")));
    }

    #[test]
    fn test_ties_broken_by_key_not_input_order() {
        let scheduler = SupplementScheduler::new();
        let rules = InteractionRuleTable::builtin();

        let forward = vec![flag("zinc", 1), flag("magnesium", 1)];
        let backward = vec![flag("magnesium", 1), flag("zinc", 1)];

        let (plan_a, _) = scheduler.schedule(&forward, &rules);
        let (plan_b, _) = scheduler.schedule(&backward, &rules);
        assert_eq!(plan_a, plan_b);
        // magnesium < zinc, so magnesium places first, into morning.
        assert_eq!(plan_a.slot_of("magnesium"), Some(Slot::Morning));
    }

    #[test]
    fn test_empty_flags_give_empty_plan() {
        let scheduler = SupplementScheduler::new();
        let rules = InteractionRuleTable::builtin();

        let (plan, trace) = scheduler.schedule(&[], &rules);
        assert!(plan.is_empty());
        assert!(trace.events.is_empty());
        // All three slots are still present.
        for slot in Slot::ALL {
            assert!(plan.nutrients_in(slot).is_empty());
        }
    }

    #[test]
    fn test_spacing_rule_noted_when_slots_differ() {
        let scheduler = SupplementScheduler::new();
        let rules = InteractionRuleTable::builtin();
        // iron pushes calcium out of morning; magnesium stays in morning, so
        // the calcium/magnesium spacing rule is satisfied across slots.
        let flags = vec![flag("iron", 3), flag("calcium", 2), flag("magnesium", 1)];

        let (plan, trace) = scheduler.schedule(&flags, &rules);

        assert_ne!(plan.slot_of("calcium"), plan.slot_of("magnesium"));
        assert!(trace
            .events
            .iter()
            .any(|e| matches!(e, TraceEvent::Spaced { hours: 4, .. })));
    }

    fn rule(a: &str, b: &str) -> crate::tables::InteractionRule {
        crate::tables::InteractionRule {
            a: a.to_string(),
            b: b.to_string(),
            relation: crate::tables::Relation::AvoidSameSlot,
            note: String::new(),
        }
    }
}
