//! Property-based tests for pipeline invariants.

use hemovita::{
    Hemovita, InteractionRuleTable, MarkerStatus, NutrientFlag, Relation, ReportRequest,
    SupplementScheduler,
};
use indexmap::IndexMap;
use proptest::prelude::*;

fn marker_key() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "Hemoglobin",
        "MCV",
        "ferritin",
        "vitamin_B12",
        "folate_plasma",
        "vitamin_D",
        "vitamin_A",
        "vitamin_C",
        "magnesium",
        "calcium",
        "zinc",
        "homocysteine",
        "unobtanium",
    ])
    .prop_map(String::from)
}

fn lab_panel() -> impl Strategy<Value = IndexMap<String, f64>> {
    prop::collection::vec((marker_key(), -10.0f64..500.0), 0..12)
        .prop_map(|pairs| pairs.into_iter().collect())
}

fn nutrient_flags() -> impl Strategy<Value = Vec<NutrientFlag>> {
    prop::collection::btree_set(
        prop::sample::select(vec![
            "iron",
            "calcium",
            "magnesium",
            "zinc",
            "vitamin_C",
            "vitamin_D",
            "vitamin_B12",
            "folate",
        ]),
        0..8,
    )
    .prop_flat_map(|nutrients| {
        let n = nutrients.len();
        (
            Just(nutrients),
            prop::collection::vec(1u32..5, n),
        )
    })
    .prop_map(|(nutrients, strengths)| {
        nutrients
            .into_iter()
            .zip(strengths)
            .map(|(nutrient, strength)| NutrientFlag {
                nutrient: nutrient.to_string(),
                strength,
                markers: Vec::new(),
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_reports_are_deterministic(labs in lab_panel()) {
        let engine = Hemovita::new();
        let request = ReportRequest { labs, ..Default::default() };

        let a = serde_json::to_string(&engine.report(&request)).unwrap();
        let b = serde_json::to_string(&engine.report(&request)).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_every_submitted_marker_is_labeled(labs in lab_panel()) {
        let engine = Hemovita::new();
        let request = ReportRequest { labs: labs.clone(), ..Default::default() };
        let report = engine.report(&request);

        if labs.is_empty() {
            // Empty panels surface the whole known marker set as unknown.
            prop_assert_eq!(report.labels.len(), engine.reference().len());
            prop_assert!(report.labels.values().all(|s| *s == MarkerStatus::Unknown));
        } else {
            prop_assert_eq!(report.labels.len(), labs.len());
            for key in labs.keys() {
                prop_assert!(report.labels.contains_key(key));
            }
        }
    }

    #[test]
    fn prop_avoid_pairs_never_share_a_slot(flags in nutrient_flags()) {
        let scheduler = SupplementScheduler::new();
        let rules = InteractionRuleTable::builtin();
        let (plan, _) = scheduler.schedule(&flags, &rules);

        for rule in rules.rules() {
            if rule.relation != Relation::AvoidSameSlot {
                continue;
            }
            if let (Some(slot_a), Some(slot_b)) =
                (plan.slot_of(&rule.a), plan.slot_of(&rule.b))
            {
                prop_assert_ne!(slot_a, slot_b, "pair {}/{} shares a slot", rule.a, rule.b);
            }
        }
    }

    #[test]
    fn prop_every_flag_is_scheduled_exactly_once(flags in nutrient_flags()) {
        let scheduler = SupplementScheduler::new();
        let rules = InteractionRuleTable::builtin();
        let (plan, _) = scheduler.schedule(&flags, &rules);

        let scheduled: Vec<&str> = plan.scheduled().collect();
        prop_assert_eq!(scheduled.len(), flags.len());
        for flag in &flags {
            prop_assert_eq!(
                scheduled.iter().filter(|n| **n == flag.nutrient).count(),
                1
            );
        }
    }

    #[test]
    fn prop_only_flagged_nutrients_get_foods(labs in lab_panel()) {
        let engine = Hemovita::new();
        let request = ReportRequest { labs, ..Default::default() };
        let report = engine.report(&request);

        let scheduled: Vec<&str> = report.supplement_plan.scheduled().collect();
        for nutrient in report.foods.keys() {
            prop_assert!(
                scheduled.contains(&nutrient.as_str()),
                "foods entry {} has no scheduled counterpart",
                nutrient
            );
        }
    }

    #[test]
    fn prop_normal_markers_never_flag(value in 12.0f64..=16.0) {
        let engine = Hemovita::new();
        let mut labs = IndexMap::new();
        labs.insert("Hemoglobin".to_string(), value);
        let report = engine.report(&ReportRequest { labs, ..Default::default() });

        prop_assert_eq!(report.labels["Hemoglobin"], MarkerStatus::Normal);
        prop_assert!(report.supplement_plan.is_empty());
    }
}
