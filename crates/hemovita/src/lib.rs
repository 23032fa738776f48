//! # HemoVita
//!
//! A deterministic micronutrient lab report engine.
//!
//! HemoVita turns a panel of lab measurements into a complete report:
//! markers are classified against reference ranges, non-normal markers are
//! resolved to implicated nutrients, supplements are scheduled into
//! morning/midday/evening slots under pairwise interaction constraints,
//! diet-compatible food sources are suggested, and a narrative report is
//! composed. The whole pipeline is a pure function of the request and the
//! configured tables; identical inputs always produce byte-identical output.
//!
//! ## Example
//!
//! ```
//! use hemovita::{Hemovita, ReportRequest};
//! use indexmap::IndexMap;
//!
//! let engine = Hemovita::new();
//!
//! let mut labs = IndexMap::new();
//! labs.insert("Hemoglobin".to_string(), 11.4);
//! labs.insert("ferritin".to_string(), 12.0);
//!
//! let report = engine.report(&ReportRequest {
//!     labs,
//!     ..Default::default()
//! });
//!
//! assert!(report.supplement_plan.slot_of("iron").is_some());
//! ```
//!
//! All rule tables ship with built-in defaults and can be replaced from CSV
//! files via [`HemovitaConfig::from_csv_dir`]; table loading is the only
//! fatal error in the crate.

pub mod classify;
pub mod error;
pub mod hemovita;
pub mod recommend;
pub mod report;
pub mod request;
pub mod resolve;
pub mod schedule;
pub mod tables;

pub use classify::{MarkerClassifier, MarkerStatus};
pub use error::{HemovitaError, Result};
pub use hemovita::{Hemovita, HemovitaConfig};
pub use recommend::{FoodPick, FoodRecommender, MAX_FOODS_PER_NUTRIENT};
pub use report::{Report, ReportComposer};
pub use request::{PatientInfo, ReportRequest, Sex};
pub use resolve::{DeficiencyResolver, DeficiencySignal, NutrientFlag};
pub use schedule::annotate::InteractionAnnotator;
pub use schedule::{PlacementTrace, Slot, SupplementPlan, SupplementScheduler, TraceEvent};
pub use tables::{
    display_name, DietFilter, DietTag, FoodCatalog, FoodItem, InteractionRule,
    InteractionRuleTable, Marker, ReferenceRangeTable, Relation,
};
