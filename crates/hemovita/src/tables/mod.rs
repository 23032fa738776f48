//! Static lookup tables: reference ranges, interaction rules, food catalog.
//!
//! All three tables are immutable after construction and injected into the
//! engine at build time, so tests can substitute alternate tables and no
//! module-level mutable state exists anywhere in the crate.

pub mod foods;
pub mod interaction;
pub mod keys;
pub mod reference;

pub use foods::{DietFilter, DietTag, FoodCatalog, FoodItem};
pub use interaction::{InteractionRule, InteractionRuleTable, Relation};
pub use keys::display_name;
pub use reference::{Marker, ReferenceRangeTable};
