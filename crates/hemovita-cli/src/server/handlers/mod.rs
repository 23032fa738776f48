//! API request handlers.

mod markers;
mod report;

pub use markers::*;
pub use report::*;
