//! CLI command implementations.

pub mod markers;
pub mod report;
pub mod serve;
