//! Error types for the HemoVita library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for HemoVita operations.
///
/// Every variant is a startup/table-loading failure. Report generation never
/// returns an error: malformed per-request input degrades to `unknown` labels
/// and empty plan sections instead.
#[derive(Debug, Error)]
pub enum HemovitaError {
    /// Error reading or accessing a table file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library while reading a table.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed reference range, interaction rule, or food catalog entry.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for HemoVita operations.
pub type Result<T> = std::result::Result<T, HemovitaError>;
