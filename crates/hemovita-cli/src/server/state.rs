//! Application state for the report server.

use std::sync::Arc;

use hemovita::Hemovita;

/// Shared application state.
///
/// The engine is immutable after startup, so plain `Arc` sharing suffices;
/// concurrent report requests never contend on a lock.
#[derive(Clone)]
pub struct AppState {
    /// The configured report engine.
    pub engine: Arc<Hemovita>,
}

impl AppState {
    /// Create new application state.
    pub fn new(engine: Hemovita) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}
