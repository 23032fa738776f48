//! Reference range listing handler.

use axum::{extract::State, Json};
use hemovita::Marker;

use crate::server::state::AppState;

/// GET /api/markers - list the configured reference ranges.
pub async fn list_markers(State(state): State<AppState>) -> Json<Vec<Marker>> {
    Json(state.engine.reference().markers().cloned().collect())
}
