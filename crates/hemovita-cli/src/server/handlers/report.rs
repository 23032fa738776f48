//! Report generation handler.

use axum::{extract::State, Json};
use hemovita::{Report, ReportRequest};

use crate::server::state::AppState;

/// POST /api/report - generate a report for a lab panel.
///
/// An empty panel is a valid request; the engine labels every known marker
/// `unknown`.
pub async fn generate_report(
    State(state): State<AppState>,
    Json(request): Json<ReportRequest>,
) -> Json<Report> {
    Json(state.engine.report(&request))
}
