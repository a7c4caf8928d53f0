//! Saved report handler.

use axum::{extract::State, Json};
use driftscope::report::latest_report;
use driftscope::DriftReport;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Return the newest saved report.
pub async fn get_latest_report(State(state): State<AppState>) -> Result<Json<DriftReport>, ApiError> {
    let path = latest_report(state.output_dir())?
        .ok_or_else(|| ApiError::NotFound("no drift report has been saved yet".to_string()))?;
    Ok(Json(DriftReport::load(path)?))
}
