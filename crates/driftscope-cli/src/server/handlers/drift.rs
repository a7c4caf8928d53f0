//! Drift check handler.

use axum::{
    extract::{Query, State},
    Json,
};
use driftscope::alert::{dispatch, evaluate_alerts, RiskLevel, TracingSink};
use driftscope::DriftEngine;
use serde::{Deserialize, Serialize};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Query parameters for a drift check.
#[derive(Debug, Default, Deserialize)]
pub struct CheckParams {
    /// Overrides the configured threshold for this request.
    pub threshold: Option<f64>,
}

/// Response for the drift check endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckResponse {
    pub status: String,
    pub features_analyzed: usize,
    pub features_drifted: usize,
    pub drift_percentage: f64,
    pub risk_level: RiskLevel,
    /// Where the report was saved.
    pub report_path: String,
}

/// Liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Run the engine on the configured files, save the report and raise alerts.
pub async fn check_drift(
    State(state): State<AppState>,
    Query(params): Query<CheckParams>,
) -> Result<Json<CheckResponse>, ApiError> {
    let mut config = state.config().clone();
    if let Some(threshold) = params.threshold {
        config.threshold = threshold;
    }
    config.validate()?;

    // The engine is CPU-bound; keep it off the async workers.
    let worker_state = state.clone();
    let analysis = tokio::task::spawn_blocking(move || {
        DriftEngine::new(config).analyze_files(worker_state.reference_path(), worker_state.production_path())
    })
    .await
    .map_err(|e| ApiError::Internal(format!("drift task failed: {}", e)))??;

    let report = &analysis.analysis.report;
    let path = report.save_in_dir(state.output_dir())?;
    dispatch(&evaluate_alerts(report), &[&TracingSink])?;

    Ok(Json(CheckResponse {
        status: "success".to_string(),
        features_analyzed: report.features_analyzed,
        features_drifted: report.features_drifted,
        drift_percentage: report.drift_percentage,
        risk_level: RiskLevel::from_percentage(report.drift_percentage),
        report_path: path.display().to_string(),
    }))
}
