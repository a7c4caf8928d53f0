//! Manual alert handler.

use axum::Json;
use driftscope::alert::{AlertEvent, AlertSeverity, AlertSink, TracingSink};
use serde::Deserialize;

use crate::server::error::ApiError;

/// Body of a manual alert. Every field is optional.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ManualAlertRequest {
    pub message: String,
    pub severity: AlertSeverity,
}

impl Default for ManualAlertRequest {
    fn default() -> Self {
        Self {
            message: "Manual drift alert triggered".to_string(),
            severity: AlertSeverity::Warning,
        }
    }
}

/// Forward an operator-triggered alert to the log sink.
pub async fn manual_alert(
    body: Option<Json<ManualAlertRequest>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    TracingSink.send(&AlertEvent::manual(request.message, request.severity))?;
    Ok(Json(serde_json::json!({ "status": "alert_sent" })))
}
