//! API error types and handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use driftscope::DriftError;
use serde::Serialize;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Internal server error.
    Internal(String),
    /// Error from the drift engine.
    Drift(DriftError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg),
            ApiError::Drift(e @ (DriftError::InvalidThreshold(_) | DriftError::Config(_))) => {
                (StatusCode::BAD_REQUEST, "invalid_config", e.to_string())
            }
            ApiError::Drift(e) => (StatusCode::INTERNAL_SERVER_ERROR, "drift_error", e.to_string()),
        };

        if status.is_server_error() {
            tracing::error!(event_type = "drift_error", %message, "request failed");
        }

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<DriftError> for ApiError {
    fn from(err: DriftError) -> Self {
        ApiError::Drift(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Drift(e) => write!(f, "Drift error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}
