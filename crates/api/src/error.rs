use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracker_core::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for engine errors. Implements [`IntoResponse`] to
/// produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An engine error from `tracker_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::UnknownGauge(id) => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("Gauge '{id}' not found"),
                ),
                CoreError::InvalidReadingValue { .. } => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "INVALID_READING",
                    core.to_string(),
                ),
                // Registry problems are startup configuration faults; a
                // request that surfaces one is a server error.
                CoreError::InvalidThresholdConfig { .. }
                | CoreError::DuplicateGauge(_)
                | CoreError::InvalidRegistry(_) => {
                    tracing::error!(error = %core, "Registry configuration error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
