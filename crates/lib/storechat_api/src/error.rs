//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to process URL data: {0}")]
    VisitProcessing(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // The cause is logged by the handler; clients only see a generic message.
        let (status, error) = match &self {
            AppError::VisitProcessing(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to process URL data")
            }
        };
        let body = Json(ErrorResponse {
            success: false,
            error: error.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::VisitProcessing(e.to_string())
    }
}
