//! Health endpoint.

use axum::Json;

use crate::error::AppResult;
use crate::models::HealthResponse;

/// `GET /api/health` — liveness probe reporting the core library version.
pub async fn health_handler() -> AppResult<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        ok: true,
        version: storechat_core::version().to_string(),
    }))
}
