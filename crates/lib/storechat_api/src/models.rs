//! Request and response bodies of the HTTP API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body posted by the widget on page load. Every field is optional and may
/// hold any JSON value: the notifier records whatever it is given.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitReport {
    pub full_url: Option<Value>,
    pub path: Option<Value>,
    pub hostname: Option<Value>,
    pub timestamp: Option<Value>,
    pub user_agent: Option<Value>,
    pub referrer: Option<Value>,
}

/// Successful acknowledgment of a visit report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitAckResponse {
    pub success: bool,
    pub message: String,
    pub received_at: String,
}

/// Error body shared by all routes.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// `GET /api/health` body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub version: String,
}
