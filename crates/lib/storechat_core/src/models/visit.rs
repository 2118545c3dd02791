//! Page-visit metadata sent on load.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Context of the current page visit. Built once per page load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitMetadata {
    pub full_url: String,
    pub path: String,
    pub hostname: String,
    pub timestamp: String,
    pub user_agent: String,
    pub referrer: String,
}

impl VisitMetadata {
    /// Build metadata for `page`, deriving `path` and `hostname` from it and
    /// stamping the current time.
    pub fn new(page: &Url, user_agent: impl Into<String>, referrer: impl Into<String>) -> Self {
        Self {
            full_url: page.to_string(),
            path: page.path().to_string(),
            hostname: page.host_str().unwrap_or_default().to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            user_agent: user_agent.into(),
            referrer: referrer.into(),
        }
    }
}

/// Acknowledgment returned by the Visit Notifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitAck {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub received_at: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
