//! Visit Notifier — records page-visit metadata posted by the widget.
//!
//! No persistence and no validation: the report is logged and acknowledged.

use axum::Json;
use axum::body::Bytes;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use tracing::{error, info};

use crate::error::{AppError, AppResult};
use crate::models::{VisitAckResponse, VisitReport};

/// `POST /api/chatbot/url` — log the visit and acknowledge it.
///
/// The body is parsed by hand rather than through the `Json` extractor so
/// that any unreadable body answers `500` with the generic error body.
pub async fn visit_handler(body: Bytes) -> AppResult<Json<VisitAckResponse>> {
    let report = parse_report(&body).inspect_err(|e| {
        error!("Error processing chatbot URL data: {e}");
    })?;

    info!(
        full_url = %field(&report.full_url),
        path = %field(&report.path),
        hostname = %field(&report.hostname),
        timestamp = %field(&report.timestamp),
        user_agent = %field(&report.user_agent),
        referrer = %field(&report.referrer),
        "chatbot URL data received"
    );

    Ok(Json(VisitAckResponse {
        success: true,
        message: "URL data received successfully".into(),
        received_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

fn parse_report(body: &[u8]) -> Result<VisitReport, AppError> {
    Ok(serde_json::from_slice(body)?)
}

/// Log form of a report field: strings bare, other values as JSON, absent as empty.
fn field(value: &Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_full_report() {
        let report = parse_report(
            br#"{
                "fullUrl": "https://shop.example.com/p/1",
                "path": "/p/1",
                "hostname": "shop.example.com",
                "timestamp": "2026-01-01T00:00:00.000Z",
                "userAgent": "ua",
                "referrer": ""
            }"#,
        )
        .unwrap();
        assert_eq!(field(&report.hostname), "shop.example.com");
        assert_eq!(field(&report.user_agent), "ua");
    }

    #[test]
    fn missing_fields_are_accepted() {
        let report = parse_report(b"{}").unwrap();
        assert!(report.full_url.is_none());
        assert_eq!(field(&report.referrer), "");
    }

    #[test]
    fn non_string_fields_are_accepted() {
        let report = parse_report(
            br#"{"fullUrl":"https://x/","timestamp":1735689600000,"referrer":null,"path":["/a"]}"#,
        )
        .unwrap();
        assert_eq!(report.timestamp, Some(json!(1735689600000_u64)));
        assert_eq!(field(&report.timestamp), "1735689600000");
        assert_eq!(field(&report.referrer), "");
        assert_eq!(field(&report.path), r#"["/a"]"#);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            parse_report(b"not json"),
            Err(AppError::VisitProcessing(_))
        ));
        assert!(parse_report(b"").is_err());
    }
}
