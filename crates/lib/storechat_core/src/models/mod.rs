//! Domain models shared by the widget, the session driver and the backend client.
//!
//! Wire names follow the backend's JSON (`camelCase` for visit metadata and
//! negotiation requests, `snake_case` for the price payload).

pub mod negotiation;
pub mod quote;
pub mod turn;
pub mod visit;

pub use negotiation::{NegotiationRequest, NegotiationResponse};
pub use quote::{PriceQuote, PriceResponse};
pub use turn::{ChatTurn, Sender};
pub use visit::{VisitAck, VisitMetadata};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts a JSON string or number and keeps it as a string.
///
/// The external backend is not consistent about whether prices, SKUs and
/// variant ids are quoted.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}
