//! Request and response bodies of the external `/negotiable` endpoint.

use serde::{Deserialize, Serialize};

use super::PriceQuote;

/// Outgoing negotiation call: the shopper's message plus price context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NegotiationRequest {
    /// The shopper's message, as typed.
    pub messages: String,
    pub product_name: String,
    pub initial_price: String,
    /// Variant id of the quoted product.
    pub id: String,
}

impl NegotiationRequest {
    /// Pair `text` with the quote's title, price and variant id. Without a
    /// quote the context fields are sent empty.
    pub fn new(text: impl Into<String>, quote: Option<&PriceQuote>) -> Self {
        let (product_name, initial_price, id) = quote
            .map(|q| (q.title.clone(), q.price.clone(), q.variant_id.clone()))
            .unwrap_or_default();
        Self {
            messages: text.into(),
            product_name,
            initial_price,
            id,
        }
    }
}

/// Reply from the negotiation backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NegotiationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub redirect_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote() -> PriceQuote {
        PriceQuote {
            currency: "USD".into(),
            price: "49.00".into(),
            sku: "LS-01".into(),
            title: "Linen Shirt".into(),
            variant_id: "4412".into(),
            success: true,
        }
    }

    #[test]
    fn request_carries_quote_context() {
        let req = NegotiationRequest::new("can I get 10% off?", Some(&quote()));
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["messages"], "can I get 10% off?");
        assert_eq!(json["productName"], "Linen Shirt");
        assert_eq!(json["initialPrice"], "49.00");
        assert_eq!(json["id"], "4412");
    }

    #[test]
    fn request_without_quote_has_empty_context() {
        let req = NegotiationRequest::new("hello", None);
        assert!(req.product_name.is_empty());
        assert!(req.initial_price.is_empty());
        assert!(req.id.is_empty());
    }

    #[test]
    fn response_redirect_is_optional() {
        let resp: NegotiationResponse =
            serde_json::from_str(r#"{"success": true, "message": "Deal at $45!"}"#).unwrap();
        assert!(resp.redirect_url.is_none());
        assert_eq!(resp.message.as_deref(), Some("Deal at $45!"));
    }
}
