//! Price quote returned by the external `/price` endpoint.

use serde::{Deserialize, Serialize};

use super::string_or_number;

/// Pricing and product data for the page being visited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    #[serde(default)]
    pub currency: String,
    #[serde(deserialize_with = "string_or_number")]
    pub price: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub sku: String,
    #[serde(default)]
    pub title: String,
    #[serde(deserialize_with = "string_or_number")]
    pub variant_id: String,
    #[serde(default)]
    pub success: bool,
}

/// Full body of a `/price` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub product_handle: Option<String>,
    #[serde(default)]
    pub price_data: Option<PriceQuote>,
}

impl PriceResponse {
    /// Extract the quote if the payload is well formed: both the envelope and
    /// the inner price data report success.
    pub fn into_quote(self) -> Option<PriceQuote> {
        if !self.success {
            return None;
        }
        self.price_data.filter(|quote| quote.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> PriceResponse {
        serde_json::from_str(body).expect("valid price body")
    }

    #[test]
    fn well_formed_payload_yields_quote() {
        let resp = parse(
            r#"{
                "success": true,
                "product_handle": "linen-shirt",
                "price_data": {
                    "currency": "USD",
                    "price": "49.00",
                    "sku": "LS-01",
                    "success": true,
                    "title": "Linen Shirt",
                    "variant_id": 4412
                }
            }"#,
        );
        let quote = resp.into_quote().expect("quote");
        assert_eq!(quote.title, "Linen Shirt");
        assert_eq!(quote.price, "49.00");
        assert_eq!(quote.variant_id, "4412");
    }

    #[test]
    fn numeric_price_is_kept_as_text() {
        let resp = parse(
            r#"{"success": true, "price_data": {"currency": "EUR", "price": 12.5,
                "sku": 77, "success": true, "title": "Mug", "variant_id": "v-1"}}"#,
        );
        let quote = resp.into_quote().unwrap();
        assert_eq!(quote.price, "12.5");
        assert_eq!(quote.sku, "77");
    }

    #[test]
    fn envelope_failure_yields_none() {
        let resp = parse(
            r#"{"success": false, "price_data": {"currency": "USD", "price": "1",
                "sku": "x", "success": true, "title": "t", "variant_id": 1}}"#,
        );
        assert!(resp.into_quote().is_none());
    }

    #[test]
    fn inner_failure_yields_none() {
        let resp = parse(
            r#"{"success": true, "price_data": {"currency": "USD", "price": "1",
                "sku": "x", "success": false, "title": "t", "variant_id": 1}}"#,
        );
        assert!(resp.into_quote().is_none());
    }

    #[test]
    fn missing_price_data_yields_none() {
        assert!(parse(r#"{"success": true}"#).into_quote().is_none());
    }
}
