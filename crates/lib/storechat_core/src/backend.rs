//! Client for the external pricing/negotiation backend.
//!
//! The backend is an opaque HTTP service with two endpoints:
//!
//! - `POST {base}/price` — body [`VisitMetadata`], answers [`PriceResponse`]
//! - `POST {base}/negotiable` — body [`NegotiationRequest`], answers [`NegotiationResponse`]
//!
//! [`Backend`] is the seam the session driver talks to; [`HttpBackend`] is
//! the `reqwest` implementation. [`notify_visit`] posts to the local Visit
//! Notifier route.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::models::{
    NegotiationRequest, NegotiationResponse, PriceResponse, VisitAck, VisitMetadata,
};

/// Errors talking to the backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    #[error("Backend request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Backend response parse error: {0}")]
    Parse(String),

    #[error("Backend reported failure")]
    Unsuccessful,
}

/// Result type for backend operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Operations the widget needs from the external backend.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Look up the price of the product on the visited page.
    async fn price(&self, visit: &VisitMetadata) -> Result<PriceResponse>;

    /// Forward a shopper message plus price context and get a reply.
    async fn negotiate(&self, request: &NegotiationRequest) -> Result<NegotiationResponse>;
}

/// [`Backend`] over plain HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// Create a backend rooted at `base_url` (e.g. `https://pricing.example.com`).
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let mut base_url =
            Url::parse(base_url).map_err(|e| BackendError::InvalidUrl(format!("{base_url}: {e}")))?;
        // Joining relative paths replaces the last segment unless the base ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, name: &str) -> Result<Url> {
        self.base_url
            .join(name)
            .map_err(|e| BackendError::InvalidUrl(format!("{name}: {e}")))
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn price(&self, visit: &VisitMetadata) -> Result<PriceResponse> {
        let url = self.endpoint("price")?;
        post_json(&self.client, url, visit).await
    }

    async fn negotiate(&self, request: &NegotiationRequest) -> Result<NegotiationResponse> {
        let url = self.endpoint("negotiable")?;
        post_json(&self.client, url, request).await
    }
}

/// Post `visit` to the local Visit Notifier at `url`.
pub async fn notify_visit(client: &Client, url: &Url, visit: &VisitMetadata) -> Result<VisitAck> {
    let ack: VisitAck = post_json(client, url.clone(), visit).await?;
    if !ack.success {
        return Err(BackendError::Unsuccessful);
    }
    Ok(ack)
}

async fn post_json<B, R>(client: &Client, url: Url, body: &B) -> Result<R>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let resp = client.post(url).json(body).send().await?;

    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .unwrap_or_else(|_| "<no body>".to_string());
        return Err(BackendError::Status { status, body });
    }

    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| BackendError::Parse(e.to_string()))
}
