//! Reply resolution: turn a [`ReplyRequest`] into a [`ReplyOutcome`].

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::time::{sleep, timeout};
use tracing::{debug, warn};

use crate::backend::Backend;
use crate::config::{DEFAULT_REPLY_TIMEOUT, DelayRange};
use crate::replies;
use crate::widget::{ReplyOutcome, ReplyRequest};

/// Where replies come from.
#[derive(Clone)]
pub enum Responder {
    /// Keyword-matched canned copy after a simulated typing delay.
    Canned { delay: DelayRange },
    /// Whatever the negotiation backend answers, bounded by `timeout`.
    Remote {
        backend: Arc<dyn Backend>,
        timeout: Duration,
    },
}

impl std::fmt::Debug for Responder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Responder::Canned { delay } => f.debug_struct("Canned").field("delay", delay).finish(),
            Responder::Remote { timeout, .. } => {
                f.debug_struct("Remote").field("timeout", timeout).finish()
            }
        }
    }
}

impl Responder {
    pub fn canned(delay: DelayRange) -> Self {
        Responder::Canned { delay }
    }

    pub fn remote(backend: Arc<dyn Backend>) -> Self {
        Responder::Remote {
            backend,
            timeout: DEFAULT_REPLY_TIMEOUT,
        }
    }

    /// Override the negotiation timeout. No effect on canned responders.
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        if let Responder::Remote { timeout, .. } = &mut self {
            *timeout = limit;
        }
        self
    }

    /// Upper bound on backend calls, for remote responders.
    pub fn call_timeout(&self) -> Option<Duration> {
        match self {
            Responder::Canned { .. } => None,
            Responder::Remote { timeout, .. } => Some(*timeout),
        }
    }

    /// Resolve `request`. Never fails: errors become [`ReplyOutcome::Failed`]
    /// or [`ReplyOutcome::TimedOut`].
    pub async fn resolve(&self, request: &ReplyRequest) -> ReplyOutcome {
        match self {
            Responder::Canned { delay } => {
                sleep(pick_delay(*delay)).await;
                ReplyOutcome::Canned(replies::canned_reply(&request.text).to_string())
            }
            Responder::Remote {
                backend,
                timeout: limit,
            } => negotiate(backend.as_ref(), request, *limit).await,
        }
    }
}

fn pick_delay(range: DelayRange) -> Duration {
    let ms = if range.min_ms == range.max_ms {
        range.min_ms
    } else {
        rand::rng().random_range(range.min_ms..=range.max_ms)
    };
    Duration::from_millis(ms)
}

async fn negotiate(backend: &dyn Backend, request: &ReplyRequest, limit: Duration) -> ReplyOutcome {
    let body = request.negotiation();
    debug!(token = request.token.get(), product = %body.product_name, "negotiation call");

    match timeout(limit, backend.negotiate(&body)).await {
        Err(_) => {
            warn!(token = request.token.get(), ?limit, "negotiation call timed out");
            ReplyOutcome::TimedOut
        }
        Ok(Err(e)) => {
            warn!(token = request.token.get(), "negotiation call failed: {e}");
            ReplyOutcome::Failed(e.to_string())
        }
        Ok(Ok(resp)) => match resp.message {
            Some(message) if resp.success => ReplyOutcome::Negotiated {
                message,
                redirect_url: resp.redirect_url.filter(|u| !u.trim().is_empty()),
            },
            _ => {
                warn!(token = request.token.get(), "negotiation backend reported failure");
                ReplyOutcome::Failed("backend reported failure".to_string())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::backend::{BackendError, Result};
    use crate::models::{
        NegotiationRequest, NegotiationResponse, PriceQuote, PriceResponse, VisitMetadata,
    };
    use crate::widget::Widget;

    enum Script {
        Reply(NegotiationResponse),
        Error,
        Hang,
    }

    struct ScriptedBackend {
        script: Script,
        seen: Mutex<Vec<NegotiationRequest>>,
    }

    impl ScriptedBackend {
        fn new(script: Script) -> Arc<Self> {
            Arc::new(Self {
                script,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Backend for ScriptedBackend {
        async fn price(&self, _visit: &VisitMetadata) -> Result<PriceResponse> {
            Err(BackendError::Unsuccessful)
        }

        async fn negotiate(&self, request: &NegotiationRequest) -> Result<NegotiationResponse> {
            self.seen.lock().unwrap().push(request.clone());
            match &self.script {
                Script::Reply(resp) => Ok(resp.clone()),
                Script::Error => Err(BackendError::Status {
                    status: 500,
                    body: "boom".into(),
                }),
                Script::Hang => std::future::pending().await,
            }
        }
    }

    fn request(text: &str) -> ReplyRequest {
        let mut widget = Widget::greet(Some(PriceQuote {
            currency: "USD".into(),
            price: "49.00".into(),
            sku: "LS-01".into(),
            title: "Linen Shirt".into(),
            variant_id: "4412".into(),
            success: true,
        }));
        widget.submit(text).unwrap()
    }

    #[tokio::test]
    async fn canned_reply_uses_keyword_rules() {
        let responder = Responder::canned(DelayRange::immediate());
        let outcome = responder.resolve(&request("Tell me about free gifts")).await;
        assert_eq!(outcome, ReplyOutcome::Canned(replies::GIFT.to_string()));
    }

    #[test]
    fn delay_stays_in_range() {
        let range = DelayRange::new(1000, 3000);
        for _ in 0..50 {
            let d = pick_delay(range);
            assert!(d >= Duration::from_millis(1000) && d <= Duration::from_millis(3000));
        }
        assert_eq!(pick_delay(DelayRange::immediate()), Duration::ZERO);
    }

    #[tokio::test]
    async fn remote_reply_forwards_price_context() {
        let backend = ScriptedBackend::new(Script::Reply(NegotiationResponse {
            success: true,
            message: Some("I can do $45.".into()),
            redirect_url: Some("https://shop.example.com/checkout".into()),
        }));
        let responder = Responder::remote(backend.clone());
        let outcome = responder.resolve(&request("would you take 40?")).await;
        assert_eq!(
            outcome,
            ReplyOutcome::Negotiated {
                message: "I can do $45.".into(),
                redirect_url: Some("https://shop.example.com/checkout".into()),
            }
        );
        let seen = backend.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].messages, "would you take 40?");
        assert_eq!(seen[0].initial_price, "49.00");
        assert_eq!(seen[0].id, "4412");
    }

    #[tokio::test]
    async fn remote_error_is_failed() {
        let responder = Responder::remote(ScriptedBackend::new(Script::Error));
        let outcome = responder.resolve(&request("hi")).await;
        assert!(matches!(outcome, ReplyOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn remote_unsuccessful_is_failed() {
        let responder = Responder::remote(ScriptedBackend::new(Script::Reply(NegotiationResponse {
            success: false,
            message: Some("nope".into()),
            redirect_url: None,
        })));
        let outcome = responder.resolve(&request("hi")).await;
        assert!(matches!(outcome, ReplyOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn remote_hang_times_out() {
        let responder = Responder::remote(ScriptedBackend::new(Script::Hang))
            .with_timeout(Duration::from_millis(20));
        let outcome = responder.resolve(&request("hi")).await;
        assert_eq!(outcome, ReplyOutcome::TimedOut);
    }

    #[test]
    fn call_timeout_only_for_remote() {
        let canned = Responder::canned(DelayRange::immediate());
        assert_eq!(canned.call_timeout(), None);

        let backend = ScriptedBackend::new(Script::Hang);
        let remote = Responder::remote(backend).with_timeout(Duration::from_millis(250));
        assert_eq!(remote.call_timeout(), Some(Duration::from_millis(250)));
    }
}
