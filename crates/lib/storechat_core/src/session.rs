//! Session driver: one widget, one responder, at most one reply in flight.
//!
//! [`ChatSession`] owns the [`Widget`] outright. Reply resolution runs on a
//! spawned task guarded by a [`CancellationToken`]; the finished outcome is
//! sent back over a channel tagged with its [`ReplyToken`] and applied by
//! [`ChatSession::next_reply`], so the widget is only ever mutated by its
//! owner.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use crate::backend::{Backend, notify_visit};
use crate::config::DEFAULT_REPLY_TIMEOUT;
use crate::models::{ChatTurn, PriceQuote, VisitMetadata};
use crate::responder::Responder;
use crate::widget::{QuickAction, ReplyOutcome, ReplyToken, Widget};

/// Page context for a remote session.
#[derive(Debug, Clone)]
pub struct PageVisit {
    pub metadata: VisitMetadata,
    /// Local Visit Notifier route to report the visit to, if any.
    pub notifier_url: Option<Url>,
}

impl PageVisit {
    pub fn new(metadata: VisitMetadata) -> Self {
        Self {
            metadata,
            notifier_url: None,
        }
    }

    pub fn with_notifier(mut self, url: Url) -> Self {
        self.notifier_url = Some(url);
        self
    }
}

struct InFlight {
    token: ReplyToken,
    cancel: CancellationToken,
}

/// A running chat session.
pub struct ChatSession {
    widget: Widget,
    responder: Arc<Responder>,
    in_flight: Option<InFlight>,
    tx: mpsc::UnboundedSender<(ReplyToken, ReplyOutcome)>,
    rx: mpsc::UnboundedReceiver<(ReplyToken, ReplyOutcome)>,
}

impl ChatSession {
    /// Wrap an already-seeded widget.
    pub fn new(widget: Widget, responder: Responder) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            widget,
            responder: Arc::new(responder),
            in_flight: None,
            tx,
            rx,
        }
    }

    /// Canned session seeded with the welcome and offer turns.
    pub fn canned(responder: Responder) -> Self {
        Self::new(Widget::with_offers(), responder)
    }

    /// Remote session: report the visit, look up the page's price, and seed
    /// the greeting from it. Any failure along the way falls back to the
    /// generic greeting.
    ///
    /// Both calls are bounded by the responder's call timeout.
    pub async fn open_remote(
        backend: Arc<dyn Backend>,
        visit: &PageVisit,
        responder: Responder,
    ) -> Self {
        let limit = responder.call_timeout().unwrap_or(DEFAULT_REPLY_TIMEOUT);

        if let Some(url) = &visit.notifier_url {
            match timeout(limit, notify_visit(&Client::new(), url, &visit.metadata)).await {
                Ok(Ok(ack)) => debug!(received_at = ?ack.received_at, "visit acknowledged"),
                Ok(Err(e)) => warn!("visit notification failed: {e}"),
                Err(_) => warn!(?limit, "visit notification timed out"),
            }
        }

        let quote = fetch_quote(backend.as_ref(), &visit.metadata, limit).await;
        Self::new(Widget::greet(quote), responder)
    }

    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut Widget {
        &mut self.widget
    }

    pub fn turns(&self) -> &[ChatTurn] {
        self.widget.turns()
    }

    pub fn is_typing(&self) -> bool {
        self.widget.is_typing()
    }

    pub fn quick_action(&mut self, action: QuickAction) {
        self.widget.quick_action(action);
    }

    /// Submit `text`. Returns the reply token when accepted.
    pub fn submit(&mut self, text: &str) -> Option<ReplyToken> {
        let request = self.widget.submit(text)?;
        let token = request.token;
        let cancel = CancellationToken::new();

        let responder = self.responder.clone();
        let tx = self.tx.clone();
        let guard = cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = guard.cancelled() => {
                    debug!(token = token.get(), "reply task cancelled");
                }
                outcome = responder.resolve(&request) => {
                    let _ = tx.send((token, outcome));
                }
            }
        });

        self.in_flight = Some(InFlight { token, cancel });
        Some(token)
    }

    /// Submit the widget's input buffer.
    pub fn submit_input(&mut self) -> Option<ReplyToken> {
        let text = self.widget.input().to_string();
        self.submit(&text)
    }

    /// Wait for the in-flight reply and append it.
    ///
    /// Returns `None` immediately when nothing is pending.
    pub async fn next_reply(&mut self) -> Option<&ChatTurn> {
        let pending = self.in_flight.as_ref()?.token;
        loop {
            let (token, outcome) = self.rx.recv().await?;
            if token != pending {
                debug!(token = token.get(), "dropping outcome of superseded reply");
                continue;
            }
            self.in_flight = None;
            return self.widget.complete(token, outcome);
        }
    }

    /// Abandon the in-flight reply. The typing flag is cleared and no bot
    /// turn is appended.
    pub fn cancel(&mut self) -> Option<ReplyToken> {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.cancel.cancel();
        }
        self.widget.cancel()
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.cancel.cancel();
        }
    }
}

async fn fetch_quote(
    backend: &dyn Backend,
    visit: &VisitMetadata,
    limit: Duration,
) -> Option<PriceQuote> {
    match timeout(limit, backend.price(visit)).await {
        Ok(Ok(resp)) => {
            let handle = resp.product_handle.clone();
            let quote = resp.into_quote();
            match &quote {
                Some(q) => info!(
                    product = ?handle,
                    title = %q.title,
                    price = %q.price,
                    "price quote loaded"
                ),
                None => warn!("price payload malformed or unsuccessful"),
            }
            quote
        }
        Ok(Err(e)) => {
            warn!("price lookup failed: {e}");
            None
        }
        Err(_) => {
            warn!(?limit, "price lookup timed out");
            None
        }
    }
}
