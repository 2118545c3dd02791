//! Conversation widget state.
//!
//! [`Widget`] owns the turn list, the input buffer and the pending-reply
//! slot. All mutation goes through the methods here; resolving a reply
//! happens elsewhere (see [`crate::session`]) and is handed back through
//! [`Widget::complete`] together with the [`ReplyToken`] issued by
//! [`Widget::submit`].

use tracing::debug;

use crate::models::{ChatTurn, NegotiationRequest, PriceQuote};
use crate::replies;

/// Identifies one submission awaiting its reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReplyToken(u64);

impl ReplyToken {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Work handed to a responder after a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyRequest {
    pub token: ReplyToken,
    pub text: String,
    /// Quote known at submit time, used to build the negotiation call.
    pub quote: Option<PriceQuote>,
}

impl ReplyRequest {
    pub fn negotiation(&self) -> NegotiationRequest {
        NegotiationRequest::new(self.text.clone(), self.quote.as_ref())
    }
}

/// How a pending reply was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    Canned(String),
    Negotiated {
        message: String,
        redirect_url: Option<String>,
    },
    Failed(String),
    TimedOut,
}

/// Shortcut buttons under the input box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    Discounts,
    FreeGifts,
}

impl QuickAction {
    pub fn prompt(self) -> &'static str {
        match self {
            QuickAction::Discounts => "What discounts do you have?",
            QuickAction::FreeGifts => "Tell me about free gifts",
        }
    }
}

/// State of one chat widget instance.
#[derive(Debug, Default)]
pub struct Widget {
    turns: Vec<ChatTurn>,
    input: String,
    pending: Option<ReplyToken>,
    next_token: u64,
    quote: Option<PriceQuote>,
    redirect_url: Option<String>,
    open: bool,
}

impl Widget {
    /// An empty widget with no seeded turns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Canned variant: welcome message followed by the two standing offers.
    pub fn with_offers() -> Self {
        let mut widget = Self::new();
        widget.turns = vec![
            ChatTurn::bot(replies::WELCOME),
            ChatTurn::bot(replies::WELCOME_OFFER),
            ChatTurn::bot(replies::WELCOME_GIFT),
        ];
        widget
    }

    /// Remote variant: seed a single greeting. With a quote the greeting
    /// names the product and its price and the quote is kept for later
    /// negotiation calls; without one a generic greeting is used.
    pub fn greet(quote: Option<PriceQuote>) -> Self {
        let mut widget = Self::new();
        let text = match &quote {
            Some(q) => replies::price_greeting(&q.title, &q.currency, &q.price),
            None => replies::GENERIC_GREETING.to_string(),
        };
        widget.turns.push(ChatTurn::bot(text));
        widget.quote = quote;
        widget
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the input buffer. Allowed while a reply is pending.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Fill the input buffer with a quick action's prompt.
    pub fn quick_action(&mut self, action: QuickAction) {
        self.set_input(action.prompt());
    }

    /// True while a reply is pending.
    pub fn is_typing(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<ReplyToken> {
        self.pending
    }

    pub fn quote(&self) -> Option<&PriceQuote> {
        self.quote.as_ref()
    }

    /// Redirect suggested by the last negotiation reply. Never followed.
    pub fn redirect_url(&self) -> Option<&str> {
        self.redirect_url.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Whether a submit of the current buffer would be accepted.
    pub fn can_submit(&self) -> bool {
        !self.input.trim().is_empty() && !self.is_typing()
    }

    /// Submit `text` as the shopper's message.
    ///
    /// Returns `None` (and changes nothing) when `text` is blank or a reply
    /// is already pending. Otherwise the user turn is appended, the input
    /// buffer cleared, and the returned request must eventually be
    /// answered through [`Widget::complete`] or dropped with
    /// [`Widget::cancel`].
    pub fn submit(&mut self, text: &str) -> Option<ReplyRequest> {
        if text.trim().is_empty() || self.is_typing() {
            return None;
        }

        self.next_token += 1;
        let token = ReplyToken(self.next_token);

        self.turns.push(ChatTurn::user(text));
        self.input.clear();
        self.pending = Some(token);
        debug!(token = token.get(), "reply pending");

        Some(ReplyRequest {
            token,
            text: text.to_string(),
            quote: self.quote.clone(),
        })
    }

    /// Submit whatever is in the input buffer.
    pub fn submit_input(&mut self) -> Option<ReplyRequest> {
        let text = self.input.clone();
        self.submit(&text)
    }

    /// Apply the outcome for `token`.
    ///
    /// Returns the appended bot turn, or `None` if `token` is not the
    /// pending one (the reply was cancelled or superseded).
    pub fn complete(&mut self, token: ReplyToken, outcome: ReplyOutcome) -> Option<&ChatTurn> {
        if self.pending != Some(token) {
            debug!(token = token.get(), "ignoring stale reply");
            return None;
        }
        self.pending = None;

        let text = match outcome {
            ReplyOutcome::Canned(text) => text,
            ReplyOutcome::Negotiated {
                message,
                redirect_url,
            } => {
                if redirect_url.is_some() {
                    self.redirect_url = redirect_url;
                }
                message
            }
            ReplyOutcome::Failed(_) | ReplyOutcome::TimedOut => replies::APOLOGY.to_string(),
        };

        self.turns.push(ChatTurn::bot(text));
        self.turns.last()
    }

    /// Drop the pending reply, if any, without appending a turn.
    pub fn cancel(&mut self) -> Option<ReplyToken> {
        self.pending.take()
    }
}
