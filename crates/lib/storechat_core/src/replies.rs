//! Canned replies chosen by keyword match.
//!
//! Rules are checked in order against the lowercased input and the first
//! rule with a matching substring wins.

/// Welcome turns seeded into a fresh canned-variant widget.
pub const WELCOME: &str = "👋 Hello! Welcome! I'm here to help you with any questions.";
pub const WELCOME_OFFER: &str =
    "🎁 Special Offer: Get 20% off your first order with code WELCOME20!";
pub const WELCOME_GIFT: &str = "💝 Free gift with orders over $50! Limited time only.";

pub const PROMO: &str = "🎉 Great question! We have several ongoing offers:\n• 20% off new customers (WELCOME20)\n• 15% off orders over $100 (SAVE15)\n• Free shipping on orders over $75\n\nWould you like me to help you apply one of these?";
pub const GIFT: &str = "🎁 Yes! We're currently offering a free mystery gift with every order over $50. The gift changes monthly and is always a surprise!";
pub const SHIPPING: &str = "🚚 We offer:\n• Free shipping on orders over $75\n• Standard shipping: $5.99 (3-5 business days)\n• Express shipping: $12.99 (1-2 business days)\n• Same-day delivery available in select areas";
pub const RETURNS: &str = "✅ We have a 30-day return policy for all items. Returns are free and easy - just contact our customer service team and we'll help you process your return.";
pub const HELP: &str = "🤝 I'm here to help! You can ask me about:\n• Products and availability\n• Discounts and promotions\n• Shipping and returns\n• Order status\n• General questions\n\nOr type \"human\" to speak with our team!";
pub const HANDOFF: &str = "👨‍💼 I'll connect you with our customer service team right away. They'll be with you in just a moment. In the meantime, is there anything else I can help you with?";
pub const FALLBACK: &str = "Thanks for your message! Our team will review it and get back to you soon. In the meantime, feel free to browse our latest products or ask me about our current offers!";

/// Shown when the negotiation call fails or times out.
pub const APOLOGY: &str =
    "Sorry, I'm having trouble reaching our pricing team right now. Please try again in a moment.";

/// Seeded when no price quote is available for the page.
pub const GENERIC_GREETING: &str = WELCOME;

/// Greeting seeded when the page's price is known.
pub fn price_greeting(title: &str, currency: &str, price: &str) -> String {
    format!(
        "👋 Hi! I see you're looking at {title}, currently {currency} {price}. Ask me anything, or make me an offer!"
    )
}

/// What a message is about, in rule priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Promotions,
    Gifts,
    Shipping,
    Returns,
    Help,
    Handoff,
    Other,
}

const RULES: &[(Topic, &[&str])] = &[
    (Topic::Promotions, &["discount", "sale", "offer"]),
    (Topic::Gifts, &["gift", "free"]),
    (Topic::Shipping, &["shipping", "delivery"]),
    (Topic::Returns, &["return", "refund"]),
    (Topic::Help, &["help", "support"]),
    (Topic::Handoff, &["human", "agent", "team"]),
];

impl Topic {
    /// The canned reply for this topic.
    pub fn reply(self) -> &'static str {
        match self {
            Topic::Promotions => PROMO,
            Topic::Gifts => GIFT,
            Topic::Shipping => SHIPPING,
            Topic::Returns => RETURNS,
            Topic::Help => HELP,
            Topic::Handoff => HANDOFF,
            Topic::Other => FALLBACK,
        }
    }
}

/// Classify `input` by the first rule whose keyword it contains.
pub fn classify(input: &str) -> Topic {
    let input = input.to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| input.contains(k)))
        .map(|(topic, _)| *topic)
        .unwrap_or(Topic::Other)
}

/// Canned reply text for `input`.
pub fn canned_reply(input: &str) -> &'static str {
    classify(input).reply()
}
