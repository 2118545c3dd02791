//! Chat turns.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::uuid::turn_id;

/// Who wrote a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One message in the conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl ChatTurn {
    fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: turn_id(),
            text: text.into(),
            sender,
            timestamp: Utc::now(),
        }
    }

    /// A turn typed by the shopper.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User)
    }

    /// A turn produced by the assistant.
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Bot)
    }

    pub fn is_bot(&self) -> bool {
        self.sender == Sender::Bot
    }

    /// Local wall-clock time as `HH:MM`, the way the chat window labels turns.
    pub fn clock_label(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%H:%M")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sender::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Sender::Bot).unwrap(), "\"bot\"");
    }

    #[test]
    fn constructors_tag_sender() {
        assert_eq!(ChatTurn::user("hi").sender, Sender::User);
        assert!(ChatTurn::bot("hello").is_bot());
    }

    #[test]
    fn turns_get_distinct_ids() {
        let a = ChatTurn::user("one");
        let b = ChatTurn::user("one");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn clock_label_is_hours_and_minutes() {
        let label = ChatTurn::bot("x").clock_label();
        assert_eq!(label.len(), 5);
        assert_eq!(&label[2..3], ":");
    }
}
