//! Plain-text rendering of the chat window.

use storechat_core::models::{ChatTurn, Sender};

pub const TITLE: &str = "Store Assistant";
pub const STATUS: &str = "Online • Available";
pub const PLACEHOLDER: &str = "Type your message here...";

pub fn header() -> String {
    format!("── {TITLE} ── {STATUS}\n   /discounts  /gifts  /cancel  /quit")
}

pub fn typing() -> String {
    format!("   {TITLE} is typing...")
}

/// `[HH:MM] Name: text`, continuation lines indented under the text.
pub fn turn(turn: &ChatTurn) -> String {
    format_turn(&turn.clock_label(), turn.sender, &turn.text)
}

fn format_turn(clock: &str, sender: Sender, text: &str) -> String {
    let name = match sender {
        Sender::User => "You",
        Sender::Bot => TITLE,
    };
    let prefix = format!("[{clock}] {name}: ");
    let indent = " ".repeat(prefix.chars().count());

    let mut out = String::new();
    for (i, line) in text.lines().enumerate() {
        if i == 0 {
            out.push_str(&prefix);
        } else {
            out.push('\n');
            out.push_str(&indent);
        }
        out.push_str(line);
    }
    if out.is_empty() {
        out.push_str(prefix.trim_end());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_user_turn() {
        assert_eq!(format_turn("09:15", Sender::User, "hi"), "[09:15] You: hi");
    }

    #[test]
    fn multi_line_bot_turn_is_indented() {
        let out = format_turn("09:15", Sender::Bot, "We offer:\n• A\n• B");
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "[09:15] Store Assistant: We offer:");
        assert!(lines[1].ends_with("• A"));
        assert_eq!(lines[1].len() - "• A".len(), "[09:15] Store Assistant: ".len());
    }

    #[test]
    fn renders_real_turn() {
        let t = ChatTurn::bot("hello");
        assert!(turn(&t).ends_with("Store Assistant: hello"));
    }
}
