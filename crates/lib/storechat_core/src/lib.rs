//! # storechat_core
//!
//! Core domain logic for Storechat: the conversation widget, its canned
//! reply rules, and the client for the external price/negotiation backend.

pub mod backend;
pub mod config;
pub mod models;
pub mod replies;
pub mod responder;
pub mod session;
pub mod uuid;
pub mod widget;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
