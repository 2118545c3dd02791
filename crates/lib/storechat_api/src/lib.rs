//! # storechat_api
//!
//! HTTP API library for Storechat: the Visit Notifier route and a health probe.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::{health, visit};

/// Route paths.
pub mod routes {
    pub const GET_API_HEALTH: &str = "/api/health";
    pub const POST_API_CHATBOT_URL: &str = "/api/chatbot/url";
}

/// Builds the Axum router with all routes.
///
/// Handlers are stateless; the listen address in [`config::ApiConfig`] is
/// consumed by the server binary.
pub fn router() -> Router {
    // The widget is embedded in storefront pages served from other origins.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(routes::GET_API_HEALTH, get(health::health_handler))
        .route(routes::POST_API_CHATBOT_URL, post(visit::visit_handler))
        .layer(cors)
}
