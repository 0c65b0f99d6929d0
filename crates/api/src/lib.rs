//! HTTP layer — axum router, route handlers, and error mapping.
//!
//! Exposes the four integration endpoints per provider:
//! authorize, oauth2callback, credentials (one-time pickup), and items.

mod error;
mod handlers;

pub use error::ApiError;

use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use hublink_config::Config;
use hublink_oauth::OAuthFlow;
use hublink_types::{EphemeralStore, ProviderId, Result};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Shared application state passed to all route handlers.
pub struct AppState {
    /// Application configuration, fixed for the process lifetime.
    pub config: Arc<Config>,
    /// Ephemeral store coordinating the authorize → callback → pickup
    /// handoff across requests.
    pub store: Arc<dyn EphemeralStore>,
    /// HTTP client for provider token endpoints and data APIs.
    pub http: reqwest::Client,
}

impl AppState {
    /// Creates a new shared application state wrapped in an `Arc`.
    pub fn new(config: Config, store: Arc<dyn EphemeralStore>) -> Arc<Self> {
        Arc::new(Self {
            config: Arc::new(config),
            store,
            http: reqwest::Client::new(),
        })
    }

    /// Build the OAuth flow for `provider` from this state.
    ///
    /// # Errors
    ///
    /// Returns [`hublink_types::LinkError::Config`] if the provider is not
    /// configured.
    pub fn flow(&self, provider: ProviderId) -> Result<OAuthFlow> {
        OAuthFlow::from_config(&self.config, provider, self.store.clone(), self.http.clone())
    }
}

/// Build the full axum router.
///
/// Routes, for `{provider}` in `hubspot` / `airtable` / `notion`:
/// - POST /integrations/{provider}/authorize
/// - GET  /integrations/{provider}/oauth2callback
/// - POST /integrations/{provider}/credentials
/// - POST /integrations/{provider}/items
pub fn make_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors_origins);
    Router::new()
        .route("/integrations/{provider}/authorize", post(handlers::authorize))
        .route(
            "/integrations/{provider}/oauth2callback",
            get(handlers::oauth2_callback),
        )
        .route(
            "/integrations/{provider}/credentials",
            post(handlers::credentials),
        )
        .route("/integrations/{provider}/items", post(handlers::items))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods(Any)
        .allow_headers(Any)
}
