//! HTTP request handlers for the integration endpoints.

use crate::{AppState, error::ApiError};
use axum::{
    Form, Json,
    extract::{Path, Query, State},
    response::Html,
};
use hublink_types::ProviderId;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Minimal page returned to the popup window once the callback completes.
const CLOSE_WINDOW_HTML: &str = "<html><script>window.close();</script></html>";

/// Caller identity carried by the browser app on every non-callback request.
#[derive(Debug, Deserialize)]
pub struct CallerIdentity {
    pub user_id: String,
    pub org_id: String,
}

fn parse_provider(provider: &str) -> Result<ProviderId, ApiError> {
    provider.parse::<ProviderId>().map_err(ApiError::from)
}

/// `POST /integrations/{provider}/authorize` — start an authorization cycle
/// and return the provider URL the browser should open.
pub async fn authorize(
    State(state): State<Arc<AppState>>,
    Path(provider): Path<String>,
    Form(caller): Form<CallerIdentity>,
) -> Result<Json<String>, ApiError> {
    let provider = parse_provider(&provider)?;
    tracing::info!(%provider, user_id = caller.user_id, org_id = caller.org_id, "authorize requested");
    let flow = state.flow(provider)?;
    let url = flow.authorize(&caller.user_id, &caller.org_id).await?;
    Ok(Json(url))
}

/// `GET /integrations/{provider}/oauth2callback` — the provider redirect
/// target. Validates state, exchanges the code, parks the credentials, and
/// closes the popup. No credential material reaches the browser.
pub async fn oauth2_callback(
    State(state): State<Arc<AppState>>,
    Path(provider): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<&'static str>, ApiError> {
    let provider = parse_provider(&provider)?;
    let flow = state.flow(provider)?;
    flow.handle_callback(&params).await?;
    Ok(Html(CLOSE_WINDOW_HTML))
}

/// `POST /integrations/{provider}/credentials` — one-time credential pickup,
/// polled by the browser app after it opened the authorize URL.
pub async fn credentials(
    State(state): State<Arc<AppState>>,
    Path(provider): Path<String>,
    Form(caller): Form<CallerIdentity>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let provider = parse_provider(&provider)?;
    let flow = state.flow(provider)?;
    let credentials = flow.take_credentials(&caller.user_id, &caller.org_id).await?;
    Ok(Json(credentials))
}

/// `POST /integrations/{provider}/items` — fetch the normalized item list.
/// The body is the credential blob obtained from the pickup endpoint,
/// either as the JSON object or as a raw JSON string.
pub async fn items(
    State(state): State<Arc<AppState>>,
    Path(provider): Path<String>,
    Json(credentials): Json<serde_json::Value>,
) -> Result<Json<Vec<hublink_types::IntegrationItem>>, ApiError> {
    let provider = parse_provider(&provider)?;
    let api_base = state
        .config
        .provider(provider)
        .and_then(|p| p.api_base.clone());
    let items = hublink_connectors::fetch_items(
        provider,
        &state.http,
        api_base.as_deref(),
        &credentials,
    )
    .await?;
    Ok(Json(items))
}
