//! Notion OAuth 2.0 authorization-code flow.
//!
//! Notion has no scope parameter (access is chosen in its consent screen)
//! and expects a JSON token request authenticated with HTTP Basic.

use crate::exchange::read_token_response;
use hublink_config::ProviderConfig;
use hublink_types::{LinkError, Result};

/// Notion OAuth authorization endpoint.
pub const AUTH_URL: &str = "https://api.notion.com/v1/oauth/authorize";

/// Notion OAuth token endpoint.
pub const TOKEN_URL: &str = "https://api.notion.com/v1/oauth/token";

fn token_url(cfg: &ProviderConfig) -> String {
    cfg.token_url
        .clone()
        .unwrap_or_else(|| TOKEN_URL.to_string())
}

/// Build the authorization URL carrying the encoded state payload.
///
/// # Errors
///
/// Returns an error if the query string cannot be encoded.
pub fn build_authorize_url(
    cfg: &ProviderConfig,
    redirect_uri: &str,
    encoded_state: &str,
) -> Result<String> {
    let query = serde_urlencoded::to_string([
        ("client_id", cfg.client_id.as_str()),
        ("response_type", "code"),
        ("owner", "user"),
        ("redirect_uri", redirect_uri),
        ("state", encoded_state),
    ])
    .map_err(|e| LinkError::Config(format!("failed to encode authorize query: {e}")))?;
    Ok(format!("{AUTH_URL}?{query}"))
}

/// Exchange an authorization code for the raw token-endpoint JSON response.
///
/// # Errors
///
/// Returns [`LinkError::Exchange`] on a non-success response and
/// [`LinkError::Http`] on transport failure.
pub async fn exchange_code(
    http: &reqwest::Client,
    cfg: &ProviderConfig,
    redirect_uri: &str,
    code: &str,
) -> Result<serde_json::Value> {
    let body = serde_json::json!({
        "grant_type": "authorization_code",
        "code": code,
        "redirect_uri": redirect_uri,
    });
    let resp = http
        .post(token_url(cfg))
        .basic_auth(&cfg.client_id, Some(&cfg.client_secret))
        .header("Accept", "application/json")
        .json(&body)
        .send()
        .await?;
    read_token_response(resp).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> ProviderConfig {
        ProviderConfig {
            client_id: "no-id".into(),
            client_secret: "no-secret".into(),
            ..ProviderConfig::default()
        }
    }

    #[test]
    fn test_authorize_url_shape() {
        let url = build_authorize_url(&cfg(), "http://localhost/cb", "enc").unwrap();
        assert!(url.starts_with(AUTH_URL));
        assert!(url.contains("client_id=no-id"));
        assert!(url.contains("owner=user"));
        assert!(url.contains("state=enc"));
    }

    #[test]
    fn test_authorize_url_has_no_scope() {
        let url = build_authorize_url(&cfg(), "http://localhost/cb", "enc").unwrap();
        assert!(!url.contains("scope="));
    }
}
