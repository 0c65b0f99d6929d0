//! Airtable OAuth 2.0 authorization-code flow with PKCE (S256).
//!
//! Airtable requires a PKCE challenge on the authorize URL and the matching
//! verifier on the token request, alongside HTTP Basic client authentication.

use crate::exchange::read_token_response;
use hublink_config::ProviderConfig;
use hublink_types::{LinkError, Result};

/// Airtable OAuth authorization endpoint.
pub const AUTH_URL: &str = "https://airtable.com/oauth2/v1/authorize";

/// Airtable OAuth token endpoint.
pub const TOKEN_URL: &str = "https://airtable.com/oauth2/v1/token";

/// Default OAuth scopes requested during authorization.
pub const DEFAULT_SCOPE: &str = "data.records:read schema.bases:read";

fn token_url(cfg: &ProviderConfig) -> String {
    cfg.token_url
        .clone()
        .unwrap_or_else(|| TOKEN_URL.to_string())
}

/// Build the authorization URL carrying the encoded state payload and the
/// PKCE S256 challenge.
///
/// # Errors
///
/// Returns an error if the query string cannot be encoded.
pub fn build_authorize_url(
    cfg: &ProviderConfig,
    redirect_uri: &str,
    encoded_state: &str,
    code_challenge: &str,
) -> Result<String> {
    let scope = cfg.scope.as_deref().unwrap_or(DEFAULT_SCOPE);
    let query = serde_urlencoded::to_string([
        ("client_id", cfg.client_id.as_str()),
        ("redirect_uri", redirect_uri),
        ("response_type", "code"),
        ("scope", scope),
        ("state", encoded_state),
        ("code_challenge", code_challenge),
        ("code_challenge_method", "S256"),
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
    code_verifier: &str,
) -> Result<serde_json::Value> {
    let params = [
        ("grant_type", "authorization_code"),
        ("client_id", cfg.client_id.as_str()),
        ("redirect_uri", redirect_uri),
        ("code", code),
        ("code_verifier", code_verifier),
    ];
    let resp = http
        .post(token_url(cfg))
        .basic_auth(&cfg.client_id, Some(&cfg.client_secret))
        .header("Accept", "application/json")
        .form(&params)
        .send()
        .await?;
    read_token_response(resp).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> ProviderConfig {
        ProviderConfig {
            client_id: "at-id".into(),
            client_secret: "at-secret".into(),
            ..ProviderConfig::default()
        }
    }

    #[test]
    fn test_authorize_url_carries_pkce() {
        let url =
            build_authorize_url(&cfg(), "http://localhost/cb", "enc", "challenge123").unwrap();
        assert!(url.starts_with(AUTH_URL));
        assert!(url.contains("code_challenge=challenge123"));
        assert!(url.contains("code_challenge_method=S256"));
    }

    #[test]
    fn test_authorize_url_scope_is_encoded() {
        let url = build_authorize_url(&cfg(), "http://localhost/cb", "enc", "c").unwrap();
        // "data.records:read schema.bases:read" with ':' and ' ' escaped
        assert!(url.contains("scope=data.records%3Aread+schema.bases%3Aread"));
    }

    #[test]
    fn test_authorize_url_state() {
        let url = build_authorize_url(&cfg(), "http://localhost/cb", "enc-state", "c").unwrap();
        assert!(url.contains("state=enc-state"));
        assert!(url.contains("response_type=code"));
    }
}
