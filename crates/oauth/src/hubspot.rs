//! HubSpot OAuth 2.0 authorization-code flow.
//!
//! Standard confidential-client exchange: the client secret travels in the
//! form body of the token request.

use crate::exchange::read_token_response;
use hublink_config::ProviderConfig;
use hublink_types::{LinkError, Result};

/// HubSpot OAuth authorization endpoint.
pub const AUTH_URL: &str = "https://app.hubspot.com/oauth/authorize";

/// HubSpot OAuth token endpoint.
pub const TOKEN_URL: &str = "https://api.hubapi.com/oauth/v1/token";

// Scopes must match the HubSpot app settings.

/// Default OAuth scopes requested during authorization.
pub const DEFAULT_SCOPE: &str = "crm.objects.contacts.read crm.objects.contacts.write crm.schemas.contacts.read crm.schemas.contacts.write";

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
    let scope = cfg.scope.as_deref().unwrap_or(DEFAULT_SCOPE);
    let query = serde_urlencoded::to_string([
        ("client_id", cfg.client_id.as_str()),
        ("redirect_uri", redirect_uri),
        ("scope", scope),
        ("response_type", "code"),
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
    let params = [
        ("grant_type", "authorization_code"),
        ("client_id", cfg.client_id.as_str()),
        ("client_secret", cfg.client_secret.as_str()),
        ("redirect_uri", redirect_uri),
        ("code", code),
    ];
    let resp = http
        .post(token_url(cfg))
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
            client_id: "hs-id".into(),
            client_secret: "hs-secret".into(),
            ..ProviderConfig::default()
        }
    }

    #[test]
    fn test_authorize_url_shape() {
        let url = build_authorize_url(&cfg(), "http://localhost:8000/cb", "encoded123").unwrap();
        assert!(url.starts_with(AUTH_URL));
        assert!(url.contains("client_id=hs-id"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("state=encoded123"));
    }

    #[test]
    fn test_authorize_url_encodes_redirect() {
        let url = build_authorize_url(&cfg(), "http://localhost:8000/cb", "s").unwrap();
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8000%2Fcb"));
    }

    #[test]
    fn test_authorize_url_default_scope() {
        let url = build_authorize_url(&cfg(), "http://localhost/cb", "s").unwrap();
        assert!(url.contains("crm.objects.contacts.read"));
    }

    #[test]
    fn test_authorize_url_scope_override() {
        let mut c = cfg();
        c.scope = Some("crm.objects.deals.read".into());
        let url = build_authorize_url(&c, "http://localhost/cb", "s").unwrap();
        assert!(url.contains("crm.objects.deals.read"));
        assert!(!url.contains("contacts"));
    }

    #[test]
    fn test_token_url_override() {
        let mut c = cfg();
        assert_eq!(token_url(&c), TOKEN_URL);
        c.token_url = Some("http://127.0.0.1:9999/token".into());
        assert_eq!(token_url(&c), "http://127.0.0.1:9999/token");
    }
}
