//! Per-provider item fetchers.
//!
//! Each sub-module reads one page of records from its provider's data API
//! using bearer authentication and maps them into [`IntegrationItem`]s. No
//! retries, no pagination: a single best-effort read capped at a bounded
//! page size, surfacing the upstream error body on failure.

pub mod airtable;
pub mod hubspot;
pub mod notion;

use hublink_types::{IntegrationItem, LinkError, ProviderId, Result};

/// Extract the access token from a credential blob.
///
/// Accepts either the pre-parsed token-endpoint JSON object or a raw
/// JSON-encoded string of it (callers that forward the pickup response
/// verbatim send the latter).
///
/// # Errors
///
/// Returns [`LinkError::Validation`] if the blob is not JSON or carries no
/// `access_token`.
pub fn access_token_from(credentials: &serde_json::Value) -> Result<String> {
    let parsed;
    let obj = match credentials {
        serde_json::Value::String(raw) => {
            parsed = serde_json::from_str::<serde_json::Value>(raw)
                .map_err(|_| LinkError::Validation("Invalid credentials JSON.".to_string()))?;
            &parsed
        }
        other => other,
    };
    obj.get("access_token")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| LinkError::Validation("No access token provided.".to_string()))
}

/// Fetch and normalize items from `provider`.
///
/// `api_base` overrides the provider's default API host (sandbox/tests).
///
/// # Errors
///
/// Returns [`LinkError::Validation`] for unusable credentials,
/// [`LinkError::Fetch`] for a non-success API response, and
/// [`LinkError::Http`] for transport failures.
pub async fn fetch_items(
    provider: ProviderId,
    http: &reqwest::Client,
    api_base: Option<&str>,
    credentials: &serde_json::Value,
) -> Result<Vec<IntegrationItem>> {
    let access_token = access_token_from(credentials)?;
    let items = match provider {
        ProviderId::Hubspot => {
            hubspot::fetch_items(http, api_base.unwrap_or(hubspot::API_BASE), &access_token).await?
        }
        ProviderId::Airtable => {
            airtable::fetch_items(http, api_base.unwrap_or(airtable::API_BASE), &access_token)
                .await?
        }
        ProviderId::Notion => {
            notion::fetch_items(http, api_base.unwrap_or(notion::API_BASE), &access_token).await?
        }
    };
    tracing::debug!(provider = %provider, count = items.len(), "fetched items");
    Ok(items)
}

/// Read a data-API response: non-success statuses become
/// [`LinkError::Fetch`] carrying the upstream body.
pub(crate) async fn read_api_response(resp: reqwest::Response) -> Result<serde_json::Value> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(LinkError::Fetch {
            status: status.as_u16(),
            body,
        });
    }
    let json = resp.json::<serde_json::Value>().await.map_err(|e| {
        LinkError::Fetch {
            status: status.as_u16(),
            body: format!("unparseable response: {e}"),
        }
    })?;
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_access_token_from_object() {
        let creds = json!({"access_token": "tok123", "expires_in": 1800});
        assert_eq!(access_token_from(&creds).unwrap(), "tok123");
    }

    #[test]
    fn test_access_token_from_raw_string() {
        let creds = json!(r#"{"access_token":"tok123"}"#);
        assert_eq!(access_token_from(&creds).unwrap(), "tok123");
    }

    #[test]
    fn test_access_token_missing() {
        let err = access_token_from(&json!({"refresh_token": "r"})).unwrap_err();
        assert!(err.to_string().contains("No access token provided."));
    }

    #[test]
    fn test_access_token_invalid_raw_string() {
        let err = access_token_from(&json!("not json at all")).unwrap_err();
        assert!(err.to_string().contains("Invalid credentials JSON."));
    }
}
