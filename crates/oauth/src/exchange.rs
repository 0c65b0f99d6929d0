//! Shared handling of token-endpoint responses.

use hublink_types::{LinkError, Result};

/// Read a token-endpoint response: non-success statuses become
/// [`LinkError::Exchange`] carrying the upstream body, success bodies are
/// parsed as JSON and returned verbatim.
pub(crate) async fn read_token_response(resp: reqwest::Response) -> Result<serde_json::Value> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(LinkError::Exchange {
            status: status.as_u16(),
            body,
        });
    }
    let json = resp.json::<serde_json::Value>().await.map_err(|e| {
        LinkError::Exchange {
            status: status.as_u16(),
            body: format!("unparseable token response: {e}"),
        }
    })?;
    Ok(json)
}
