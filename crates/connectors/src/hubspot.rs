//! HubSpot contact listing.

use crate::read_api_response;
use hublink_types::{IntegrationItem, Result};
use serde_json::Value;

/// HubSpot API host.
pub const API_BASE: &str = "https://api.hubapi.com";

/// Maximum contacts read in the single page.
pub const PAGE_LIMIT: u32 = 100;

/// Fetch one page of CRM contacts and map them into items.
///
/// # Errors
///
/// Returns [`hublink_types::LinkError::Fetch`] on a non-success response.
pub async fn fetch_items(
    http: &reqwest::Client,
    base: &str,
    access_token: &str,
) -> Result<Vec<IntegrationItem>> {
    let resp = http
        .get(format!("{base}/crm/v3/objects/contacts"))
        .bearer_auth(access_token)
        .query(&[("limit", PAGE_LIMIT.to_string())])
        .send()
        .await?;
    let data = read_api_response(resp).await?;

    let empty = Vec::new();
    let results = data
        .get("results")
        .and_then(Value::as_array)
        .unwrap_or(&empty);
    Ok(results.iter().map(map_contact).collect())
}

/// Map one contact record. Display name falls back through full name →
/// email → record id.
fn map_contact(record: &Value) -> IntegrationItem {
    let id = record
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let props = record.get("properties").cloned().unwrap_or(Value::Null);

    let first = props
        .get("firstname")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let last = props
        .get("lastname")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let email = props
        .get("email")
        .and_then(Value::as_str)
        .unwrap_or_default();

    let full = format!("{first} {last}").trim().to_string();
    let name = if !full.is_empty() {
        full
    } else if !email.is_empty() {
        email.to_string()
    } else {
        id.clone()
    };

    let created = record
        .get("createdAt")
        .and_then(Value::as_str)
        .map(String::from)
        .or_else(|| {
            props
                .get("createdate")
                .and_then(Value::as_str)
                .map(String::from)
        });
    let updated = record
        .get("updatedAt")
        .and_then(Value::as_str)
        .map(String::from);

    IntegrationItem::new(id, "contact", name).with_times(created, updated)
}
