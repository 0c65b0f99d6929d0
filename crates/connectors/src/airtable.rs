//! Airtable base and table listing.
//!
//! Two levels: one page of bases from the metadata API, then the tables of
//! each base with `parent_id` pointing at the base. The metadata API exposes
//! no timestamps.

use crate::read_api_response;
use hublink_types::{IntegrationItem, Result};
use serde_json::Value;

/// Airtable API host.
pub const API_BASE: &str = "https://api.airtable.com";

/// Fetch one page of bases and their tables.
///
/// # Errors
///
/// Returns [`hublink_types::LinkError::Fetch`] on any non-success response;
/// no partial results are returned.
pub async fn fetch_items(
    http: &reqwest::Client,
    base: &str,
    access_token: &str,
) -> Result<Vec<IntegrationItem>> {
    let resp = http
        .get(format!("{base}/v0/meta/bases"))
        .bearer_auth(access_token)
        .send()
        .await?;
    let data = read_api_response(resp).await?;

    let empty = Vec::new();
    let bases = data.get("bases").and_then(Value::as_array).unwrap_or(&empty);

    let mut items = Vec::new();
    for record in bases {
        let Some(base_id) = record.get("id").and_then(Value::as_str) else {
            continue;
        };
        let name = record
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(base_id);
        items.push(IntegrationItem::new(base_id, "base", name));

        let resp = http
            .get(format!("{base}/v0/meta/bases/{base_id}/tables"))
            .bearer_auth(access_token)
            .send()
            .await?;
        let tables = read_api_response(resp).await?;
        for table in tables
            .get("tables")
            .and_then(Value::as_array)
            .unwrap_or(&empty)
        {
            let Some(table_id) = table.get("id").and_then(Value::as_str) else {
                continue;
            };
            let table_name = table
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or(table_id);
            items.push(
                IntegrationItem::new(table_id, "table", table_name).with_parent(base_id),
            );
        }
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_items_bases_and_tables() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v0/meta/bases")
            .match_header("authorization", "Bearer tok")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"bases":[{"id":"app1","name":"CRM"}]}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/v0/meta/bases/app1/tables")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"tables":[{"id":"tbl1","name":"Contacts"},{"id":"tbl2","name":"Deals"}]}"#)
            .create_async()
            .await;

        let items = fetch_items(&reqwest::Client::new(), &server.url(), "tok")
            .await
            .unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].item_type, "base");
        assert_eq!(items[0].name, "CRM");
        assert!(items[0].parent_id.is_none());
        assert_eq!(items[1].item_type, "table");
        assert_eq!(items[1].parent_id.as_deref(), Some("app1"));
        assert_eq!(items[2].name, "Deals");
    }

    #[tokio::test]
    async fn test_fetch_items_empty_account() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v0/meta/bases")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"bases":[]}"#)
            .create_async()
            .await;

        let items = fetch_items(&reqwest::Client::new(), &server.url(), "tok")
            .await
            .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_items_table_failure_returns_no_partial_results() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v0/meta/bases")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"bases":[{"id":"app1","name":"CRM"}]}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/v0/meta/bases/app1/tables")
            .with_status(403)
            .with_body("insufficient scope")
            .create_async()
            .await;

        let err = fetch_items(&reqwest::Client::new(), &server.url(), "tok")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("insufficient scope"));
    }
}
