//! Notion page and database listing via the search API.

use crate::read_api_response;
use hublink_types::{IntegrationItem, Result};
use serde_json::Value;

/// Notion API host.
pub const API_BASE: &str = "https://api.notion.com";

/// API version header required on every Notion request.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Maximum results read in the single search page.
pub const PAGE_LIMIT: u32 = 100;

/// Fetch one page of search results (pages and databases) and map them.
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
        .post(format!("{base}/v1/search"))
        .bearer_auth(access_token)
        .header("Notion-Version", NOTION_VERSION)
        .json(&serde_json::json!({ "page_size": PAGE_LIMIT }))
        .send()
        .await?;
    let data = read_api_response(resp).await?;

    let empty = Vec::new();
    let results = data
        .get("results")
        .and_then(Value::as_array)
        .unwrap_or(&empty);
    Ok(results.iter().map(map_result).collect())
}

/// Map one search result. The type tag comes from Notion's `object` field
/// (`"page"` or `"database"`); the name from the title, falling back to the
/// result id.
fn map_result(record: &Value) -> IntegrationItem {
    let id = record
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let object = record
        .get("object")
        .and_then(Value::as_str)
        .unwrap_or("page");
    let name = extract_title(record).unwrap_or_else(|| id.clone());

    let created = record
        .get("created_time")
        .and_then(Value::as_str)
        .map(String::from);
    let updated = record
        .get("last_edited_time")
        .and_then(Value::as_str)
        .map(String::from);

    let mut item = IntegrationItem::new(id, object, name).with_times(created, updated);
    if let Some(parent_id) = parent_id_of(record) {
        item = item.with_parent(parent_id);
    }
    item
}

/// Pages title-property or database title array, joined plain text.
fn extract_title(record: &Value) -> Option<String> {
    // Databases carry a top-level `title` array.
    if let Some(title) = record.get("title").and_then(Value::as_array) {
        return join_rich_text(title);
    }
    // Pages carry it inside whichever property has type `title`.
    let properties = record.get("properties")?.as_object()?;
    let title_prop = properties
        .values()
        .find(|p| p.get("type").and_then(Value::as_str) == Some("title"))?;
    join_rich_text(title_prop.get("title")?.as_array()?)
}

fn join_rich_text(fragments: &[Value]) -> Option<String> {
    let text: String = fragments
        .iter()
        .filter_map(|f| f.get("plain_text").and_then(Value::as_str))
        .collect();
    if text.is_empty() { None } else { Some(text) }
}

/// Parent page or database id, when the parent is not the workspace root.
fn parent_id_of(record: &Value) -> Option<String> {
    let parent = record.get("parent")?;
    let kind = parent.get("type").and_then(Value::as_str)?;
    parent
        .get(kind)
        .and_then(Value::as_str)
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_page_with_title_property() {
        let record = json!({
            "object": "page",
            "id": "p1",
            "created_time": "2024-01-01T00:00:00Z",
            "last_edited_time": "2024-02-01T00:00:00Z",
            "parent": {"type": "database_id", "database_id": "db9"},
            "properties": {
                "Name": {"type": "title", "title": [{"plain_text": "Roadmap"}]}
            }
        });
        let item = map_result(&record);
        assert_eq!(item.id, "p1");
        assert_eq!(item.item_type, "page");
        assert_eq!(item.name, "Roadmap");
        assert_eq!(item.parent_id.as_deref(), Some("db9"));
        assert_eq!(item.creation_time.as_deref(), Some("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn test_map_database_with_top_level_title() {
        let record = json!({
            "object": "database",
            "id": "db1",
            "title": [{"plain_text": "Tasks "}, {"plain_text": "2024"}]
        });
        let item = map_result(&record);
        assert_eq!(item.item_type, "database");
        assert_eq!(item.name, "Tasks 2024");
    }

    #[test]
    fn test_map_untitled_falls_back_to_id() {
        let record = json!({
            "object": "page",
            "id": "p2",
            "properties": {}
        });
        assert_eq!(map_result(&record).name, "p2");
    }

    #[test]
    fn test_workspace_parent_gives_no_parent_id() {
        let record = json!({
            "object": "page",
            "id": "p3",
            "parent": {"type": "workspace", "workspace": true},
            "properties": {}
        });
        assert!(map_result(&record).parent_id.is_none());
    }

    #[tokio::test]
    async fn test_fetch_items_sends_version_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/search")
            .match_header("authorization", "Bearer tok")
            .match_header("notion-version", NOTION_VERSION)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"results":[{"object":"page","id":"p1","properties":{}}]}"#)
            .create_async()
            .await;

        let items = fetch_items(&reqwest::Client::new(), &server.url(), "tok")
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "p1");
    }

    #[tokio::test]
    async fn test_fetch_items_surfaces_upstream_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/search")
            .with_status(429)
            .with_body("rate limited")
            .create_async()
            .await;

        let err = fetch_items(&reqwest::Client::new(), &server.url(), "tok")
            .await
            .unwrap_err();
        match err {
            hublink_types::LinkError::Fetch { status, .. } => assert_eq!(status, 429),
            other => panic!("expected Fetch error, got {other}"),
        }
    }
}
