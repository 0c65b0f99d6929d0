//! Normalized representation of a remote object fetched from a provider.

use serde::{Deserialize, Serialize};

/// A provider-agnostic view of one remote record: a HubSpot contact, an
/// Airtable base or table, a Notion page. Purely a response DTO; there is
/// no identity or lifecycle beyond single-response construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationItem {
    pub id: String,
    /// Provider-specific type tag (`"contact"`, `"base"`, `"page"`, …).
    #[serde(rename = "type")]
    pub item_type: String,
    /// Human-readable display name, already resolved through the
    /// provider-specific fallback chain.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl IntegrationItem {
    /// Create an item with the mandatory fields; timestamps and parent
    /// default to `None`.
    pub fn new(
        id: impl Into<String>,
        item_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            item_type: item_type.into(),
            name: name.into(),
            creation_time: None,
            last_modified_time: None,
            parent_id: None,
        }
    }

    /// Attach creation and last-modified timestamps (RFC 3339 strings as
    /// returned by the provider, passed through untouched).
    #[must_use]
    pub fn with_times(
        mut self,
        creation_time: Option<String>,
        last_modified_time: Option<String>,
    ) -> Self {
        self.creation_time = creation_time;
        self.last_modified_time = last_modified_time;
        self
    }

    /// Attach a parent identifier (e.g. the base id for an Airtable table).
    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }
}
