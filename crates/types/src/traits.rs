//! Async traits shared across hublink crates.
//!
//! Cross-crate abstractions live here so that higher layers depend only on
//! `hublink-types`, not on each other.

use crate::LinkError;
use async_trait::async_trait;
use std::time::Duration;

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, LinkError>;

/// Expiring key-value storage used to coordinate the authorize → callback →
/// pickup handoff, which spans separate request contexts.
///
/// Keys are plain strings scoped as `{provider}_state:{org_id}:{user_id}`
/// and `{provider}_credentials:{org_id}:{user_id}`. Implementations must
/// treat an expired key exactly like an absent one.
#[async_trait]
pub trait EphemeralStore: Send + Sync {
    /// Store `value` under `key`, replacing any existing entry, expiring
    /// after `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Fetch the value under `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Remove the entry under `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;
}
