//! Unified error type for the hublink workspace.

use thiserror::Error;

/// Enumerates all error kinds that can occur across hublink crates.
#[derive(Debug, Error)]
pub enum LinkError {
    /// Bad or missing input: absent parameters, undecodable or mismatched
    /// state. Never retried.
    #[error("validation error: {0}")]
    Validation(String),

    /// The provider reported an OAuth failure on the redirect (the `error`
    /// query parameter). Surfaced verbatim.
    #[error("oauth error: {0}")]
    Auth(String),

    /// The token endpoint rejected the authorization code.
    #[error("token exchange failed: status={status}, body={body}")]
    Exchange { status: u16, body: String },

    /// No credentials are ready for pickup yet. Callers poll on this.
    #[error("{0}")]
    NotFound(String),

    /// The provider data API returned a non-success status.
    #[error("item fetch failed: status={status}, body={body}")]
    Fetch { status: u16, body: String },

    /// The requested provider name is not one of the supported integrations.
    #[error("unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// Ephemeral store failure. Fatal for the request it occurs in.
    #[error("store error: {0}")]
    Store(String),

    /// HTTP transport error.
    #[error("http error: {0}")]
    Http(String),

    /// JSON serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration loading or validation error.
    #[error("configuration error: {0}")]
    Config(String),
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for LinkError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.to_string())
    }
}

impl LinkError {
    /// Returns `true` if the error is the expected poll-until-ready signal
    /// rather than a terminal failure.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
