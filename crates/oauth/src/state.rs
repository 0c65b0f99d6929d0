//! CSRF state token generation and the transport-safe state payload.

use base64::{Engine as _, engine::general_purpose::URL_SAFE, engine::general_purpose::URL_SAFE_NO_PAD};
use hublink_types::{LinkError, Result};
use rand::RngCore as _;
use serde::{Deserialize, Serialize};

/// The payload round-tripped through the provider's `state` query parameter.
///
/// The provider echoes the encoded form back verbatim; nothing in it is
/// trusted until the embedded token has been compared against the stored one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatePayload {
    /// Random CSRF token, also stored server-side under the state key.
    pub state: String,
    pub user_id: String,
    pub org_id: String,
}

impl StatePayload {
    pub fn new(
        state: impl Into<String>,
        user_id: impl Into<String>,
        org_id: impl Into<String>,
    ) -> Self {
        Self {
            state: state.into(),
            user_id: user_id.into(),
            org_id: org_id.into(),
        }
    }

    /// Encode as URL-safe base64 of the JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn encode(&self) -> Result<String> {
        let json = serde_json::to_vec(self)?;
        Ok(URL_SAFE.encode(json))
    }

    /// Decode an inbound `state` parameter.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Validation`] (`"Invalid state."`) for anything
    /// that is not URL-safe base64 of the expected JSON object.
    pub fn decode(encoded: &str) -> Result<Self> {
        let bytes = URL_SAFE
            .decode(encoded)
            .map_err(|_| LinkError::Validation("Invalid state.".to_string()))?;
        serde_json::from_slice(&bytes)
            .map_err(|_| LinkError::Validation("Invalid state.".to_string()))
    }
}

/// Generate a random CSRF state token: 32 bytes (256 bits) of entropy,
/// URL-safe base64 without padding.
#[must_use]
pub fn random_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
