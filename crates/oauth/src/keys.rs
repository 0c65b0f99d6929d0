//! Store key formats for the authorize → callback → pickup handoff.
//!
//! Keys are scoped by provider and caller identity so concurrent flows for
//! different users never collide.

use hublink_types::ProviderId;

/// Key holding the pending CSRF state token.
#[must_use]
pub fn state_key(provider: ProviderId, org_id: &str, user_id: &str) -> String {
    format!("{provider}_state:{org_id}:{user_id}")
}

/// Key holding the PKCE code verifier (Airtable only).
#[must_use]
pub fn verifier_key(provider: ProviderId, org_id: &str, user_id: &str) -> String {
    format!("{provider}_verifier:{org_id}:{user_id}")
}

/// Key holding the exchanged credentials awaiting one-time pickup.
#[must_use]
pub fn credentials_key(provider: ProviderId, org_id: &str, user_id: &str) -> String {
    format!("{provider}_credentials:{org_id}:{user_id}")
}
