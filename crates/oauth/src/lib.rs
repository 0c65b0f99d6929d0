//! OAuth2 authorization-code flow for all supported integrations.
//!
//! Each provider sub-module implements URL building and code exchange for
//! one SaaS platform. [`OAuthFlow`] runs the shared protocol around them:
//! CSRF state issuance and validation, the credential handoff through the
//! ephemeral store, and the one-time pickup.

pub mod airtable;
mod exchange;
pub mod flow;
pub mod hubspot;
pub mod keys;
pub mod notion;
pub mod pkce;
pub mod state;

pub use flow::{HANDOFF_TTL, OAuthFlow};
pub use state::StatePayload;
