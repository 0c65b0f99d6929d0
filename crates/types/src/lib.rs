//! Core types and traits for the hublink workspace.
//!
//! This crate defines the shared abstractions used across all layers of the
//! hublink integration hub: the error taxonomy, provider identifiers, the
//! normalized item DTO, and the ephemeral store trait that coordinates the
//! authorize → callback → pickup handoff.

pub mod error;
pub mod item;
pub mod provider;
pub mod traits;

pub use error::LinkError;
pub use item::IntegrationItem;
pub use provider::ProviderId;
pub use traits::{EphemeralStore, Result};
