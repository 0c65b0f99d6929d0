//! Ephemeral key-value storage backends.
//!
//! Provides the in-memory TTL store used for single-process deployments and
//! as the test double. The [`hublink_types::EphemeralStore`] trait is the
//! seam; protocol code never names a concrete backend.

pub mod memory;

pub use memory::MemoryStore;
