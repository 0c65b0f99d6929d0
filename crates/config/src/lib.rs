//! Configuration loading for the hublink service.
//!
//! Uses figment to merge serde defaults, an optional YAML file, and
//! `HUBLINK_`-prefixed environment variables. The resulting [`Config`] is an
//! explicit struct handed to each component at construction; there is no
//! process-wide mutable configuration.

pub mod schema;

pub use schema::{Config, ProviderConfig};
