//! Identifiers for the supported SaaS integrations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a supported integration provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    Hubspot,
    Airtable,
    Notion,
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hubspot => write!(f, "hubspot"),
            Self::Airtable => write!(f, "airtable"),
            Self::Notion => write!(f, "notion"),
        }
    }
}

impl std::str::FromStr for ProviderId {
    type Err = crate::LinkError;

    /// Parse a provider name into a [`ProviderId`].
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::UnsupportedProvider`] if the string does not
    /// match any known provider name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hubspot" => Ok(Self::Hubspot),
            "airtable" => Ok(Self::Airtable),
            "notion" => Ok(Self::Notion),
            other => Err(crate::LinkError::UnsupportedProvider(other.to_string())),
        }
    }
}

impl ProviderId {
    /// Returns all known provider variants.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Hubspot, Self::Airtable, Self::Notion]
    }
}
