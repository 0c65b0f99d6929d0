use hublink_types::ProviderId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// OAuth client settings for a single provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// OAuth client id issued by the provider.
    #[serde(default)]
    pub client_id: String,
    /// OAuth client secret issued by the provider.
    #[serde(default)]
    pub client_secret: String,
    /// Redirect URI registered with the provider. When unset, one is derived
    /// from the listen address.
    #[serde(default)]
    pub redirect_uri: Option<String>,
    /// Space-separated OAuth scopes. When unset, the provider module's
    /// default scope string is used.
    #[serde(default)]
    pub scope: Option<String>,
    /// Token endpoint override. Intended for sandbox and test environments.
    #[serde(default)]
    pub token_url: Option<String>,
    /// Data API base URL override. Intended for sandbox and test environments.
    #[serde(default)]
    pub api_base: Option<String>,
}

fn default_port() -> u16 {
    8000
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Listen port (defaults to 8000).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Listen address (defaults to `127.0.0.1`).
    #[serde(default = "default_host")]
    pub host: String,
    /// Browser origins allowed to call the API (defaults to the local
    /// frontend on port 3000).
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
    /// Per-provider OAuth client configuration.
    #[serde(default)]
    pub providers: HashMap<ProviderId, ProviderConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            cors_origins: default_cors_origins(),
            providers: HashMap::new(),
        }
    }
}

impl Config {
    /// Parses configuration from a YAML string merged over defaults and
    /// under `HUBLINK_` environment variables.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the YAML is invalid or extraction fails.
    #[allow(clippy::result_large_err)]
    pub fn from_yaml(yaml: &str) -> Result<Self, figment::Error> {
        use figment::{
            Figment,
            providers::{Env, Format as _, Serialized, Yaml},
        };
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Yaml::string(yaml))
            .merge(Env::prefixed("HUBLINK_").split("__"))
            .extract()
    }

    /// Loads configuration from a file path, merged the same way as
    /// [`Config::from_yaml`].
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the file cannot be read or parsed.
    #[allow(clippy::result_large_err)]
    pub fn from_file(path: &std::path::Path) -> Result<Self, figment::Error> {
        use figment::{
            Figment,
            providers::{Env, Format as _, Serialized, Yaml},
        };
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("HUBLINK_").split("__"))
            .extract()
    }

    /// Looks up the settings for `provider`, if configured.
    #[must_use]
    pub fn provider(&self, provider: ProviderId) -> Option<&ProviderConfig> {
        self.providers.get(&provider)
    }

    /// The redirect URI registered for `provider`: the explicit override if
    /// set, otherwise one derived from the listen address.
    #[must_use]
    pub fn redirect_uri(&self, provider: ProviderId) -> String {
        self.provider(provider)
            .and_then(|p| p.redirect_uri.clone())
            .unwrap_or_else(|| {
                format!(
                    "http://{}:{}/integrations/{provider}/oauth2callback",
                    self.host, self.port
                )
            })
    }
}
