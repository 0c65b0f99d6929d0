//! The shared authorize → callback → pickup protocol.
//!
//! [`OAuthFlow`] owns the parts common to every integration: issuing and
//! validating the CSRF state token, exchanging the authorization code via the
//! provider module, parking the resulting credentials in the ephemeral store,
//! and handing them out exactly once.

use crate::{airtable, hubspot, keys, notion, pkce, state};
use hublink_config::{Config, ProviderConfig};
use hublink_types::{EphemeralStore, LinkError, ProviderId, Result};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// TTL for every handoff key: pending state, PKCE verifier, and parked
/// credentials. A caller that never polls loses the credentials silently
/// once this elapses.
pub const HANDOFF_TTL: Duration = Duration::from_secs(600);

/// Runs the OAuth2 authorization-code protocol for one provider.
pub struct OAuthFlow {
    provider: ProviderId,
    config: ProviderConfig,
    redirect_uri: String,
    store: Arc<dyn EphemeralStore>,
    http: reqwest::Client,
}

impl std::fmt::Debug for OAuthFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthFlow")
            .field("provider", &self.provider)
            .field("redirect_uri", &self.redirect_uri)
            .finish_non_exhaustive()
    }
}

impl OAuthFlow {
    pub fn new(
        provider: ProviderId,
        config: ProviderConfig,
        redirect_uri: impl Into<String>,
        store: Arc<dyn EphemeralStore>,
        http: reqwest::Client,
    ) -> Self {
        Self {
            provider,
            config,
            redirect_uri: redirect_uri.into(),
            store,
            http,
        }
    }

    /// Build a flow from the application [`Config`].
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Config`] if the provider has no configuration
    /// entry.
    pub fn from_config(
        config: &Config,
        provider: ProviderId,
        store: Arc<dyn EphemeralStore>,
        http: reqwest::Client,
    ) -> Result<Self> {
        let provider_config = config
            .provider(provider)
            .cloned()
            .ok_or_else(|| LinkError::Config(format!("provider {provider} is not configured")))?;
        let redirect_uri = config.redirect_uri(provider);
        Ok(Self::new(provider, provider_config, redirect_uri, store, http))
    }

    /// Start an authorization: store a fresh CSRF token for
    /// `(org_id, user_id)` and return the provider authorize URL the browser
    /// should be sent to.
    ///
    /// # Errors
    ///
    /// Propagates store failures; URL building itself does not fail for
    /// well-formed configuration.
    pub async fn authorize(&self, user_id: &str, org_id: &str) -> Result<String> {
        let token = state::random_token();
        let encoded = state::StatePayload::new(&token, user_id, org_id).encode()?;

        self.store
            .set(
                &keys::state_key(self.provider, org_id, user_id),
                &token,
                HANDOFF_TTL,
            )
            .await?;

        let url = match self.provider {
            ProviderId::Hubspot => {
                hubspot::build_authorize_url(&self.config, &self.redirect_uri, &encoded)?
            }
            ProviderId::Airtable => {
                let (verifier, challenge) = pkce::generate_pkce();
                self.store
                    .set(
                        &keys::verifier_key(self.provider, org_id, user_id),
                        &verifier,
                        HANDOFF_TTL,
                    )
                    .await?;
                airtable::build_authorize_url(
                    &self.config,
                    &self.redirect_uri,
                    &encoded,
                    &challenge,
                )?
            }
            ProviderId::Notion => {
                notion::build_authorize_url(&self.config, &self.redirect_uri, &encoded)?
            }
        };

        tracing::debug!(provider = %self.provider, user_id, org_id, "issued authorization url");
        Ok(url)
    }

    /// Complete the provider redirect: validate the echoed state, exchange
    /// the code, and park the credentials for one-time pickup.
    ///
    /// On an exchange failure the pending state is still cleared so the
    /// caller can start a fresh cycle.
    ///
    /// # Errors
    ///
    /// See the crate-level error taxonomy; every failure here is terminal
    /// for this authorization attempt.
    pub async fn handle_callback(&self, params: &HashMap<String, String>) -> Result<()> {
        if let Some(err) = params.get("error") {
            let detail = params
                .get("error_description")
                .unwrap_or(err)
                .clone();
            return Err(LinkError::Auth(detail));
        }

        let (Some(code), Some(encoded_state)) = (params.get("code"), params.get("state")) else {
            return Err(LinkError::Validation("Missing code or state.".to_string()));
        };

        let payload = state::StatePayload::decode(encoded_state)?;
        let state_key = keys::state_key(self.provider, &payload.org_id, &payload.user_id);

        // CSRF check: one uniform failure for both a missing and a
        // mismatched token.
        let saved = self.store.get(&state_key).await?;
        if saved.as_deref() != Some(payload.state.as_str()) {
            return Err(LinkError::Validation("State does not match.".to_string()));
        }

        let exchanged = self
            .exchange(code, &payload.org_id, &payload.user_id)
            .await;

        match exchanged {
            Ok(credentials) => {
                let creds_key =
                    keys::credentials_key(self.provider, &payload.org_id, &payload.user_id);
                let body = serde_json::to_string(&credentials)?;
                let (set_res, cleanup_res) = tokio::join!(
                    self.store.set(&creds_key, &body, HANDOFF_TTL),
                    self.cleanup_pending(&state_key, &payload.org_id, &payload.user_id),
                );
                set_res?;
                cleanup_res?;
                tracing::info!(
                    provider = %self.provider,
                    user_id = payload.user_id,
                    org_id = payload.org_id,
                    "authorization code exchanged, credentials parked"
                );
                Ok(())
            }
            Err(e) => {
                // Clear pending state so the next cycle is not stuck; the
                // exchange error is what gets surfaced.
                if let Err(cleanup_err) = self
                    .cleanup_pending(&state_key, &payload.org_id, &payload.user_id)
                    .await
                {
                    tracing::warn!(
                        provider = %self.provider,
                        error = %cleanup_err,
                        "failed to clear pending state after exchange failure"
                    );
                }
                Err(e)
            }
        }
    }

    /// Return parked credentials exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotFound`] until a callback has parked
    /// credentials, and again after they have been consumed.
    pub async fn take_credentials(&self, user_id: &str, org_id: &str) -> Result<serde_json::Value> {
        let key = keys::credentials_key(self.provider, org_id, user_id);
        let Some(raw) = self.store.get(&key).await? else {
            return Err(LinkError::NotFound("No credentials found.".to_string()));
        };
        self.store.delete(&key).await?;
        let credentials = serde_json::from_str(&raw)?;
        tracing::debug!(provider = %self.provider, user_id, org_id, "credentials picked up");
        Ok(credentials)
    }

    async fn exchange(
        &self,
        code: &str,
        org_id: &str,
        user_id: &str,
    ) -> Result<serde_json::Value> {
        match self.provider {
            ProviderId::Hubspot => {
                hubspot::exchange_code(&self.http, &self.config, &self.redirect_uri, code).await
            }
            ProviderId::Airtable => {
                let verifier_key = keys::verifier_key(self.provider, org_id, user_id);
                let Some(verifier) = self.store.get(&verifier_key).await? else {
                    return Err(LinkError::Validation("State does not match.".to_string()));
                };
                airtable::exchange_code(
                    &self.http,
                    &self.config,
                    &self.redirect_uri,
                    code,
                    &verifier,
                )
                .await
            }
            ProviderId::Notion => {
                notion::exchange_code(&self.http, &self.config, &self.redirect_uri, code).await
            }
        }
    }

    /// Delete the pending state key, and the verifier key where one exists.
    async fn cleanup_pending(&self, state_key: &str, org_id: &str, user_id: &str) -> Result<()> {
        self.store.delete(state_key).await?;
        if self.provider == ProviderId::Airtable {
            self.store
                .delete(&keys::verifier_key(self.provider, org_id, user_id))
                .await?;
        }
        Ok(())
    }
}
