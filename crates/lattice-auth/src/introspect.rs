//! Token introspection: credential → identity.

use crate::cache::IntrospectionCache;
use crate::credentials::Credential;
use crate::dev;
use crate::error::AuthError;
use crate::token;
use chrono::Utc;
use lattice_core::Identity;
use lattice_store::TokenStore;
use std::sync::Arc;
use std::time::Duration;

/// Resolves classified credentials to identities.
///
/// Static development identifiers resolve with no I/O and only when enabled.
/// API tokens go through the fingerprint cache; on a miss the token store is
/// consulted and the validity invariant (unrevoked, unexpired, hash match)
/// enforced. Failures never populate the cache.
pub struct TokenIntrospector {
    store: Arc<dyn TokenStore>,
    cache: IntrospectionCache,
    dev_tokens_enabled: bool,
}

impl TokenIntrospector {
    pub fn new(store: Arc<dyn TokenStore>, cache_ttl: Duration, dev_tokens_enabled: bool) -> Self {
        Self {
            store,
            cache: IntrospectionCache::new(cache_ttl),
            dev_tokens_enabled,
        }
    }

    /// Resolve a credential to an identity.
    pub async fn resolve(&self, credential: &Credential) -> Result<Identity, AuthError> {
        match credential {
            Credential::Static(identifier) => {
                if !self.dev_tokens_enabled {
                    return Err(AuthError::NotAuthenticated);
                }
                dev::identity_for(identifier).ok_or(AuthError::NotAuthenticated)
            }
            Credential::Unrecognized(_) => Err(AuthError::NotAuthenticated),
            Credential::ApiToken(raw) => self.resolve_api_token(raw).await,
        }
    }

    async fn resolve_api_token(&self, raw: &str) -> Result<Identity, AuthError> {
        let fingerprint = token::fingerprint(raw);
        if let Some(identity) = self.cache.get(&fingerprint).await {
            return Ok(identity);
        }

        let record = self
            .store
            .find_by_secret_hash(&token::hash_secret(raw))
            .await?
            .ok_or(AuthError::NotAuthenticated)?;

        if !record.is_valid(Utc::now()) {
            tracing::debug!(token_id = %record.id, "token failed validity check");
            return Err(AuthError::NotAuthenticated);
        }

        let identity =
            Identity::new(record.id.to_string()).with_scopes(record.scopes.iter().cloned());
        self.cache.insert(fingerprint, identity.clone()).await;
        Ok(identity)
    }
}
