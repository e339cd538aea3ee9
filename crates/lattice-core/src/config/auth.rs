use serde::{Deserialize, Serialize};

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Enables the fixed development identities (`lat-dev-*`). These bypass
    /// token introspection entirely and must stay off in production.
    #[serde(default)]
    pub dev_tokens: bool,

    /// How long a successful API-token introspection may be served from
    /// cache, in seconds. A revoked token stays valid through a warm entry
    /// until this lapses.
    #[serde(default = "default_cache_ttl_secs")]
    pub introspection_cache_ttl_secs: u64,
}

fn default_cache_ttl_secs() -> u64 {
    60
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            dev_tokens: false,
            introspection_cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}
