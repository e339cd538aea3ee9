//! MCP session-layer configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the MCP session layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpConfig {
    /// Whether the MCP routes are mounted.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Idle lifetime of a session, in seconds. A session past this behaves
    /// as unknown on its next use.
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_session_ttl_secs() -> u64 {
    1800
}

impl Default for McpConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            session_ttl_secs: default_session_ttl_secs(),
        }
    }
}
