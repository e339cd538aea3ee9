//! Configuration types shared across the Lattice crates.

pub mod auth;
pub mod mcp;
pub mod server;

pub use auth::AuthConfig;
pub use mcp::McpConfig;
pub use server::ServerConfig;

use serde::{Deserialize, Serialize};

/// Top-level gateway configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub mcp: McpConfig,
}
