//! Shared application state.
//!
//! Built once at startup and cloned into handlers; the introspection cache
//! and the MCP session table live inside their owning components here, never
//! as ambient globals.

use lattice_auth::TokenIntrospector;
use lattice_core::GatewayConfig;
use lattice_mcp::McpServer;
use lattice_store::memory::InMemoryStore;
use lattice_store::{ActivityStore, EntityStore, SuperadminStore, TokenStore};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub introspector: Arc<TokenIntrospector>,
    pub tokens: Arc<dyn TokenStore>,
    pub entities: Arc<dyn EntityStore>,
    pub activity: Arc<dyn ActivityStore>,
    pub superadmins: Arc<dyn SuperadminStore>,
    pub mcp: Arc<McpServer>,
}

impl AppState {
    /// Wire the state from explicit collaborators.
    pub fn new(
        config: GatewayConfig,
        tokens: Arc<dyn TokenStore>,
        entities: Arc<dyn EntityStore>,
        activity: Arc<dyn ActivityStore>,
        superadmins: Arc<dyn SuperadminStore>,
    ) -> Self {
        let introspector = Arc::new(TokenIntrospector::new(
            tokens.clone(),
            Duration::from_secs(config.auth.introspection_cache_ttl_secs),
            config.auth.dev_tokens,
        ));
        let mcp = Arc::new(McpServer::new(
            entities.clone(),
            Duration::from_secs(config.mcp.session_ttl_secs),
        ));

        Self {
            config: Arc::new(config),
            introspector,
            tokens,
            entities,
            activity,
            superadmins,
            mcp,
        }
    }

    /// State backed entirely by one in-memory store. Local runs and tests.
    pub fn with_memory_store(config: GatewayConfig, store: Arc<InMemoryStore>) -> Self {
        Self::new(
            config,
            store.clone(),
            store.clone(),
            store.clone(),
            store,
        )
    }
}
