use lattice_server::{AppState, app, config};
use lattice_store::memory::InMemoryStore;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::load()?;
    let bind = config.server.bind.clone();
    let state = AppState::with_memory_store(config, Arc::new(InMemoryStore::new()));
    let router = app(state);

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!(addr = %bind, "lattice-server listening");

    axum::serve(listener, router).await?;

    Ok(())
}
