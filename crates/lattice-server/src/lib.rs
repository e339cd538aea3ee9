//! Lattice gateway HTTP server.
//!
//! Wires the auth pipeline (`lattice-auth`), the storage boundary
//! (`lattice-store`), and the MCP session layer (`lattice-mcp`) into one
//! axum application. The binary entrypoint lives in `main.rs`; everything
//! else is exported so integration tests can drive the router in-process.

pub mod config;
pub mod context;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::app;
pub use state::AppState;
