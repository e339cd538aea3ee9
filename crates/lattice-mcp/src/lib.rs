//! MCP session layer for the Lattice gateway.
//!
//! A JSON-RPC 2.0 state machine with session lifecycle: `initialize` creates
//! a session, every other method requires a live one, and explicit
//! termination tombstones the id. Protocol-level errors always ride
//! transport 200; only auth, malformed JSON, and terminated-session
//! references surface as HTTP status codes (handled by the transport in
//! `lattice-server`).

pub mod error;
pub mod executor;
pub mod protocol;
pub mod server;
pub mod session;
pub mod tools;

pub use error::ToolError;
pub use protocol::{JsonRpcRequest, JsonRpcResponse, RequestContext};
pub use server::{McpOutcome, McpServer, PROTOCOL_VERSION};
pub use session::{SessionLookup, SessionManager, TerminateOutcome};
