//! The MCP server: session gating plus JSON-RPC dispatch.

use crate::executor::ToolExecutor;
use crate::protocol::{
    CallToolParams, CallToolResponse, INVALID_PARAMS, INVALID_REQUEST, JsonRpcRequest,
    JsonRpcResponse, ListToolsResponse, METHOD_NOT_FOUND, RequestContext,
};
use crate::session::{SessionLookup, SessionManager, TerminateOutcome};
use crate::tools::{self, ToolRegistry};
use lattice_store::EntityStore;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

/// The protocol version this server negotiates.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Server identity reported on initialize.
pub const SERVER_NAME: &str = "lattice-gateway";

/// What the transport should do with a handled request.
#[derive(Debug)]
pub enum McpOutcome {
    /// Return the envelope with transport 200. `session_id` is set when
    /// initialize created a session, to surface as the `Mcp-Session-Id`
    /// response header.
    Reply {
        response: JsonRpcResponse,
        session_id: Option<String>,
    },
    /// The referenced session was explicitly terminated: transport 404.
    SessionGone,
}

impl McpOutcome {
    fn reply(response: JsonRpcResponse) -> Self {
        Self::Reply {
            response,
            session_id: None,
        }
    }
}

/// The MCP server.
pub struct McpServer {
    sessions: SessionManager,
    tools: ToolRegistry,
    executor: ToolExecutor,
}

impl McpServer {
    /// Create a server with the built-in tool catalog.
    pub fn new(store: Arc<dyn EntityStore>, session_idle_ttl: Duration) -> Self {
        Self {
            sessions: SessionManager::new(session_idle_ttl),
            tools: ToolRegistry::builtin(),
            executor: ToolExecutor::new(store),
        }
    }

    /// The session table, for the transport's DELETE handler.
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Terminate a session by id.
    pub async fn terminate(&self, session_id: &str) -> TerminateOutcome {
        self.sessions.terminate(session_id).await
    }

    /// Handle one JSON-RPC request.
    ///
    /// `session_id` is the value of the `Mcp-Session-Id` request header, if
    /// any. Every method except `initialize` requires a live, initialized
    /// session owned by the calling credential.
    pub async fn handle(
        &self,
        ctx: &RequestContext,
        session_id: Option<&str>,
        request: JsonRpcRequest,
    ) -> McpOutcome {
        let id = request.id.clone();

        if request.jsonrpc != "2.0" {
            return McpOutcome::reply(JsonRpcResponse::error(
                id,
                INVALID_REQUEST,
                "unsupported JSON-RPC version",
            ));
        }

        if request.method == "initialize" {
            return self.handle_initialize(ctx, id, request.params).await;
        }

        // Tombstoned ids get transport 404; anything else that is not a live
        // session is a protocol error inside the envelope.
        let session = match session_id {
            None => {
                return McpOutcome::reply(JsonRpcResponse::error(
                    id,
                    INVALID_REQUEST,
                    "no active session; call initialize first",
                ));
            }
            Some(sid) => match self.sessions.lookup(sid).await {
                SessionLookup::Terminated => return McpOutcome::SessionGone,
                SessionLookup::Unknown => {
                    return McpOutcome::reply(JsonRpcResponse::error(
                        id,
                        INVALID_REQUEST,
                        "unknown session; call initialize first",
                    ));
                }
                SessionLookup::Active(session) => session,
            },
        };

        // Sessions are never shared across credentials.
        if session.identity.subject_id != ctx.identity.subject_id {
            return McpOutcome::reply(JsonRpcResponse::error(
                id,
                INVALID_REQUEST,
                "session does not belong to this credential",
            ));
        }

        match request.method.as_str() {
            "tools/list" => McpOutcome::reply(self.handle_list_tools(id)),
            "tools/call" => McpOutcome::reply(self.handle_call_tool(ctx, id, request.params).await),
            other => McpOutcome::reply(JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {other}"),
            )),
        }
    }

    async fn handle_initialize(
        &self,
        ctx: &RequestContext,
        id: Option<Value>,
        params: Option<Value>,
    ) -> McpOutcome {
        let Some(params) = params else {
            return McpOutcome::reply(JsonRpcResponse::error(
                id,
                INVALID_PARAMS,
                "initialize requires protocolVersion and clientInfo",
            ));
        };

        let client_version = params.get("protocolVersion").and_then(Value::as_str);
        let client_info = params.get("clientInfo").filter(|v| !v.is_null());
        if client_version.is_none() || client_info.is_none() {
            return McpOutcome::reply(JsonRpcResponse::error(
                id,
                INVALID_PARAMS,
                "initialize requires protocolVersion and clientInfo",
            ));
        }

        let session = self
            .sessions
            .create(ctx.identity.clone(), PROTOCOL_VERSION.to_string())
            .await;

        let result = json!({
            "protocolVersion": PROTOCOL_VERSION,
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            },
            "capabilities": {
                "tools": {
                    "listChanged": false
                }
            }
        });

        McpOutcome::Reply {
            response: JsonRpcResponse::success(id, result),
            session_id: Some(session.session_id),
        }
    }

    fn handle_list_tools(&self, id: Option<Value>) -> JsonRpcResponse {
        let mut tools: Vec<_> = self.tools.list().into_iter().cloned().collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        JsonRpcResponse::success(id, json!(ListToolsResponse { tools }))
    }

    async fn handle_call_tool(
        &self,
        ctx: &RequestContext,
        id: Option<Value>,
        params: Option<Value>,
    ) -> JsonRpcResponse {
        let params: CallToolParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(id, INVALID_PARAMS, format!("Invalid params: {e}"));
                }
            },
            None => return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing params"),
        };

        let Some(tool) = self.tools.get(&params.name) else {
            return JsonRpcResponse::error(
                id,
                INVALID_PARAMS,
                format!("Tool not found: {}", params.name),
            );
        };

        if let Some(argument) = tools::missing_required(tool, &params.arguments) {
            return JsonRpcResponse::error(
                id,
                INVALID_PARAMS,
                format!("missing required argument: {argument}"),
            );
        }

        match self.executor.execute(ctx, &params.name, &params.arguments).await {
            Ok(payload) => {
                JsonRpcResponse::success(id, json!(CallToolResponse::from_payload(&payload)))
            }
            Err(err) => JsonRpcResponse::error(id, err.code(), err.to_string()),
        }
    }
}
