//! MCP transport.
//!
//! Protocol errors ride transport 200 inside the envelope; only auth,
//! malformed JSON, terminated-session references, and the DELETE lifecycle
//! use HTTP status codes.

use crate::context::PROJECT_HEADER;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use lattice_core::Identity;
use lattice_mcp::protocol::INVALID_REQUEST;
use lattice_mcp::{JsonRpcRequest, JsonRpcResponse, McpOutcome, RequestContext, TerminateOutcome};
use serde_json::Value;
use std::convert::Infallible;
use uuid::Uuid;

/// Session id header, on requests and on initialize responses.
pub const SESSION_HEADER: &str = "mcp-session-id";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/mcp", post(rpc).delete(terminate))
        .route("/mcp/rpc", post(rpc))
        .route("/mcp/sse/{project_id}", get(sse))
}

async fn rpc(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    headers: HeaderMap,
    Json(raw): Json<Value>,
) -> Response {
    // A JSON body that is not a request envelope is still answered inside
    // the protocol, echoing whatever id is recoverable.
    let request: JsonRpcRequest = match serde_json::from_value(raw.clone()) {
        Ok(request) => request,
        Err(_) => {
            let id = raw.get("id").cloned();
            return Json(JsonRpcResponse::error(
                id,
                INVALID_REQUEST,
                "invalid request envelope",
            ))
            .into_response();
        }
    };

    let ctx = RequestContext {
        identity,
        project_id: header_value(&headers, PROJECT_HEADER),
    };
    let session_id = header_value(&headers, SESSION_HEADER);

    match state.mcp.handle(&ctx, session_id.as_deref(), request).await {
        McpOutcome::Reply {
            response,
            session_id,
        } => {
            let mut http = Json(response).into_response();
            if let Some(sid) = session_id
                && let Ok(value) = HeaderValue::from_str(&sid)
            {
                http.headers_mut()
                    .insert(HeaderName::from_static(SESSION_HEADER), value);
            }
            http
        }
        McpOutcome::SessionGone => ApiError::not_found("session terminated").into_response(),
    }
}

async fn terminate(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(session_id) = header_value(&headers, SESSION_HEADER) else {
        return ApiError::bad_request("missing Mcp-Session-Id header").into_response();
    };

    match state.mcp.terminate(&session_id).await {
        TerminateOutcome::Terminated => StatusCode::NO_CONTENT.into_response(),
        TerminateOutcome::NotFound => ApiError::not_found("unknown session").into_response(),
    }
}

/// Server-push stream for clients that cannot hold a POST open. The path
/// parameter must be a UUID before the stream opens; these clients
/// authenticate through the `token` query parameter.
async fn sse(
    State(_state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(project_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let project = Uuid::parse_str(&project_id)
        .map_err(|_| ApiError::bad_request("project id must be a UUID"))?;
    tracing::debug!(project = %project, subject = %identity.subject_id, "SSE stream opened");

    let stream = async_stream::stream! {
        yield Ok::<_, Infallible>(Event::default().event("endpoint").data("/mcp/rpc"));
        futures::future::pending::<()>().await;
    };

    Ok(Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(std::time::Duration::from_secs(30))
            .text("ping"),
    ))
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
