//! Route assembly.

pub mod activity;
pub mod mcp;
pub mod superadmin;
pub mod tokens;

use crate::middleware::auth;
use crate::state::AppState;
use axum::{Json, Router, middleware as axum_middleware, routing::get};
use tower_http::trace::TraceLayer;

/// Build the gateway application.
///
/// Every route except the health check sits behind the authenticate layer;
/// scope guards and tenant extraction are attached per route inside the
/// submodules.
pub fn app(state: AppState) -> Router {
    let mut protected = Router::new()
        .merge(test::routes())
        .merge(tokens::routes())
        .merge(superadmin::routes())
        .merge(activity::routes());
    if state.config.mcp.enabled {
        protected = protected.merge(mcp::routes());
    }
    let protected = protected.layer(axum_middleware::from_fn_with_state(
        state.clone(),
        auth::authenticate,
    ));

    Router::new()
        .route("/healthz", get(healthz))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true, "service": "lattice-server" }))
}
