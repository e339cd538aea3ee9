//! API token issuance and revocation.

use crate::context::ProjectContext;
use crate::error::ApiError;
use crate::middleware::auth::require_tokens_manage;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::routing::{delete, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use lattice_auth::token;
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::BTreeSet;
use uuid::Uuid;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/projects/{project_id}/tokens", post(create_token))
        .route_layer(from_fn(require_tokens_manage))
        .route(
            "/api/v1/projects/{project_id}/tokens/{token_id}",
            delete(revoke_token),
        )
}

#[derive(Debug, Deserialize)]
struct CreateTokenRequest {
    name: String,
    #[serde(default)]
    scopes: BTreeSet<String>,
    #[serde(default)]
    expires_at: Option<DateTime<Utc>>,
}

/// Mint a token for the project. The plaintext appears in this response and
/// is never again retrievable.
async fn create_token(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    _ctx: ProjectContext,
    Json(body): Json<CreateTokenRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let minted = token::mint(&project_id, &body.name, body.scopes, body.expires_at);
    let response = json!({
        "id": minted.record.id,
        "token": minted.token,
        "name": minted.record.name,
        "scopes": minted.record.scopes,
        "project_id": minted.record.project_id,
        "created_at": minted.record.created_at,
        "expires_at": minted.record.expires_at,
    });

    state.tokens.insert_token(minted.record).await?;
    tracing::info!(project_id = %project_id, "API token issued");
    Ok((StatusCode::CREATED, Json(response)))
}

/// Set the revocation tombstone. Idempotent: revoking an unknown or already
/// revoked token succeeds.
async fn revoke_token(
    State(state): State<AppState>,
    Path((project_id, token_id)): Path<(String, String)>,
    _ctx: ProjectContext,
) -> Result<Json<Value>, ApiError> {
    let token_id = Uuid::parse_str(&token_id)
        .map_err(|_| ApiError::bad_request("token id must be a UUID"))?;

    state.tokens.revoke_token(&project_id, token_id).await?;
    Ok(Json(json!({ "status": "revoked" })))
}
