//! Superadmin status.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::routing::get;
use axum::{Extension, Json, Router};
use lattice_core::Identity;
use lattice_store::SuperadminStatus;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/superadmin/me", get(me))
}

/// The caller's superadmin grant, or `null` for everyone else. Tenant
/// headers are ignored here; identities without a user binding (plain API
/// tokens) are never superadmins.
async fn me(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Option<SuperadminStatus>>, ApiError> {
    let Some(user_id) = identity.user_id else {
        return Ok(Json(None));
    };
    let status = state.superadmins.superadmin_status(&user_id).await?;
    Ok(Json(status))
}
