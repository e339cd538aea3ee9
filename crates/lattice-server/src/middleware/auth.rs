//! Authentication and scope-enforcement middleware.
//!
//! `authenticate` gates every protected route: resolver → introspector →
//! identity extension. Scope guards are separate route layers so a caller
//! with insufficient scope sees 403 before any tenant-header check can
//! produce a 400.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use lattice_auth::{AuthError, Decision, credentials, enforce};
use lattice_core::{Identity, scopes};

/// Resolve the request credential into an [`Identity`] extension, or answer
/// with the appropriate 401.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let Some(credential) = credentials::resolve(authorization, req.uri().query()) else {
        return ApiError::missing_token().into_response();
    };

    match state.introspector.resolve(&credential).await {
        Ok(identity) => {
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        Err(err @ AuthError::Store(_)) => ApiError::from(err).into_response(),
        Err(_) => ApiError::invalid_token().into_response(),
    }
}

/// Route guard: `data:read`.
pub async fn require_data_read(req: Request, next: Next) -> Response {
    match scope_gate(&req, &[scopes::DATA_READ]) {
        Ok(()) => next.run(req).await,
        Err(err) => err.into_response(),
    }
}

/// Route guard: `tokens:manage`.
pub async fn require_tokens_manage(req: Request, next: Next) -> Response {
    match scope_gate(&req, &[scopes::TOKENS_MANAGE]) {
        Ok(()) => next.run(req).await,
        Err(err) => err.into_response(),
    }
}

fn scope_gate(req: &Request, required: &[&str]) -> Result<(), ApiError> {
    // The authenticate layer runs outside every scope guard.
    let identity = req
        .extensions()
        .get::<Identity>()
        .ok_or_else(ApiError::missing_token)?;

    match enforce::check(identity, required) {
        Decision::Allowed => Ok(()),
        Decision::Forbidden { missing } => Err(ApiError::forbidden(missing)),
    }
}
