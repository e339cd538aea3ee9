//! The wire error type.
//!
//! Every non-2xx response carries the same body shape:
//! `{"error": {"code", "message", "details"?: {"missing": [...]}}}`. Callers
//! match on `error.code`; message text is descriptive, not machine-stable.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lattice_auth::AuthError;
use lattice_store::StoreError;
use serde_json::json;

/// An error response: taxonomy class, stable code, human message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
    missing: Option<Vec<String>>,
}

impl ApiError {
    /// 401: no credential, or a malformed `Authorization` value.
    pub fn missing_token() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            code: "missing_token",
            message: "authentication required".to_string(),
            missing: None,
        }
    }

    /// 401: a credential was presented but rejected.
    pub fn invalid_token() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            code: "invalid_token",
            message: "credential rejected".to_string(),
            missing: None,
        }
    }

    /// 403: valid identity, insufficient scope.
    pub fn forbidden(missing: Vec<String>) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            code: "forbidden",
            message: "insufficient scope".to_string(),
            missing: Some(missing),
        }
    }

    /// 400: malformed input or a missing required header/field.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "bad_request",
            message: message.into(),
            missing: None,
        }
    }

    /// 404: the referenced resource or session does not exist.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            code: "not_found",
            message: message.into(),
            missing: None,
        }
    }

    /// 500: a collaborator failed.
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "internal",
            message: message.into(),
            missing: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut error = json!({
            "code": self.code,
            "message": self.message,
        });
        if let Some(missing) = self.missing {
            error["details"] = json!({ "missing": missing });
        }
        (self.status, Json(json!({ "error": error }))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredential => Self::missing_token(),
            AuthError::NotAuthenticated => Self::invalid_token(),
            AuthError::Store(e) => Self::from(e),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err, "storage collaborator failed");
        Self::internal("storage unavailable")
    }
}
