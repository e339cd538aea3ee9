//! Tenant context extraction.

use crate::error::ApiError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

/// Header carrying the project id on tenant-scoped routes.
pub const PROJECT_HEADER: &str = "x-project-id";
/// Optional organization header, passed through verbatim.
pub const ORG_HEADER: &str = "x-org-id";

/// Tenant context for a tenant-scoped route.
///
/// Extraction fails with a 400 client error when the project header is
/// absent — distinct from both auth failure classes. Values are passed
/// through verbatim; format validation belongs to the downstream
/// collaborator.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub project_id: String,
    pub org_id: Option<String>,
}

impl<S> FromRequestParts<S> for ProjectContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let project_id = parts
            .headers
            .get(PROJECT_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ApiError::bad_request("missing X-Project-ID header"))?
            .to_string();

        let org_id = parts
            .headers
            .get(ORG_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from);

        Ok(Self { project_id, org_id })
    }
}
