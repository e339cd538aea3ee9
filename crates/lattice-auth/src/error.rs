//! Error type for the auth pipeline.

use lattice_store::StoreError;
use thiserror::Error;

/// Failures while resolving a credential to an identity.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No credential was presented, or the Authorization header was
    /// malformed. Maps to 401 `missing_token`.
    #[error("no credential presented")]
    MissingCredential,

    /// A credential was presented but did not resolve to a live identity:
    /// unrecognized shape, unknown token, revoked, or expired. Maps to 401
    /// `invalid_token`.
    #[error("credential rejected")]
    NotAuthenticated,

    /// The token store failed. Maps to a 500-class response, never to an
    /// auth failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}
