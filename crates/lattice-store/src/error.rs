//! Error type for the storage boundary.

use thiserror::Error;

/// Errors a storage backend can report.
///
/// These surface as 500-class failures at the HTTP boundary; they are never
/// converted into authentication or authorization outcomes.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not be reached or refused the operation.
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    /// A shared in-process table was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    LockPoisoned,
}
