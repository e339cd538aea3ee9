//! Tool execution errors.

use crate::protocol::{INTERNAL_ERROR, INVALID_PARAMS};
use lattice_core::CoercionError;
use lattice_store::StoreError;
use thiserror::Error;

/// Errors raised while executing a tool. Converted into JSON-RPC error
/// envelopes by the dispatcher, never into transport failures.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tenant-scoped tool invoked without a project.
    #[error("missing project context: set the X-Project-ID header")]
    MissingProject,

    /// A filter value did not coerce to the declared property kind.
    #[error(transparent)]
    Coercion(#[from] CoercionError),

    /// A filter named a property the entity type does not declare.
    #[error("unknown property `{field}` for entity type `{type_name}`")]
    UnknownProperty { field: String, type_name: String },

    /// No executor handles the tool. Unreachable when the dispatcher
    /// validates against the registry first.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// The storage collaborator failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ToolError {
    /// The JSON-RPC error code this failure maps to.
    pub fn code(&self) -> i32 {
        match self {
            Self::MissingProject
            | Self::Coercion(_)
            | Self::UnknownProperty { .. }
            | Self::UnknownTool(_) => INVALID_PARAMS,
            Self::Store(_) => INTERNAL_ERROR,
        }
    }
}
