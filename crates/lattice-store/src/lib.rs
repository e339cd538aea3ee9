//! Storage collaborator boundary for the Lattice gateway.
//!
//! The gateway never talks to a database directly; everything behind this
//! crate is a simple read/write contract. Each concern gets its own trait so
//! collaborators can be swapped independently. [`memory::InMemoryStore`]
//! implements all of them and backs tests and local runs.

pub mod error;
pub mod memory;
pub mod types;

pub use error::StoreError;
pub use types::{
    ActivityRecord, ApiTokenRecord, Entity, EntityTypeDef, SchemaVersion, SuperadminStatus,
};

use async_trait::async_trait;
use lattice_core::PropertyValue;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Persistence for API token records.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Persist a freshly minted token record.
    async fn insert_token(&self, record: ApiTokenRecord) -> Result<(), StoreError>;

    /// Look up a token by the SHA-256 hash of its secret.
    async fn find_by_secret_hash(
        &self,
        hashed_secret: &str,
    ) -> Result<Option<ApiTokenRecord>, StoreError>;

    /// Set the revocation tombstone on a token. Revoking a token that does
    /// not exist, or is already revoked, is a no-op.
    async fn revoke_token(&self, project_id: &str, token_id: Uuid) -> Result<(), StoreError>;
}

/// Read access to the entity graph, always scoped to a project.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Version of the schema engine behind the store.
    async fn schema_version(&self) -> Result<SchemaVersion, StoreError>;

    /// Entity types declared in the project.
    async fn list_entity_types(&self, project_id: &str) -> Result<Vec<EntityTypeDef>, StoreError>;

    /// A single entity type, if declared.
    async fn entity_type(
        &self,
        project_id: &str,
        type_name: &str,
    ) -> Result<Option<EntityTypeDef>, StoreError>;

    /// Entities of a type matching the (already coerced) property filters.
    /// An unknown type or no matches yields an empty list, not an error.
    async fn query_entities(
        &self,
        project_id: &str,
        type_name: &str,
        filters: &BTreeMap<String, PropertyValue>,
    ) -> Result<Vec<Entity>, StoreError>;

    /// Free-text search across text properties. Empty-result tolerant.
    async fn search_entities(&self, project_id: &str, query: &str)
        -> Result<Vec<Entity>, StoreError>;
}

/// User-activity history.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// Append an activity entry.
    async fn record_activity(&self, record: ActivityRecord) -> Result<(), StoreError>;

    /// Most-recent-first activity for a user, optionally filtered by type.
    async fn recent_activity(
        &self,
        user: &str,
        activity_type: Option<&str>,
    ) -> Result<Vec<ActivityRecord>, StoreError>;

    /// Delete one activity entry. Deleting an entry that does not exist is a
    /// no-op; delete is idempotent.
    async fn delete_activity(
        &self,
        user: &str,
        activity_type: &str,
        id: Uuid,
    ) -> Result<(), StoreError>;
}

/// Superadmin status lookup.
#[async_trait]
pub trait SuperadminStore: Send + Sync {
    /// The user's superadmin grant, or `None` for regular users.
    async fn superadmin_status(
        &self,
        user_id: &str,
    ) -> Result<Option<SuperadminStatus>, StoreError>;
}
