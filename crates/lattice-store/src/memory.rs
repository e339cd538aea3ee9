//! In-memory storage backend.
//!
//! Backs tests and local runs. Tables are `RwLock`-guarded maps owned by the
//! store value; the gateway holds the store behind `Arc` in its state.

use crate::error::StoreError;
use crate::types::{
    ActivityRecord, ApiTokenRecord, Entity, EntityTypeDef, SchemaVersion, SuperadminStatus,
};
use crate::{ActivityStore, EntityStore, SuperadminStore, TokenStore};
use async_trait::async_trait;
use chrono::Utc;
use lattice_core::PropertyValue;
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;
use uuid::Uuid;

/// In-memory implementation of every storage trait.
#[derive(Default)]
pub struct InMemoryStore {
    tokens: RwLock<HashMap<Uuid, ApiTokenRecord>>,
    entity_types: RwLock<HashMap<String, Vec<EntityTypeDef>>>,
    entities: RwLock<HashMap<String, Vec<Entity>>>,
    activity: RwLock<Vec<ActivityRecord>>,
    superadmins: RwLock<HashMap<String, SuperadminStatus>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an entity type in a project. Seeding helper for tests and
    /// local runs.
    pub fn add_entity_type(&self, project_id: &str, def: EntityTypeDef) {
        let mut types = self.entity_types.write().unwrap_or_else(|e| e.into_inner());
        types.entry(project_id.to_string()).or_default().push(def);
    }

    /// Insert an entity. Seeding helper.
    pub fn add_entity(&self, entity: Entity) {
        let mut entities = self.entities.write().unwrap_or_else(|e| e.into_inner());
        entities
            .entry(entity.project_id.clone())
            .or_default()
            .push(entity);
    }

    /// Grant superadmin status to a user. Seeding helper.
    pub fn grant_superadmin(&self, user_id: &str) {
        let mut admins = self.superadmins.write().unwrap_or_else(|e| e.into_inner());
        admins.insert(
            user_id.to_string(),
            SuperadminStatus {
                user_id: user_id.to_string(),
                granted_at: Utc::now(),
            },
        );
    }
}

#[async_trait]
impl TokenStore for InMemoryStore {
    async fn insert_token(&self, record: ApiTokenRecord) -> Result<(), StoreError> {
        let mut tokens = self.tokens.write().map_err(|_| StoreError::LockPoisoned)?;
        tokens.insert(record.id, record);
        Ok(())
    }

    async fn find_by_secret_hash(
        &self,
        hashed_secret: &str,
    ) -> Result<Option<ApiTokenRecord>, StoreError> {
        let tokens = self.tokens.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(tokens
            .values()
            .find(|t| t.hashed_secret == hashed_secret)
            .cloned())
    }

    async fn revoke_token(&self, project_id: &str, token_id: Uuid) -> Result<(), StoreError> {
        let mut tokens = self.tokens.write().map_err(|_| StoreError::LockPoisoned)?;
        if let Some(record) = tokens.get_mut(&token_id) {
            if record.project_id == project_id && record.revoked_at.is_none() {
                record.revoked_at = Some(Utc::now());
            }
        }
        Ok(())
    }
}

#[async_trait]
impl EntityStore for InMemoryStore {
    async fn schema_version(&self) -> Result<SchemaVersion, StoreError> {
        Ok(SchemaVersion {
            name: "lattice-graph".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            revision: 1,
        })
    }

    async fn list_entity_types(&self, project_id: &str) -> Result<Vec<EntityTypeDef>, StoreError> {
        let types = self
            .entity_types
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        Ok(types.get(project_id).cloned().unwrap_or_default())
    }

    async fn entity_type(
        &self,
        project_id: &str,
        type_name: &str,
    ) -> Result<Option<EntityTypeDef>, StoreError> {
        let types = self
            .entity_types
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        Ok(types
            .get(project_id)
            .and_then(|defs| defs.iter().find(|d| d.name == type_name))
            .cloned())
    }

    async fn query_entities(
        &self,
        project_id: &str,
        type_name: &str,
        filters: &BTreeMap<String, PropertyValue>,
    ) -> Result<Vec<Entity>, StoreError> {
        let entities = self.entities.read().map_err(|_| StoreError::LockPoisoned)?;
        let matches = entities
            .get(project_id)
            .map(|list| {
                list.iter()
                    .filter(|e| e.type_name == type_name)
                    .filter(|e| {
                        filters
                            .iter()
                            .all(|(field, want)| e.properties.get(field) == Some(want))
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(matches)
    }

    async fn search_entities(
        &self,
        project_id: &str,
        query: &str,
    ) -> Result<Vec<Entity>, StoreError> {
        let needle = query.to_lowercase();
        let entities = self.entities.read().map_err(|_| StoreError::LockPoisoned)?;
        let matches = entities
            .get(project_id)
            .map(|list| {
                list.iter()
                    .filter(|e| {
                        e.properties.values().any(|v| {
                            v.as_text()
                                .is_some_and(|t| t.to_lowercase().contains(&needle))
                        })
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(matches)
    }
}

#[async_trait]
impl ActivityStore for InMemoryStore {
    async fn record_activity(&self, record: ActivityRecord) -> Result<(), StoreError> {
        let mut activity = self.activity.write().map_err(|_| StoreError::LockPoisoned)?;
        activity.push(record);
        Ok(())
    }

    async fn recent_activity(
        &self,
        user: &str,
        activity_type: Option<&str>,
    ) -> Result<Vec<ActivityRecord>, StoreError> {
        let activity = self.activity.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut entries: Vec<_> = activity
            .iter()
            .filter(|a| a.user == user)
            .filter(|a| activity_type.is_none_or(|t| a.activity_type == t))
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(entries)
    }

    async fn delete_activity(
        &self,
        user: &str,
        activity_type: &str,
        id: Uuid,
    ) -> Result<(), StoreError> {
        let mut activity = self.activity.write().map_err(|_| StoreError::LockPoisoned)?;
        activity.retain(|a| !(a.user == user && a.activity_type == activity_type && a.id == id));
        Ok(())
    }
}

#[async_trait]
impl SuperadminStore for InMemoryStore {
    async fn superadmin_status(
        &self,
        user_id: &str,
    ) -> Result<Option<SuperadminStatus>, StoreError> {
        let admins = self
            .superadmins
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        Ok(admins.get(user_id).cloned())
    }
}
