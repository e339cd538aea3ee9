//! Record types crossing the storage boundary.

use chrono::{DateTime, Utc};
use lattice_core::{PropertyKind, PropertyValue};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// A persisted API token. The plaintext secret is never stored; only its
/// SHA-256 hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiTokenRecord {
    pub id: Uuid,
    pub project_id: String,
    pub hashed_secret: String,
    pub name: String,
    pub scopes: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revoked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ApiTokenRecord {
    /// Whether the revocation tombstone is set.
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Whether the token is past its expiry, if it has one.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    /// A token is usable iff it is unrevoked and unexpired. The secret hash
    /// match is implied by lookup, which is keyed on the hash.
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        !self.is_revoked() && !self.is_expired(now)
    }
}

/// Declared shape of an entity type within a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityTypeDef {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub properties: BTreeMap<String, PropertyKind>,
}

/// A stored entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: Uuid,
    pub project_id: String,
    pub type_name: String,
    pub properties: BTreeMap<String, PropertyValue>,
}

/// Version information for the entity schema engine behind the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaVersion {
    pub name: String,
    pub version: String,
    pub revision: u64,
}

/// One user-activity history entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: Uuid,
    pub project_id: Uuid,
    /// Subject id of the identity that recorded the activity.
    pub user: String,
    pub activity_type: String,
    pub payload: serde_json::Value,
    pub recorded_at: DateTime<Utc>,
}

/// Superadmin grant for a user, when one exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuperadminStatus {
    pub user_id: String,
    pub granted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record() -> ApiTokenRecord {
        ApiTokenRecord {
            id: Uuid::new_v4(),
            project_id: "p1".to_string(),
            hashed_secret: "h".to_string(),
            name: "ci".to_string(),
            scopes: BTreeSet::new(),
            expires_at: None,
            revoked_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn validity_requires_unrevoked_and_unexpired() {
        let now = Utc::now();
        assert!(record().is_valid(now));

        let mut revoked = record();
        revoked.revoked_at = Some(now);
        assert!(!revoked.is_valid(now));

        let mut expired = record();
        expired.expires_at = Some(now - Duration::seconds(1));
        assert!(!expired.is_valid(now));

        let mut live = record();
        live.expires_at = Some(now + Duration::hours(1));
        assert!(live.is_valid(now));
    }
}
