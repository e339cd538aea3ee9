//! Fingerprint-keyed introspection cache.
//!
//! Entries are keyed by the token fingerprint, never the plaintext. A hit is
//! never served past its TTL; expired entries are purged lazily whenever a
//! new entry is inserted. Revocation does not evict warm entries — the
//! staleness window is bounded by the TTL and accepted by design.

use lattice_core::Identity;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

struct CacheEntry {
    identity: Identity,
    cached_at: Instant,
}

/// Process-wide cache of successful introspections.
pub struct IntrospectionCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl IntrospectionCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// A cached identity for the fingerprint, unless the entry has aged out.
    pub async fn get(&self, fingerprint: &str) -> Option<Identity> {
        let entries = self.entries.read().await;
        let entry = entries.get(fingerprint)?;
        if entry.cached_at.elapsed() >= self.ttl {
            return None;
        }
        Some(entry.identity.clone())
    }

    /// Cache a successful introspection. Only successes are ever inserted;
    /// negative results must not outlive the request.
    pub async fn insert(&self, fingerprint: String, identity: Identity) {
        let mut entries = self.entries.write().await;
        let ttl = self.ttl;
        entries.retain(|_, e| e.cached_at.elapsed() < ttl);
        entries.insert(
            fingerprint,
            CacheEntry {
                identity,
                cached_at: Instant::now(),
            },
        );
    }

    /// Number of live entries. Test observability.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
