//! MCP session lifecycle.
//!
//! One table of live sessions keyed by generated session id, plus a tombstone
//! set for explicitly terminated ids. The distinction matters at the
//! transport: an unknown id is a protocol error inside the envelope, a
//! terminated id is HTTP 404.

use chrono::{DateTime, Utc};
use lattice_core::Identity;
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

/// A live MCP session.
#[derive(Debug, Clone)]
pub struct McpSession {
    pub session_id: String,
    pub identity: Identity,
    pub protocol_version: String,
    pub created_at: DateTime<Utc>,
    last_seen: Instant,
    pub initialized: bool,
}

/// Result of looking up a session id.
#[derive(Debug, Clone)]
pub enum SessionLookup {
    Active(McpSession),
    /// Never created, or aged out past the idle TTL.
    Unknown,
    /// Explicitly terminated; references answer with transport 404.
    Terminated,
}

/// Result of terminating a session id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminateOutcome {
    Terminated,
    NotFound,
}

/// Process-wide session table.
///
/// Sessions expire lazily: an entry past the idle TTL is dropped on its next
/// lookup and behaves as unknown. Only explicit termination produces a
/// tombstone.
pub struct SessionManager {
    idle_ttl: Duration,
    sessions: RwLock<HashMap<String, McpSession>>,
    terminated: RwLock<HashSet<String>>,
}

impl SessionManager {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            idle_ttl,
            sessions: RwLock::new(HashMap::new()),
            terminated: RwLock::new(HashSet::new()),
        }
    }

    /// Create an initialized session with a generated, unguessable id.
    pub async fn create(&self, identity: Identity, protocol_version: String) -> McpSession {
        let session = McpSession {
            session_id: Uuid::new_v4().to_string(),
            identity,
            protocol_version,
            created_at: Utc::now(),
            last_seen: Instant::now(),
            initialized: true,
        };

        let mut sessions = self.sessions.write().await;
        sessions.insert(session.session_id.clone(), session.clone());
        tracing::debug!(session_id = %session.session_id, "MCP session created");
        session
    }

    /// Look up a session, refreshing its idle clock on a hit.
    pub async fn lookup(&self, session_id: &str) -> SessionLookup {
        if self.terminated.read().await.contains(session_id) {
            return SessionLookup::Terminated;
        }

        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(session_id) {
            Some(session) if session.last_seen.elapsed() < self.idle_ttl => {
                session.last_seen = Instant::now();
                SessionLookup::Active(session.clone())
            }
            Some(_) => {
                sessions.remove(session_id);
                SessionLookup::Unknown
            }
            None => SessionLookup::Unknown,
        }
    }

    /// Terminate a session. Unknown and already-terminated ids both report
    /// not-found; a successful termination is visible to every subsequent
    /// lookup.
    pub async fn terminate(&self, session_id: &str) -> TerminateOutcome {
        let removed = self.sessions.write().await.remove(session_id);
        match removed {
            Some(_) => {
                self.terminated
                    .write()
                    .await
                    .insert(session_id.to_string());
                tracing::debug!(session_id, "MCP session terminated");
                TerminateOutcome::Terminated
            }
            None => TerminateOutcome::NotFound,
        }
    }

    /// Number of live sessions. Test observability.
    pub async fn live_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
