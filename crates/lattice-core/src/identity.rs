//! The resolved principal attached to every authenticated request.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The principal a credential resolved to: subject, optional backing user,
/// and the granted scope set.
///
/// Constructed once per successful authentication, attached to the request as
/// an axum extension for the request's lifetime, and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable subject identifier: a user id for development identities, the
    /// token id for API tokens.
    pub subject_id: String,

    /// Backing user account, when the credential is tied to one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Granted permission scopes. Flat set, no hierarchy.
    pub scopes: BTreeSet<String>,
}

impl Identity {
    /// Create an identity with no user binding and no scopes.
    pub fn new(subject_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            user_id: None,
            scopes: BTreeSet::new(),
        }
    }

    /// Bind the identity to a user account.
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Replace the scope set.
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the identity holds the named scope.
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.contains(scope)
    }
}
