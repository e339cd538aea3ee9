//! Scope-based authorization.

use lattice_core::Identity;

/// Outcome of a scope check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    /// The required scopes the identity does not hold, verbatim.
    Forbidden { missing: Vec<String> },
}

/// Allowed iff every required scope is held. Pure; the missing set is the
/// exact difference `required \ identity.scopes`.
pub fn check(identity: &Identity, required: &[&str]) -> Decision {
    let missing: Vec<String> = required
        .iter()
        .filter(|scope| !identity.has_scope(scope))
        .map(|scope| (*scope).to_string())
        .collect();

    if missing.is_empty() {
        Decision::Allowed
    } else {
        Decision::Forbidden { missing }
    }
}
