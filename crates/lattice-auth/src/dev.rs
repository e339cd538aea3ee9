//! Fixed development identities.
//!
//! Test fixtures only, never a general auth path. The whole branch is gated
//! behind `auth.dev_tokens` in config so production builds disable it; see
//! [`crate::introspect::TokenIntrospector`].

use lattice_core::{Identity, scopes};

/// Full-catalog admin.
pub const ADMIN: &str = "lat-dev-admin";
/// A fixed named-scope subset.
pub const RESTRICTED: &str = "lat-dev-restricted";
/// Zero scopes.
pub const NO_SCOPES: &str = "lat-dev-empty";
/// Every scope in the catalog.
pub const FULL_CATALOG: &str = "lat-dev-full";

/// The identifiers the credential classifier recognizes as static.
pub const IDENTIFIERS: &[&str] = &[ADMIN, RESTRICTED, NO_SCOPES, FULL_CATALOG];

/// The fixed identity for a static identifier. Deterministic: every call
/// returns the same subject and scope set.
pub fn identity_for(identifier: &str) -> Option<Identity> {
    match identifier {
        ADMIN => Some(
            Identity::new("user:dev-admin")
                .with_user("dev-admin")
                .with_scopes(scopes::all()),
        ),
        RESTRICTED => Some(
            Identity::new("user:dev-restricted")
                .with_user("dev-restricted")
                .with_scopes([scopes::ENTITIES_READ, scopes::DOCUMENTS_READ]),
        ),
        NO_SCOPES => Some(Identity::new("user:dev-empty").with_user("dev-empty")),
        FULL_CATALOG => Some(
            Identity::new("user:dev-full")
                .with_user("dev-full")
                .with_scopes(scopes::all()),
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identities_are_deterministic() {
        for id in IDENTIFIERS {
            assert_eq!(identity_for(id), identity_for(id));
        }
    }

    #[test]
    fn full_catalog_variant_covers_the_catalog() {
        let identity = identity_for(FULL_CATALOG).unwrap();
        assert_eq!(identity.scopes.len(), scopes::CATALOG.len());
    }

    #[test]
    fn empty_variant_has_no_scopes() {
        assert!(identity_for(NO_SCOPES).unwrap().scopes.is_empty());
    }
}
