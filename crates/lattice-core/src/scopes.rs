//! The flat scope catalog.
//!
//! Scopes are opaque permission names; there is no hierarchy. The catalog is
//! enumerable so "all scopes" identities and tokens can be granted the full
//! set.

use std::collections::BTreeSet;

/// Read entities and entity types.
pub const ENTITIES_READ: &str = "entities:read";
/// Create and update entities.
pub const ENTITIES_WRITE: &str = "entities:write";
/// Read documents.
pub const DOCUMENTS_READ: &str = "documents:read";
/// Create and update documents.
pub const DOCUMENTS_WRITE: &str = "documents:write";
/// Read tenant data through the query tools.
pub const DATA_READ: &str = "data:read";
/// Mutate tenant data through the query tools.
pub const DATA_WRITE: &str = "data:write";
/// Issue and revoke API tokens.
pub const TOKENS_MANAGE: &str = "tokens:manage";

/// Every scope the gateway knows about.
pub const CATALOG: &[&str] = &[
    ENTITIES_READ,
    ENTITIES_WRITE,
    DOCUMENTS_READ,
    DOCUMENTS_WRITE,
    DATA_READ,
    DATA_WRITE,
    TOKENS_MANAGE,
];

/// The full catalog as an owned set.
pub fn all() -> BTreeSet<String> {
    CATALOG.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_no_duplicates() {
        assert_eq!(all().len(), CATALOG.len());
    }
}
