//! API token format: minting, hashing, fingerprinting.
//!
//! A token string is `lat_` followed by a random alphanumeric secret. The
//! plaintext is returned exactly once at creation; the store only ever sees
//! its SHA-256 hash.

use chrono::{DateTime, Utc};
use lattice_store::ApiTokenRecord;
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Prefix identifying Lattice API tokens.
pub const TOKEN_PREFIX: &str = "lat_";

const SECRET_LEN: usize = 40;

/// A freshly minted token: the record to persist plus the plaintext that is
/// shown to the caller once and never again retrievable.
#[derive(Debug)]
pub struct MintedToken {
    pub record: ApiTokenRecord,
    pub token: String,
}

/// Mint a new API token for a project.
pub fn mint(
    project_id: &str,
    name: &str,
    scopes: BTreeSet<String>,
    expires_at: Option<DateTime<Utc>>,
) -> MintedToken {
    let secret: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SECRET_LEN)
        .map(char::from)
        .collect();
    let token = format!("{TOKEN_PREFIX}{secret}");

    let record = ApiTokenRecord {
        id: Uuid::new_v4(),
        project_id: project_id.to_string(),
        hashed_secret: hash_secret(&token),
        name: name.to_string(),
        scopes,
        expires_at,
        revoked_at: None,
        created_at: Utc::now(),
    };

    MintedToken { record, token }
}

/// The hash the store is keyed by: SHA-256 of the full token string.
pub fn hash_secret(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Cache key for introspection results. Domain-separated from
/// [`hash_secret`] so cache keys and stored hashes never coincide.
pub fn fingerprint(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"introspect:");
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
