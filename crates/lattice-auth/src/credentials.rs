//! Credential extraction and classification.
//!
//! Pure parse/classify: no I/O, no config. The `Authorization` header wins;
//! the `token` query parameter is a fallback for streaming clients that
//! cannot set headers. A header that is present but not `Bearer `-shaped
//! (or empty after the prefix) counts as no credential at all.

use crate::dev;
use crate::token::TOKEN_PREFIX;

/// A classified credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// One of the fixed development identifiers.
    Static(String),
    /// An opaque `lat_` API token requiring backend introspection.
    ApiToken(String),
    /// A bearer value in neither recognized shape.
    Unrecognized(String),
}

/// Extract and classify the request credential.
///
/// `authorization` is the raw `Authorization` header value, `query` the raw
/// request query string. Returns `None` when no usable credential is present
/// (including a malformed header).
pub fn resolve(authorization: Option<&str>, query: Option<&str>) -> Option<Credential> {
    if let Some(header) = authorization {
        return bearer_value(header).map(classify);
    }
    query
        .and_then(token_query_param)
        .map(|t| classify(t.to_string()))
}

fn bearer_value(header: &str) -> Option<String> {
    let rest = header.strip_prefix("Bearer ")?.trim();
    if rest.is_empty() {
        return None;
    }
    Some(rest.to_string())
}

/// Pull `token=...` out of a raw query string. Token values are URL-safe
/// alphanumerics, so no percent-decoding is needed.
fn token_query_param(query: &str) -> Option<&str> {
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("token="))
        .filter(|v| !v.is_empty())
}

fn classify(value: String) -> Credential {
    if dev::IDENTIFIERS.contains(&value.as_str()) {
        Credential::Static(value)
    } else if value.starts_with(TOKEN_PREFIX) {
        Credential::ApiToken(value)
    } else {
        Credential::Unrecognized(value)
    }
}
