//! Tagged property values with explicit, per-kind coercion.
//!
//! Entity properties arrive as loosely typed JSON. Instead of coercing
//! ambiently, each declared [`PropertyKind`] has one coercion function that
//! either produces a [`PropertyValue`] or a typed failure naming the
//! offending field and the declared kind.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Declared kind of an entity property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Text,
    Number,
    Boolean,
    Timestamp,
}

impl std::fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Timestamp => "timestamp",
        };
        f.write_str(name)
    }
}

/// A coercion failure, naming the field and the kind it was declared as.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field `{field}` is not a valid {expected}")]
pub struct CoercionError {
    pub field: String,
    pub expected: PropertyKind,
}

/// A typed property value.
///
/// Serialized untagged so entities render as plain JSON objects on the wire.
/// Variant order matters for deserialization: booleans and numbers must win
/// over text, and RFC 3339 strings parse as timestamps before falling back to
/// text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Boolean(bool),
    Number(f64),
    Timestamp(DateTime<Utc>),
    Text(String),
}

impl PropertyValue {
    /// The text content, when this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl PropertyKind {
    /// Coerce a raw JSON value into this kind.
    ///
    /// Accepts the natural JSON representation plus the string renderings the
    /// upstream clients send: numeric strings for numbers, `"true"`/`"false"`
    /// for booleans, RFC 3339 strings or epoch milliseconds for timestamps.
    pub fn coerce(self, field: &str, raw: &Value) -> Result<PropertyValue, CoercionError> {
        let fail = || CoercionError {
            field: field.to_string(),
            expected: self,
        };

        match self {
            Self::Text => raw
                .as_str()
                .map(|s| PropertyValue::Text(s.to_string()))
                .ok_or_else(fail),
            Self::Number => match raw {
                Value::Number(n) => n.as_f64().map(PropertyValue::Number).ok_or_else(fail),
                Value::String(s) => s
                    .trim()
                    .parse::<f64>()
                    .map(PropertyValue::Number)
                    .map_err(|_| fail()),
                _ => Err(fail()),
            },
            Self::Boolean => match raw {
                Value::Bool(b) => Ok(PropertyValue::Boolean(*b)),
                Value::String(s) => match s.trim() {
                    "true" => Ok(PropertyValue::Boolean(true)),
                    "false" => Ok(PropertyValue::Boolean(false)),
                    _ => Err(fail()),
                },
                _ => Err(fail()),
            },
            Self::Timestamp => match raw {
                Value::String(s) => DateTime::parse_from_rfc3339(s)
                    .map(|dt| PropertyValue::Timestamp(dt.with_timezone(&Utc)))
                    .map_err(|_| fail()),
                Value::Number(n) => n
                    .as_i64()
                    .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
                    .map(PropertyValue::Timestamp)
                    .ok_or_else(fail),
                _ => Err(fail()),
            },
        }
    }
}
