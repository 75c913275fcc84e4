//! Shape checks over root-keyed payloads.
//!
//! A payload is `{ <root>: <object> | [<object>, ...], ... }`. A root name
//! prefixed with `_` marks its records as secondary regardless of type.

use serde_json::Value;

use crate::{Error, Hash, Result};

/// Prefix that forces a root's records to be treated as secondary.
pub const SECONDARY_PREFIX: char = '_';

/// Unwraps the top-level object of a payload.
pub fn into_roots(payload: Value) -> Result<Hash> {
    match payload {
        Value::Object(roots) => Ok(roots),
        other => Err(Error::MalformedPayload(format!(
            "expected a root-keyed object, got {}",
            kind_of(&other)
        ))),
    }
}

/// Splits a root name into the name used for type resolution and whether
/// the root was marked secondary.
///
/// `_tasks` → `("tasks", true)`, `tasks` → `("tasks", false)`.
pub fn split_root(root: &str) -> (&str, bool) {
    match root.strip_prefix(SECONDARY_PREFIX) {
        Some(rest) if !rest.is_empty() => (rest, true),
        _ => (root, false),
    }
}

/// The records under one root, always as a sequence.
///
/// A single object becomes a one-element sequence and `null` becomes an
/// empty one. Anything else under a root is malformed.
pub fn records(root: &str, value: Value) -> Result<Vec<Hash>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Object(hash) => Ok(vec![hash]),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(hash) => Ok(hash),
                other => Err(Error::MalformedPayload(format!(
                    "{root}[{i}]: expected a record object, got {}",
                    kind_of(&other)
                ))),
            })
            .collect(),
        other => Err(Error::MalformedPayload(format!(
            "{root}: expected a record or a list of records, got {}",
            kind_of(&other)
        ))),
    }
}

/// Human-readable JSON kind, for error messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
