//! Identifier coercion.
//!
//! Ids arrive as JSON numbers from one backend and as strings from another.
//! Every identity comparison goes through [`coerce_id`] so `5`, `5.0` and
//! `"5"` all name the same record.

use serde_json::Value;

use crate::Hash;

/// Coerces a JSON id into its string form. `null` stays absent.
pub fn coerce_id(id: &Value) -> Option<String> {
    match id {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_to_string(n)),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Like [`coerce_id`], treating a missing value as `null`.
pub fn coerce_optional_id(id: Option<&Value>) -> Option<String> {
    id.and_then(coerce_id)
}

/// The coerced `id` field of a record hash.
pub fn record_id(hash: &Hash) -> Option<String> {
    coerce_optional_id(hash.get("id"))
}

fn number_to_string(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        // Integral floats print without a fraction, so 5.0 and 5 agree.
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.007_199_254_740_992e15 => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}
