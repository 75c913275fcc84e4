use serde_json::json;
use sideload_types::{coerce_id, coerce_optional_id};

// ── coerce_id ─────────────────────────────────────────────────────

#[test]
fn null_stays_null() {
    assert_eq!(coerce_id(&json!(null)), None);
}

#[test]
fn number_becomes_string() {
    assert_eq!(coerce_id(&json!(5)).as_deref(), Some("5"));
}

#[test]
fn string_is_unchanged() {
    assert_eq!(coerce_id(&json!("5")).as_deref(), Some("5"));
}

#[test]
fn number_and_string_compare_equal() {
    assert_eq!(coerce_id(&json!(42)), coerce_id(&json!("42")));
}

#[test]
fn negative_and_large_numbers() {
    assert_eq!(coerce_id(&json!(-3)).as_deref(), Some("-3"));
    assert_eq!(coerce_id(&json!(u64::MAX)).as_deref(), Some("18446744073709551615"));
}

#[test]
fn boolean_is_stringified() {
    assert_eq!(coerce_id(&json!(true)).as_deref(), Some("true"));
}

#[test]
fn empty_string_is_still_an_id() {
    assert_eq!(coerce_id(&json!("")).as_deref(), Some(""));
}

// ── coerce_optional_id ────────────────────────────────────────────

#[test]
fn missing_value_is_none() {
    assert_eq!(coerce_optional_id(None), None);
}

#[test]
fn present_value_is_coerced() {
    let v = json!(7);
    assert_eq!(coerce_optional_id(Some(&v)).as_deref(), Some("7"));
}
