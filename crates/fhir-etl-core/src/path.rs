//! Guarded access into nested resource JSON.
//!
//! Paths are JSON Pointers (RFC 6901), e.g. `/code/coding/0/display`. Every
//! accessor returns `None` as soon as a segment is missing or has the wrong
//! shape, so a single absent field never aborts mapping of the others.

use serde_json::Value;

/// Prefix carried by bundle-local references.
pub const URN_UUID_PREFIX: &str = "urn:uuid:";

/// Returns the value at `pointer`, treating JSON `null` as absent.
pub fn value_at<'a>(value: &'a Value, pointer: &str) -> Option<&'a Value> {
    value.pointer(pointer).filter(|v| !v.is_null())
}

/// Returns the value at `pointer` rendered as text.
///
/// Strings are returned verbatim, numbers and booleans through `to_string`,
/// and objects or arrays as compact JSON.
pub fn text_at(value: &Value, pointer: &str) -> Option<String> {
    value_at(value, pointer).map(to_text)
}

/// Returns the first element of the array at `pointer` matching `predicate`.
pub fn find_first<'a, P>(value: &'a Value, pointer: &str, predicate: P) -> Option<&'a Value>
where
    P: Fn(&Value) -> bool,
{
    value_at(value, pointer)?
        .as_array()?
        .iter()
        .find(|item| predicate(*item))
}

/// Returns true when the text at `pointer` equals `expected` exactly.
pub fn text_eq(value: &Value, pointer: &str, expected: &str) -> bool {
    value_at(value, pointer).and_then(Value::as_str) == Some(expected)
}

/// Text of a reference field with any `urn:uuid:` prefix removed.
pub fn reference_at(value: &Value, pointer: &str) -> Option<String> {
    text_at(value, pointer).map(|r| strip_urn_uuid(&r).to_string())
}

pub fn strip_urn_uuid(reference: &str) -> &str {
    reference.strip_prefix(URN_UUID_PREFIX).unwrap_or(reference)
}

fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
