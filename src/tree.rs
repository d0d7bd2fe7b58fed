//! Helpers for the loosely-typed record tree.
//!
//! Raw records are plain [`serde_json`] values. Hand-written sources abbreviate
//! freely: a list of one item is often written as the item itself, and empty
//! values stand in for absent ones. The helpers here give those conventions a
//! single definition so every normalizer reads the tree the same way.

use serde_json::{Map, Value};

/// A raw, not yet validated record: a mapping from field names to tree values.
///
/// Keys keep their insertion order.
pub type RawRecord = Map<String, Value>;

/// Converts a value that may be a single item or a sequence into a sequence.
///
/// `null` counts as "nothing" and yields an empty list.
#[must_use]
pub fn into_list(value: Value) -> Vec<Value> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items,
        other => vec![other],
    }
}

/// Borrowing counterpart of [`into_list`].
#[must_use]
pub fn as_list(value: &Value) -> Vec<&Value> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}

/// Whether a value counts as "present" in a relaxed record.
///
/// `null`, `false`, zero, and empty strings, lists or mappings are all falsy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Short name of a value's shape, used in error messages.
#[must_use]
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

/// Renders any value as text.
///
/// Strings are returned as-is; everything else is rendered as compact JSON,
/// which is deterministic because mappings keep insertion order.
#[must_use]
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Looks up `key` and returns it only if it is present and truthy.
#[must_use]
pub fn truthy_field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| is_truthy(v))
}
