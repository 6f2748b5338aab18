//! Raw record representation at the store boundary.
//!
//! The remote store speaks JSON objects: an ordered field-name → value mapping
//! with at least a primary-key field. Everything crossing the [`RemoteStore`]
//! boundary is a [`RawRecord`]; typed models convert to and from it via serde.
//!
//! [`RemoteStore`]: https://docs.rs/refbase-store

use serde_json::{Map, Value};

/// A raw record as stored in a remote collection: a JSON object map.
pub type RawRecord = Map<String, Value>;

/// Name of the primary-key field every stored record carries.
pub const KEY_FIELD: &str = "key";

/// Read the primary key of a raw record.
///
/// Returns `None` when the key field is missing, null, or empty — a record in
/// that state has not been assigned a key by the store yet.
pub fn record_key(record: &RawRecord) -> Option<&str> {
    match record.get(KEY_FIELD) {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}

/// Set the primary key of a raw record, replacing any existing value.
pub fn set_record_key(record: &mut RawRecord, key: impl Into<String>) {
    record.insert(KEY_FIELD.to_string(), Value::String(key.into()));
}

/// Read a string-valued field, treating null and empty as absent.
pub fn string_field<'a>(record: &'a RawRecord, name: &str) -> Option<&'a str> {
    match record.get(name) {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}

/// Read a field holding a list of strings.
///
/// Null and missing fields yield an empty list; non-string and empty elements
/// are skipped. Key lists arrive from the store in exactly this shape.
pub fn string_list_field<'a>(record: &'a RawRecord, name: &str) -> Vec<&'a str> {
    match record.get(name) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| match v {
                Value::String(s) if !s.is_empty() => Some(s.as_str()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}
