//! Utility functions and helpers.

pub mod http;

use serde_json::{Map, Value};

/// Rebuild a JSON value with object keys sorted at every level.
pub fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(sort_map(map)),
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

// `Map` iterates sorted only while serde_json's `preserve_order` is off,
// which any crate in the build can switch on.
fn sort_map(map: &Map<String, Value>) -> Map<String, Value> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
        .into_iter()
        .map(|(k, v)| (k.clone(), sort_keys(v)))
        .collect()
}

/// Compact JSON text of an object with keys sorted at every level.
pub fn canonical_json(map: &Map<String, Value>) -> String {
    Value::Object(sort_map(map)).to_string()
}
