use sdkdiff_core::{Diff, TypeOfChange};
use serde_json::Value;

/// Unwrap a `json!([...])` literal into a record vector
#[allow(dead_code)]
pub fn records(v: Value) -> Vec<Value> {
    match v {
        Value::Array(items) => items,
        other => panic!("expected a JSON array, got {}", other),
    }
}

/// Entry ids in diff order, rendered as strings
#[allow(dead_code)]
pub fn ids(diff: &Diff) -> Vec<String> {
    diff.ids().map(|id| id.to_string()).collect()
}

/// `(id, classification)` pairs in diff order
#[allow(dead_code)]
pub fn classified(diff: &Diff) -> Vec<(String, TypeOfChange)> {
    diff.iter()
        .map(|e| (e.id().to_string(), e.type_of_change()))
        .collect()
}
