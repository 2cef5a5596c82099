//! Deep structural equivalence over JSON values.
//!
//! `serde_json::Value`'s own `PartialEq` distinguishes `1` from `1.0`;
//! record comparison must not, so numbers are compared by numeric value.

use serde_json::{Map, Value};

/// Decide whether two optional values represent "no change".
///
/// `None` stands for an absent property. Two absent values are equivalent;
/// an absent value is never equivalent to a present one, including `null`.
pub fn equivalent(a: Option<&Value>, b: Option<&Value>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => values_equivalent(a, b),
        _ => false,
    }
}

/// Deep equality of two present values.
pub fn values_equivalent(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(l, r)| values_equivalent(l, r))
        }
        (Value::Object(x), Value::Object(y)) => objects_equivalent(x, y),
        _ => false,
    }
}

fn objects_equivalent(a: &Map<String, Value>, b: &Map<String, Value>) -> bool {
    a.len() == b.len()
        && a.iter()
            .all(|(k, v)| b.get(k).is_some_and(|other| values_equivalent(v, other)))
}

fn numbers_equal(a: &serde_json::Number, b: &serde_json::Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

/// Remove null-valued object keys, recursively.
///
/// Callers that want "absent" and "null" to compare equal normalize both
/// sides with this before handing records to the engine.
pub fn strip_nulls(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(strip_nulls).collect()),
        other => other.clone(),
    }
}
