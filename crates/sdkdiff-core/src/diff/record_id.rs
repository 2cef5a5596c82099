//! Record identity keys.
//!
//! Id values are arbitrary JSON, so they are normalized into a hashable
//! [`RecordId`] before they key the diff lookup tables.

use serde::{Serialize, Serializer};
use serde_json::Value;

/// Hashable key derived from a record's id value.
///
/// A record with no id value at all is keyed by [`RecordId::Missing`], which
/// is distinct from an explicit JSON `null` id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordId {
    /// The record has no id property (or is not an object)
    Missing,
    /// The id property is JSON `null`
    Null,
    Bool(bool),
    /// Numeric id in normalized form, so `1` and `1.0` share a key
    Number(String),
    Text(String),
    /// Canonical JSON of an array or object id
    Composite(String),
}

impl RecordId {
    /// Derive the key for `record[id_field]`.
    pub fn of_record(record: &Value, id_field: &str) -> Self {
        Self::from_value(record.get(id_field))
    }

    /// Derive the key for an optional id value.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None => RecordId::Missing,
            Some(Value::Null) => RecordId::Null,
            Some(Value::Bool(b)) => RecordId::Bool(*b),
            Some(Value::Number(n)) => RecordId::Number(normalize_number(n)),
            Some(Value::String(s)) => RecordId::Text(s.clone()),
            Some(other) => RecordId::Composite(other.to_string()),
        }
    }

    /// The id as a JSON value, `None` for [`RecordId::Missing`].
    ///
    /// Numeric ids come back in their normalized form.
    pub fn to_value(&self) -> Option<Value> {
        match self {
            RecordId::Missing => None,
            RecordId::Null => Some(Value::Null),
            RecordId::Bool(b) => Some(Value::Bool(*b)),
            RecordId::Number(n) | RecordId::Composite(n) => serde_json::from_str(n).ok(),
            RecordId::Text(s) => Some(Value::String(s.clone())),
        }
    }

    /// True for ids that no record actually carried.
    pub fn is_missing(&self) -> bool {
        matches!(self, RecordId::Missing)
    }
}

fn normalize_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 9.007_199_254_740_992e15 => {
            format!("{}", f as i64)
        }
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordId::Missing => write!(f, "<missing>"),
            RecordId::Null => write!(f, "null"),
            RecordId::Bool(b) => write!(f, "{}", b),
            RecordId::Number(n) | RecordId::Text(n) | RecordId::Composite(n) => {
                write!(f, "{}", n)
            }
        }
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId::Text(s)
    }
}

impl From<&RecordId> for RecordId {
    fn from(id: &RecordId) -> Self {
        id.clone()
    }
}

impl From<&Value> for RecordId {
    fn from(value: &Value) -> Self {
        RecordId::from_value(Some(value))
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.to_value() {
            Some(v) => v.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}
