//! Record collection diff engine.
//!
//! The core entry point is [`compare`], which classifies two collections of
//! keyed records into a single ordered [`Diff`].

use crate::diff::model::{Diff, DiffEntry};
use crate::diff::record_id::RecordId;
use crate::errors::{Result, SdkDiffError};
use sdkdiff_core_types::schema::{SIDE_BASE, SIDE_MAIN};
use serde_json::Value;
use std::collections::HashMap;

/// Id property used when the caller does not name one.
pub const DEFAULT_ID_FIELD: &str = "id";

/// Build an id → record lookup. Later records win over earlier ones with the
/// same id.
fn lookup<'a>(records: &'a [Value], id_field: &str) -> HashMap<RecordId, &'a Value> {
    records
        .iter()
        .map(|record| (RecordId::of_record(record, id_field), record))
        .collect()
}

/// Classify two record collections into an ordered diff.
///
/// Entries come out in two runs: first the `REMOVED` entries in
/// `base_records` order, then the `ADDED`/`MODIFIED`/`UNCHANGED` entries in
/// `main_records` order. The result holds exactly one entry per distinct id
/// across both inputs. Records with no id value are keyed by
/// [`RecordId::Missing`].
pub fn compare(main_records: &[Value], base_records: &[Value], id_field: &str) -> Diff {
    let main_lookup = lookup(main_records, id_field);
    let base_lookup = lookup(base_records, id_field);

    let mut diff = Diff::new();

    for record in base_records {
        let id = RecordId::of_record(record, id_field);
        if !main_lookup.contains_key(&id) {
            diff.add(DiffEntry::removed(id, record.clone()));
        }
    }

    for record in main_records {
        let id = RecordId::of_record(record, id_field);
        match base_lookup.get(&id) {
            None => diff.add(DiffEntry::added(id, record.clone())),
            Some(base) => diff.add(DiffEntry::compared(id, record.clone(), (*base).clone())),
        }
    }

    diff
}

/// [`compare`] over untyped JSON inputs.
///
/// `id_field` falls back to [`DEFAULT_ID_FIELD`].
///
/// # Errors
///
/// - `RecordsNotASequence`: either input is not a JSON array
pub fn compare_values(main: &Value, base: &Value, id_field: Option<&str>) -> Result<Diff> {
    let main_records = as_records(main, SIDE_MAIN)?;
    let base_records = as_records(base, SIDE_BASE)?;
    Ok(compare(
        main_records,
        base_records,
        id_field.unwrap_or(DEFAULT_ID_FIELD),
    ))
}

fn as_records<'a>(value: &'a Value, side: &str) -> Result<&'a [Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| SdkDiffError::RecordsNotASequence {
            side: side.to_string(),
            found: json_type_name(value).to_string(),
        })
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::model::TypeOfChange;
    use serde_json::json;

    fn records(v: Value) -> Vec<Value> {
        v.as_array().cloned().unwrap()
    }

    #[test]
    fn test_empty_inputs_yield_empty_diff() {
        let diff = compare(&[], &[], DEFAULT_ID_FIELD);
        assert!(diff.is_empty());
    }

    #[test]
    fn test_removed_run_precedes_main_run() {
        let main = records(json!([{"id": "a"}, {"id": "b"}]));
        let base = records(json!([{"id": "c"}, {"id": "a"}, {"id": "d"}]));
        let diff = compare(&main, &base, "id");
        let ids: Vec<String> = diff.ids().map(|id| id.to_string()).collect();
        assert_eq!(ids, vec!["c", "d", "a", "b"]);
    }

    #[test]
    fn test_custom_id_field() {
        let main = records(json!([{"subTypeId": "1", "v": 1}]));
        let base = records(json!([{"subTypeId": "1", "v": 2}]));
        let diff = compare(&main, &base, "subTypeId");
        assert_eq!(diff.len(), 1);
        assert_eq!(
            diff.get("1").map(|e| e.type_of_change()),
            Some(TypeOfChange::Modified)
        );
    }

    #[test]
    fn test_duplicate_ids_last_wins() {
        let main = records(json!([{"id": "a", "v": 1}, {"id": "a", "v": 2}]));
        let base = records(json!([{"id": "a", "v": 2}]));
        let diff = compare(&main, &base, "id");
        assert_eq!(diff.len(), 1);
        let entry = diff.get("a").unwrap();
        assert_eq!(entry.type_of_change(), TypeOfChange::Unchanged);
        assert_eq!(entry.get("v"), Some(&json!(2)));
    }

    #[test]
    fn test_records_without_id_do_not_crash() {
        let main = records(json!([{"name": "anon"}, "scalar"]));
        let base = records(json!([]));
        let diff = compare(&main, &base, "id");
        assert_eq!(diff.len(), 1);
        assert!(diff.get(RecordId::Missing).is_some());
    }

    #[test]
    fn test_compare_values_rejects_non_arrays() {
        let err = compare_values(&json!({"id": "a"}), &json!([]), None).unwrap_err();
        assert_eq!(
            err,
            SdkDiffError::RecordsNotASequence {
                side: "main".to_string(),
                found: "object".to_string(),
            }
        );

        let err = compare_values(&json!([]), &Value::Null, None).unwrap_err();
        assert!(matches!(err, SdkDiffError::RecordsNotASequence { ref side, .. } if side == "base"));
    }

    #[test]
    fn test_compare_values_defaults_id_field() {
        let diff = compare_values(&json!([{"id": 7}]), &json!([{"id": 7.0}]), None).unwrap();
        assert_eq!(diff.len(), 1);
        assert_eq!(
            diff.iter().next().map(|e| e.type_of_change()),
            Some(TypeOfChange::Unchanged)
        );
    }
}
