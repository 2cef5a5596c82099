//! Comparison pipeline.
//!
//! Runs the middle stages of a comparison for one record kind: extract the
//! collection from each payload, flatten it when it is a tree, and diff.
//! Obtaining the payloads and rendering the result belong to the caller.

use crate::diff::{compare, Diff};
use crate::errors::{ExError, SdkDiffError};
use crate::source::{parse_payload_bytes, RecordSource};
use crate::{log_op_end, log_op_error, log_op_start};
use sdkdiff_core_types::schema::{SIDE_BASE, SIDE_MAIN};
use sdkdiff_core_types::RequestId;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

const OP_COMPARE_PAYLOADS: &str = "compare_payloads";

/// One user-selected comparison: two versions and the record kind to diff.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRequest {
    pub request_id: RequestId,
    pub main_version: String,
    pub base_version: String,
    pub source: RecordSource,
}

impl ComparisonRequest {
    /// Create a request with a fresh request id.
    pub fn new(
        main_version: impl Into<String>,
        base_version: impl Into<String>,
        source: impl Into<RecordSource>,
    ) -> Self {
        Self {
            request_id: RequestId::new(),
            main_version: main_version.into(),
            base_version: base_version.into(),
            source: source.into(),
        }
    }
}

/// Result of a comparison request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub request: ComparisonRequest,
    pub diff: Diff,
}

/// Compare the records of `request.source` in two parsed payloads.
///
/// # Errors
///
/// - `MissingField`: a payload lacks the source's collection
/// - `InvalidArgument`: the collection is not an array, or a tree node is
///   malformed
///
/// Every error carries the request id and the failing side.
pub fn compare_payloads(
    request: &ComparisonRequest,
    main: &Value,
    base: &Value,
) -> Result<Comparison, ExError> {
    let started = Instant::now();
    log_op_start!(
        OP_COMPARE_PAYLOADS,
        request_id = %request.request_id,
        record_kind = %request.source.name,
        main_version = %request.main_version,
        base_version = %request.base_version
    );

    let result = run(request, main, base);
    let duration_ms = started.elapsed().as_millis() as u64;

    match result {
        Ok(diff) => {
            let summary = diff.summary();
            log_op_end!(
                OP_COMPARE_PAYLOADS,
                duration_ms = duration_ms,
                request_id = %request.request_id,
                entry_count = diff.len() as u64,
                added = summary.added as u64,
                removed = summary.removed as u64,
                modified = summary.modified as u64
            );
            Ok(Comparison {
                request: request.clone(),
                diff,
            })
        }
        Err(err) => {
            log_op_error!(
                OP_COMPARE_PAYLOADS,
                err.clone(),
                duration_ms = duration_ms,
                request_id = %request.request_id
            );
            Err(err)
        }
    }
}

/// [`compare_payloads`] over raw payload bytes.
///
/// # Errors
///
/// - `InvalidPayload`: either side is not valid UTF-8 JSON
/// - everything [`compare_payloads`] returns
pub fn compare_payload_bytes(
    request: &ComparisonRequest,
    main_bytes: &[u8],
    base_bytes: &[u8],
) -> Result<Comparison, ExError> {
    let main = parse_payload_bytes(main_bytes).map_err(|e| side_error(request, SIDE_MAIN, e))?;
    let base = parse_payload_bytes(base_bytes).map_err(|e| side_error(request, SIDE_BASE, e))?;
    compare_payloads(request, &main, &base)
}

fn run(request: &ComparisonRequest, main: &Value, base: &Value) -> Result<Diff, ExError> {
    let source = &request.source;
    let main_records = source
        .extract(main, SIDE_MAIN)
        .map_err(|e| side_error(request, SIDE_MAIN, e))?;
    let base_records = source
        .extract(base, SIDE_BASE)
        .map_err(|e| side_error(request, SIDE_BASE, e))?;

    tracing::debug!(
        op = OP_COMPARE_PAYLOADS,
        main_len = main_records.len() as u64,
        base_len = base_records.len() as u64
    );

    Ok(compare(&main_records, &base_records, &source.id_field))
}

fn side_error(request: &ComparisonRequest, side: &str, err: SdkDiffError) -> ExError {
    ExError::from(err)
        .with_op(OP_COMPARE_PAYLOADS)
        .with_side(side)
        .with_request_id(request.request_id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;
    use crate::source::RecordKind;
    use serde_json::json;

    #[test]
    fn test_request_ids_are_fresh() {
        let a = ComparisonRequest::new("1.10.0", "1.9.0", RecordKind::Fields);
        let b = ComparisonRequest::new("1.10.0", "1.9.0", RecordKind::Fields);
        assert_ne!(a.request_id, b.request_id);
    }

    #[test]
    fn test_error_names_failing_side() {
        let request = ComparisonRequest::new("1.10.0", "1.9.0", RecordKind::Nodes);
        let err = compare_payloads(&request, &json!({"xmlStructure": []}), &json!({}))
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::MissingField);
        assert_eq!(err.side(), Some("base"));
        assert_eq!(err.request_id(), Some(&request.request_id));
        assert_eq!(err.op(), Some("compare_payloads"));
    }

    #[test]
    fn test_bytes_entry_point_rejects_bad_json() {
        let request = ComparisonRequest::new("b", "a", RecordKind::Fields);
        let err = compare_payload_bytes(&request, b"{", b"{}").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidPayload);
        assert_eq!(err.side(), Some("main"));
    }
}
