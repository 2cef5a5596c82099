#![allow(clippy::unwrap_used, clippy::expect_used)]

use sdkdiff_core::errors::{ExError, ExErrorKind, SdkDiffError};
use sdkdiff_core::RecordKind;

#[test]
fn test_every_kind_has_a_stable_code() {
    let cases = [
        (ExErrorKind::InvalidArgument, "ERR_INVALID_ARGUMENT"),
        (ExErrorKind::InvalidPayload, "ERR_INVALID_PAYLOAD"),
        (ExErrorKind::MissingField, "ERR_MISSING_FIELD"),
        (ExErrorKind::UnknownRecordKind, "ERR_UNKNOWN_RECORD_KIND"),
        (ExErrorKind::Io, "ERR_IO"),
        (ExErrorKind::Serialization, "ERR_SERIALIZATION"),
        (ExErrorKind::Internal, "ERR_INTERNAL"),
    ];
    for (kind, code) in cases {
        assert_eq!(kind.code(), code);
        assert_eq!(ExError::new(kind).code(), code);
    }
}

#[test]
fn test_domain_errors_convert_with_context() {
    let ex: ExError = SdkDiffError::InvalidChildren {
        node_id: "GR-1".to_string(),
        children_field: "content".to_string(),
    }
    .into();
    assert_eq!(ex.kind(), ExErrorKind::InvalidArgument);
    assert_eq!(ex.record_id(), Some("GR-1"));
    assert!(ex.message().contains("content"));

    let ex: ExError = SdkDiffError::MissingCollection {
        pointer: "/fields".to_string(),
    }
    .into();
    assert_eq!(ex.kind(), ExErrorKind::MissingField);
    assert!(ex.to_string().contains("/fields"));
}

#[test]
fn test_unknown_record_kind() {
    let err = "schemas".parse::<RecordKind>().unwrap_err();
    let ex: ExError = err.into();
    assert_eq!(ex.code(), "ERR_UNKNOWN_RECORD_KIND");
    assert!(ex.message().contains("schemas"));
}

#[test]
fn test_json_errors_become_invalid_payload() {
    let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let err: SdkDiffError = json_err.into();
    let ex: ExError = err.into();
    assert_eq!(ex.kind(), ExErrorKind::InvalidPayload);
}
