//! sdkdiff Core - structural comparison of SDK release record collections
//!
//! This crate provides:
//! - The diff engine classifying two keyed record collections into an
//!   ordered diff (added/removed/modified/unchanged)
//! - Per-property change classification on each diff entry
//! - Deep structural equivalence over JSON values
//! - Hierarchy flattening for nested record trees
//! - Built-in record sources for SDK payloads and a logged comparison pipeline
//! - A Markdown summary renderer

pub mod diff;
pub mod errors;
pub mod hierarchy;
pub mod logging_facility;
pub mod pipeline;
pub mod source;

#[doc(hidden)]
pub use sdkdiff_core_types as core_types;

// Re-export commonly used types
pub use diff::{compare, compare_values, Diff, DiffEntry, DiffSummary, RecordId, TypeOfChange};
pub use errors::{ExError, ExErrorKind, Result, SdkDiffError};
pub use hierarchy::{flatten, flatten_with, FlattenOptions, GroupRule};
pub use pipeline::{compare_payload_bytes, compare_payloads, Comparison, ComparisonRequest};
pub use source::{RecordKind, RecordSource};
