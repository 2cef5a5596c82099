//! Record collection diff engine.
//!
//! Compares two collections of keyed records (the "main" and "base" versions)
//! and produces an ordered, classified diff with per-property change views.
//!
//! ## Entry point
//!
//! ```
//! use sdkdiff_core::diff::{compare, TypeOfChange};
//! use serde_json::json;
//!
//! let main = vec![json!({"id": "x", "v": 1}), json!({"id": "y", "v": 2})];
//! let base = vec![json!({"id": "x", "v": 1}), json!({"id": "z", "v": 9})];
//! let diff = compare(&main, &base, "id");
//!
//! let kinds: Vec<TypeOfChange> = diff.iter().map(|e| e.type_of_change()).collect();
//! assert_eq!(
//!     kinds,
//!     vec![TypeOfChange::Removed, TypeOfChange::Unchanged, TypeOfChange::Added]
//! );
//! ```
//!
//! ## Guarantees
//!
//! - **Completeness**: exactly one entry per distinct id across both inputs.
//! - **Ordering**: removed entries in base order, then all others in main order.
//! - **Determinism**: identical inputs produce identical output.
//! - **Purity**: no I/O, no logging, no shared state.

pub mod engine;
pub mod equivalence;
pub mod model;
pub mod record_id;
pub mod summary;

pub use engine::{compare, compare_values, DEFAULT_ID_FIELD};
pub use equivalence::{equivalent, strip_nulls, values_equivalent};
pub use model::{Diff, DiffEntry, DiffSummary, TypeOfChange};
pub use record_id::RecordId;
pub use summary::render_summary;
