//! Command implementations

pub mod compare;
pub mod flatten;

use sdkdiff_core::errors::{ExError, ExErrorKind};
use std::path::Path;

/// Read a payload file, surfacing failures as `ERR_IO`.
pub(crate) fn read_payload(path: &Path, side: &str) -> Result<Vec<u8>, ExError> {
    std::fs::read(path).map_err(|e| {
        ExError::new(ExErrorKind::Io)
            .with_side(side)
            .with_message(format!("cannot read {}: {}", path.display(), e))
    })
}
