//! Staleness check for generated modules.
//!
//! A generated file is current only when its bytes equal the freshly
//! rendered text exactly. Line endings and trailing whitespace count.

use std::io::ErrorKind;
use std::path::Path;

use crate::{error::io_err, SyncError};

/// Comparison of one on-disk file against its expected content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    UpToDate,
    Stale,
    Missing,
}

/// Compare `path` against `expected` without writing anything.
pub fn check(path: &Path, expected: &str) -> Result<FileStatus, SyncError> {
    let existing = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::warn!("missing: {}", path.display());
            return Ok(FileStatus::Missing);
        }
        Err(err) => return Err(io_err(path, err)),
    };

    if existing == expected.as_bytes() {
        tracing::debug!("up to date: {}", path.display());
        Ok(FileStatus::UpToDate)
    } else {
        tracing::warn!("stale: {}", path.display());
        Ok(FileStatus::Stale)
    }
}
