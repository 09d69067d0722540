//! Unified diff between a generated module on disk and its fresh rendering.

use std::io::ErrorKind;
use std::path::Path;

use similar::TextDiff;

use crate::{error::io_err, SyncError};

/// Render a unified diff from `old` to `new`, labelled with `path`.
///
/// Returns an empty string when the texts are equal.
pub fn unified_diff(path: &Path, old: &str, new: &str) -> String {
    if old == new {
        return String::new();
    }
    let old_header = format!("a/{}", path.display());
    let new_header = format!("b/{}", path.display());
    TextDiff::from_lines(old, new)
        .unified_diff()
        .header(&old_header, &new_header)
        .context_radius(3)
        .to_string()
}

/// Diff the current contents of `path` (empty when absent) against `new`.
pub fn diff_against_disk(path: &Path, new: &str) -> Result<String, SyncError> {
    let existing = read_existing_or_empty(path)?;
    Ok(unified_diff(path, &existing, new))
}

fn read_existing_or_empty(path: &Path) -> Result<String, SyncError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(io_err(path, err)),
    }
}
