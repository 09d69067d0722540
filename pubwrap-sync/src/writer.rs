//! Atomic writer for generated modules.
//!
//! ## `atomic_write` protocol
//!
//! 1. Render content (already done by caller).
//! 2. Write to `<path>.pubwrap.tmp` in the same directory.
//! 3. Rename to final path (atomic on POSIX).
//!
//! A reader never observes a half-written module, and a failed rename
//! leaves the previous file in place.

use std::path::{Path, PathBuf};

use crate::error::{io_err, SyncError};

/// Atomically write `content` to `path`, overwriting unconditionally.
pub fn atomic_write(path: &Path, content: &str) -> Result<(), SyncError> {
    let tmp = PathBuf::from(format!("{}.pubwrap.tmp", path.display()));
    atomic_write_with_tmp(path, content, &tmp)
}

fn atomic_write_with_tmp(path: &Path, content: &str, tmp: &Path) -> Result<(), SyncError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
    }
    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn first_write_creates_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("_generated_run.py");
        atomic_write(&path, "x = 1\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "x = 1\n");
    }

    #[test]
    fn existing_content_is_overwritten() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("_generated_run.py");
        atomic_write(&path, "old\n").unwrap();
        atomic_write(&path, "new\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn content_is_written_byte_for_byte() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("crlf.py");
        atomic_write(&path, "a\r\nb\n").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"a\r\nb\n");
    }

    #[test]
    fn tmp_file_removed_after_write() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("clean.py");
        atomic_write(&path, "data").unwrap();
        let tmp_path = PathBuf::from(format!("{}.pubwrap.tmp", path.display()));
        assert!(!tmp_path.exists(), ".pubwrap.tmp must be cleaned up");
    }

    #[test]
    fn rename_failure_leaves_target_and_cleans_tmp() {
        let root = TempDir::new().unwrap();
        // A non-empty directory cannot be replaced by a file, even as root.
        let path = root.path().join("_generated_run.py");
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join("keep.txt"), "original").unwrap();

        let tmp_path = root.path().join("_generated_run.py.pubwrap.tmp");
        let err = atomic_write_with_tmp(&path, "new content", &tmp_path)
            .expect_err("rename over a non-empty directory must fail");

        assert!(matches!(err, SyncError::Io { .. }));
        assert_eq!(fs::read_to_string(path.join("keep.txt")).unwrap(), "original");
        assert!(!tmp_path.exists(), ".pubwrap.tmp should be cleaned up");
    }
}
