//! YAML manifest listing the modules to wrap.
//!
//! # Layout
//!
//! ```text
//! <project root>/
//!   pubwrap.yaml            (settings + files)
//!   pkg/_core/_run.py       (input, `path: pkg/_core/_run.py`)
//!   pkg/_core/_generated_run.py  (output, written by `pubwrap`)
//! ```
//!
//! Relative `path` entries are resolved against the directory holding the
//! manifest, so the tool behaves the same from any working directory.

use std::path::{Path, PathBuf};

use crate::error::ManifestError;
use crate::types::{Manifest, SourceFile};

/// Manifest file name looked up when none is given explicitly.
pub const DEFAULT_MANIFEST: &str = "pubwrap.yaml";

/// `<dir>/pubwrap.yaml`: pure, no I/O.
pub fn manifest_path_at(dir: &Path) -> PathBuf {
    dir.join(DEFAULT_MANIFEST)
}

/// Load and validate the manifest at `path`.
///
/// Returns `ManifestError::NotFound` if absent,
/// `ManifestError::Parse` (with path + line context) if malformed YAML.
pub fn load_at(path: &Path) -> Result<Manifest, ManifestError> {
    if !path.exists() {
        return Err(ManifestError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path)?;
    let manifest: Manifest = serde_yaml::from_str(&contents).map_err(|e| ManifestError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    let manifest = resolve_paths(base, manifest);
    validate(&manifest)?;
    Ok(manifest)
}

/// Check every descriptor before any file is scanned.
pub fn validate(manifest: &Manifest) -> Result<(), ManifestError> {
    for file in &manifest.files {
        if file.path.file_name().is_none() {
            return Err(ManifestError::InvalidSourcePath {
                path: file.path.clone(),
            });
        }
        if !file.module.is_valid() {
            return Err(ManifestError::InvalidModulePath {
                path: file.path.clone(),
                module: file.module.0.clone(),
            });
        }
    }
    Ok(())
}

fn resolve_paths(base: &Path, mut manifest: Manifest) -> Manifest {
    manifest.files = manifest
        .files
        .into_iter()
        .map(|file| {
            if file.path.is_absolute() {
                file
            } else {
                SourceFile {
                    path: base.join(&file.path),
                    ..file
                }
            }
        })
        .collect();
    manifest
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
