//! Error types for pubwrap-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while loading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Underlying I/O failure (permission denied, not a file, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error on load; includes file path and line context from serde_yaml.
    #[error("failed to parse manifest at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The manifest file did not exist at the expected path.
    #[error("manifest not found at {path}")]
    NotFound { path: PathBuf },

    /// A `module` entry is not a dotted path of Python identifiers.
    #[error("invalid module path '{module}' for {path}")]
    InvalidModulePath { path: PathBuf, module: String },

    /// A `files` entry has no file name to derive an output name from.
    #[error("source path {path} does not name a file")]
    InvalidSourcePath { path: PathBuf },
}
