//! Error types for pubwrap-sync.

use std::path::PathBuf;

use thiserror::Error;

use pubwrap_core::ManifestError;
use pubwrap_renderer::RenderError;
use pubwrap_scanner::ScanError;

/// All errors that abort a generation run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The manifest could not be loaded or validated.
    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// An input module failed to parse or violates the method convention.
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),

    /// An error from the rendering engine.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
