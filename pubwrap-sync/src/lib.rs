//! # pubwrap-sync
//!
//! Reconciles generated wrapper modules with what is on disk.
//!
//! Call [`pipeline::run`] with [`Mode::Regenerate`] to write every generated
//! file, or with [`Mode::Verify`] to compare without writing, as CI does.

pub mod diff;
pub mod error;
pub mod pipeline;
pub mod staleness;
pub mod writer;

pub use error::SyncError;
pub use pipeline::{FileReport, GeneratedFile, Mode, Outcome, RunReport};
pub use staleness::FileStatus;
