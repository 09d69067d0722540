//! pubwrap core library: manifest types, loading, errors.
//!
//! - [`types`]: descriptors and generator settings
//! - [`error`]: [`ManifestError`]
//! - [`manifest`]: locate / load / validate

pub mod error;
pub mod manifest;
pub mod types;

pub use error::ManifestError;
pub use types::{ContextPath, ImportSpec, Manifest, ReturnRewrite, Settings, SourceFile};
