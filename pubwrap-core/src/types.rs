//! Domain types for pubwrap manifests.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.
//! All types are serializable/deserializable via serde + serde_yaml.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Dotted attribute path on the active context object, e.g. `runner.io_manager`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContextPath(pub String);

impl ContextPath {
    /// `true` when every dot-separated segment is a Python identifier.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty() && self.0.split('.').all(is_identifier)
    }
}

impl fmt::Display for ContextPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ContextPath {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ContextPath {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_alphanumeric())
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// A symbol imported into every generated file: `from <module> import <symbol>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSpec {
    pub symbol: String,
    pub module: String,
}

impl ImportSpec {
    fn new(symbol: &str, module: &str) -> Self {
        Self {
            symbol: symbol.to_owned(),
            module: module.to_owned(),
        }
    }
}

/// Return-annotation rewrite applied to methods carrying `decorator`.
///
/// `from` must be the leading spelling of the annotation, e.g. `Iterator` in
/// `Iterator[Queue]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnRewrite {
    pub decorator: String,
    pub from: String,
    pub to: String,
}

/// Generator settings. Every field has a default, so a manifest may omit
/// the `settings` block entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Prepended to the input basename to form the output file name.
    pub prefix: String,
    /// Bare decorator name marking a method for export.
    pub marker: String,
    /// The active-context singleton every wrapper forwards through.
    pub context: ImportSpec,
    /// Locals key enabling KeyboardInterrupt protection inside wrappers.
    pub protection: ImportSpec,
    /// Message of the `RuntimeError` raised when no context is active.
    pub error_message: String,
    pub scoped_rewrites: Vec<ReturnRewrite>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            prefix: "_generated".to_string(),
            marker: "_public".to_string(),
            context: ImportSpec::new("GLOBAL_RUN_CONTEXT", "._run"),
            protection: ImportSpec::new("LOCALS_KEY_KI_PROTECTION_ENABLED", "._ki"),
            error_message: "must be called from async context".to_string(),
            scoped_rewrites: vec![ReturnRewrite {
                decorator: "contextmanager".to_string(),
                from: "Iterator".to_string(),
                to: "ContextManager".to_string(),
            }],
        }
    }
}

// ---------------------------------------------------------------------------
// Descriptors
// ---------------------------------------------------------------------------

/// One input module and the per-file metadata for its generated twin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Path of the module to scan. Relative paths are resolved against the
    /// manifest directory on load.
    pub path: PathBuf,
    /// Attribute path on the context object that owns the scanned methods.
    pub module: ContextPath,
    /// `sys.platform` value asserted under `TYPE_CHECKING`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Extra import block copied verbatim below the fixed header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imports: Option<String>,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, module: impl Into<ContextPath>) -> Self {
        SourceFile {
            path: path.into(),
            module: module.into(),
            platform: None,
            imports: None,
        }
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn with_imports(mut self, imports: impl Into<String>) -> Self {
        self.imports = Some(imports.into());
        self
    }

    /// `<dir>/<prefix><basename>`: pure, no I/O.
    pub fn output_path(&self, prefix: &str) -> PathBuf {
        let base = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.path.with_file_name(format!("{prefix}{base}"))
    }
}

/// Root of a `pubwrap.yaml` manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Manifest {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub files: Vec<SourceFile>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
