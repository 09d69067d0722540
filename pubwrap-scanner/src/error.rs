//! Error types for pubwrap-scanner.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from reading, parsing and scanning one module.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The module could not be read from disk.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The Python grammar could not be loaded into the parser.
    #[error("failed to load Python grammar: {0}")]
    Language(String),

    /// The module is not syntactically valid Python.
    #[error("syntax error in {path} at line {line}, column {column}")]
    Syntax {
        path: PathBuf,
        line: usize,
        column: usize,
    },

    /// A marked method violates the structural convention.
    #[error("{path}: {source}")]
    Transform {
        path: PathBuf,
        #[source]
        source: TransformError,
    },
}

/// Precondition violations found while turning a method into a wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The method has no leading positional parameter to strip.
    #[error("public method '{method}' has no receiver parameter")]
    MissingReceiver { method: String },

    /// A parameter form that cannot be forwarded (e.g. a tuple pattern).
    #[error("public method '{method}' has an unsupported parameter of kind '{kind}'")]
    UnsupportedParameter { method: String, kind: String },
}
