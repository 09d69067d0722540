//! # pubwrap-scanner
//!
//! Finds methods decorated with the public-API marker in a Python module and
//! turns each into a [`ScannedMethod`]: the method's record plus the wrapper
//! signature derived from it.
//!
//! Pipeline per module: [`parse::SourceTree`] → [`scan::public_methods`] →
//! [`MethodRecord::from_marked`] → [`signature::transform`].

pub mod error;
pub mod method;
pub mod parse;
pub mod scan;
pub mod signature;

use std::path::Path;

pub use error::{ScanError, TransformError};
pub use method::{Docstring, MethodRecord, Param, ParamKind};
pub use parse::SourceTree;
pub use signature::{transform, Signature};

/// A marked method ready for synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedMethod {
    pub record: MethodRecord,
    pub signature: Signature,
}

/// Scan in-memory `source` for methods marked `@<marker>`.
///
/// `path` is only used for error reporting. The first failure aborts the scan.
pub fn scan_source(path: &Path, source: String, marker: &str) -> Result<Vec<ScannedMethod>, ScanError> {
    let tree = SourceTree::parse(path, source)?;
    scan_tree(&tree, marker)
}

/// Read and scan the module at `path`.
pub fn scan_file(path: &Path, marker: &str) -> Result<Vec<ScannedMethod>, ScanError> {
    let tree = SourceTree::read(path)?;
    scan_tree(&tree, marker)
}

fn scan_tree(tree: &SourceTree, marker: &str) -> Result<Vec<ScannedMethod>, ScanError> {
    let transform_err = |source| ScanError::Transform {
        path: tree.path().to_path_buf(),
        source,
    };

    let mut methods = Vec::new();
    for marked in scan::public_methods(tree, marker) {
        let record = MethodRecord::from_marked(tree, &marked).map_err(transform_err)?;
        let signature = transform(&record).map_err(transform_err)?;
        tracing::debug!(
            "{}:{}: {}({}) -> ({})",
            tree.path().display(),
            record.line,
            record.name,
            signature.params,
            signature.call_args
        );
        methods.push(ScannedMethod { record, signature });
    }
    Ok(methods)
}
