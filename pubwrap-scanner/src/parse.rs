//! Python front end: a thin owner around a tree-sitter parse.

use std::path::{Path, PathBuf};

use tree_sitter::{Node, Parser, Tree};

use crate::error::ScanError;

/// One module's text together with its syntax tree.
///
/// Node text is sliced straight out of `source`, so everything rendered from
/// the tree keeps the author's spelling.
pub struct SourceTree {
    path: PathBuf,
    source: String,
    tree: Tree,
}

impl SourceTree {
    /// Parse `source`, failing with [`ScanError::Syntax`] on the first error node.
    pub fn parse(path: &Path, source: String) -> Result<Self, ScanError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| ScanError::Language(e.to_string()))?;
        let tree = parser
            .parse(&source, None)
            .ok_or_else(|| ScanError::Language("parser returned no tree".to_string()))?;

        let parsed = SourceTree {
            path: path.to_path_buf(),
            source,
            tree,
        };
        let error_at = parsed.first_error().map(|bad| bad.start_position());
        if let Some(pos) = error_at {
            return Err(ScanError::Syntax {
                path: parsed.path,
                line: pos.row + 1,
                column: pos.column + 1,
            });
        }
        Ok(parsed)
    }

    /// Read `path` and parse it.
    pub fn read(path: &Path) -> Result<Self, ScanError> {
        let source = std::fs::read_to_string(path).map_err(|e| ScanError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(path, source)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text covered by `node`.
    pub fn text(&self, node: Node<'_>) -> &str {
        &self.source[node.start_byte()..node.end_byte()]
    }

    fn first_error(&self) -> Option<Node<'_>> {
        let root = self.root();
        if !root.has_error() {
            return None;
        }
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if node.is_error() || node.is_missing() {
                return Some(node);
            }
            stack.extend(children(node).into_iter().rev());
        }
        Some(root)
    }
}

/// All children of `node`, named and anonymous, in source order.
pub(crate) fn children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

/// Named children of `node`, without comments.
pub(crate) fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}
