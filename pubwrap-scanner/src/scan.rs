//! Marker scanner: finds functions decorated with the public-API marker.
//!
//! The walk is a depth-first pre-order traversal, so matches come out in
//! source order regardless of how deeply a method is nested (classes inside
//! `if TYPE_CHECKING:` blocks, nested classes, and so on).

use tree_sitter::Node;

use crate::parse::{children, named_children, SourceTree};

/// A function definition carrying the marker decorator.
#[derive(Debug, Clone)]
pub struct MarkedFunction<'tree> {
    /// The `function_definition` node (covers both `def` and `async def`).
    pub node: Node<'tree>,
    /// Every decorator expression on the function, as written.
    pub decorators: Vec<String>,
}

/// Lazy iterator over marked functions; see [`public_methods`].
pub struct PublicMethods<'tree> {
    tree: &'tree SourceTree,
    marker: &'tree str,
    stack: Vec<Node<'tree>>,
}

/// Walk `tree` and yield every function decorated with exactly `@<marker>`.
///
/// Only a bare name matches: `@marker()`, `@pkg.marker` and `@marker_x` are
/// skipped.
pub fn public_methods<'tree>(tree: &'tree SourceTree, marker: &'tree str) -> PublicMethods<'tree> {
    PublicMethods {
        tree,
        marker,
        stack: vec![tree.root()],
    }
}

impl<'tree> Iterator for PublicMethods<'tree> {
    type Item = MarkedFunction<'tree>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            self.stack.extend(children(node).into_iter().rev());
            if let Some(found) = self.match_decorated(node) {
                return Some(found);
            }
        }
        None
    }
}

impl<'tree> PublicMethods<'tree> {
    fn match_decorated(&self, node: Node<'tree>) -> Option<MarkedFunction<'tree>> {
        if node.kind() != "decorated_definition" {
            return None;
        }
        let definition = node.child_by_field_name("definition")?;
        if definition.kind() != "function_definition" {
            return None;
        }

        let mut marked = false;
        let mut decorators = Vec::new();
        for decorator in named_children(node)
            .into_iter()
            .filter(|n| n.kind() == "decorator")
        {
            let Some(expr) = named_children(decorator).into_iter().next() else {
                continue;
            };
            let text = self.tree.text(expr);
            if expr.kind() == "identifier" && text == self.marker {
                marked = true;
            }
            decorators.push(text.to_string());
        }

        if !marked {
            return None;
        }
        tracing::debug!(
            "marked function at {}:{}",
            self.tree.path().display(),
            definition.start_position().row + 1
        );
        Some(MarkedFunction {
            node: definition,
            decorators,
        })
    }
}
