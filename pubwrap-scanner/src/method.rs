//! Eligible method records: a plain-data view over a marked function node.

use tree_sitter::Node;

use crate::error::TransformError;
use crate::parse::{children, named_children, SourceTree};
use crate::scan::MarkedFunction;

/// How a parameter binds arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Declared before a `/` separator.
    PositionalOnly,
    Positional,
    /// `*args`
    VarPositional,
    /// Declared after `*` or `*args`.
    KeywordOnly,
    /// `**kwargs`
    VarKeyword,
    /// The bare `/` marker.
    PositionalSeparator,
    /// The bare `*` marker.
    KeywordSeparator,
}

impl ParamKind {
    pub fn is_positional(self) -> bool {
        matches!(self, ParamKind::PositionalOnly | ParamKind::Positional)
    }
}

/// One entry of a parameter list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Bound name without stars; empty for separators.
    pub name: String,
    /// Source text including annotation and default, e.g. `y: int = 2`.
    pub text: String,
    pub kind: ParamKind,
}

/// A leading string-literal statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Docstring {
    /// The literal exactly as written, quotes included.
    pub text: String,
    /// Zero-based column the literal starts at in the original file.
    pub column: usize,
}

impl Docstring {
    /// The literal moved to start at `indent` columns.
    ///
    /// Continuation lines lose the difference in indentation when they have
    /// at least that much leading space; other lines are left alone.
    pub fn reindented(&self, indent: usize) -> String {
        let mut lines = self.text.split('\n');
        let mut out = lines.next().unwrap_or_default().to_string();
        for line in lines {
            out.push('\n');
            if line.is_empty() {
                continue;
            }
            let leading = line.len() - line.trim_start_matches(' ').len();
            if self.column > indent && leading >= self.column - indent {
                out.push_str(&line[self.column - indent..]);
            } else if self.column < indent {
                out.push_str(&" ".repeat(indent - self.column));
                out.push_str(line);
            } else {
                out.push_str(line);
            }
        }
        out
    }
}

/// Everything the transformer and synthesizer need from a marked method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodRecord {
    pub name: String,
    pub is_async: bool,
    /// PEP 695 type parameter list as written, e.g. `[T: int]`.
    pub type_params: Option<String>,
    /// Declared parameters in order, receiver included.
    pub params: Vec<Param>,
    /// Return annotation text after `->`, if any.
    pub returns: Option<String>,
    pub docstring: Option<Docstring>,
    /// Decorator expressions as written, marker included.
    pub decorators: Vec<String>,
    /// One-based line of the `def`.
    pub line: usize,
}

impl MethodRecord {
    /// Build a record from a marked `function_definition` node.
    pub fn from_marked(
        tree: &SourceTree,
        marked: &MarkedFunction<'_>,
    ) -> Result<Self, TransformError> {
        let node = marked.node;
        let name = node
            .child_by_field_name("name")
            .map(|n| tree.text(n).to_string())
            .unwrap_or_default();
        let is_async = children(node)
            .first()
            .is_some_and(|first| first.kind() == "async");
        let type_params = node
            .child_by_field_name("type_parameters")
            .map(|n| tree.text(n).to_string());
        let params = match node.child_by_field_name("parameters") {
            Some(list) => collect_params(tree, &name, list)?,
            None => Vec::new(),
        };
        let returns = node
            .child_by_field_name("return_type")
            .map(|n| tree.text(n).to_string());
        let docstring = node
            .child_by_field_name("body")
            .and_then(|body| leading_docstring(tree, body));

        Ok(MethodRecord {
            name,
            is_async,
            type_params,
            params,
            returns,
            docstring,
            decorators: marked.decorators.clone(),
            line: node.start_position().row + 1,
        })
    }

    pub fn positional(&self) -> impl Iterator<Item = &Param> {
        self.params.iter().filter(|p| p.kind.is_positional())
    }

    pub fn var_positional(&self) -> Option<&Param> {
        self.params.iter().find(|p| p.kind == ParamKind::VarPositional)
    }

    pub fn keyword_only(&self) -> impl Iterator<Item = &Param> {
        self.params.iter().filter(|p| p.kind == ParamKind::KeywordOnly)
    }

    pub fn var_keyword(&self) -> Option<&Param> {
        self.params.iter().find(|p| p.kind == ParamKind::VarKeyword)
    }

    pub fn has_decorator(&self, name: &str) -> bool {
        self.decorators.iter().any(|d| d == name)
    }
}

fn collect_params(
    tree: &SourceTree,
    method: &str,
    list: Node<'_>,
) -> Result<Vec<Param>, TransformError> {
    let mut params: Vec<Param> = Vec::new();
    let mut keyword_only = false;

    for node in named_children(list) {
        let text = tree.text(node).to_string();
        let plain = |name: String, keyword_only: bool| Param {
            name,
            text: text.clone(),
            kind: if keyword_only {
                ParamKind::KeywordOnly
            } else {
                ParamKind::Positional
            },
        };

        let param = match node.kind() {
            "identifier" => plain(text.clone(), keyword_only),
            "default_parameter" | "typed_default_parameter" => {
                let name = node
                    .child_by_field_name("name")
                    .filter(|n| n.kind() == "identifier")
                    .ok_or_else(|| unsupported(method, node))?;
                plain(tree.text(name).to_string(), keyword_only)
            }
            "typed_parameter" => {
                let inner = named_children(node)
                    .into_iter()
                    .next()
                    .ok_or_else(|| unsupported(method, node))?;
                match inner.kind() {
                    "identifier" => plain(tree.text(inner).to_string(), keyword_only),
                    "list_splat_pattern" => {
                        keyword_only = true;
                        splat(tree, inner, text.clone(), ParamKind::VarPositional)
                    }
                    "dictionary_splat_pattern" => {
                        splat(tree, inner, text.clone(), ParamKind::VarKeyword)
                    }
                    _ => return Err(unsupported(method, inner)),
                }
            }
            "list_splat_pattern" => {
                keyword_only = true;
                splat(tree, node, text.clone(), ParamKind::VarPositional)
            }
            "dictionary_splat_pattern" => splat(tree, node, text.clone(), ParamKind::VarKeyword),
            "keyword_separator" => {
                keyword_only = true;
                separator(text.clone(), ParamKind::KeywordSeparator)
            }
            "positional_separator" => {
                for earlier in params.iter_mut() {
                    if earlier.kind == ParamKind::Positional {
                        earlier.kind = ParamKind::PositionalOnly;
                    }
                }
                separator(text.clone(), ParamKind::PositionalSeparator)
            }
            _ => return Err(unsupported(method, node)),
        };
        params.push(param);
    }
    Ok(params)
}

fn splat(tree: &SourceTree, pattern: Node<'_>, text: String, kind: ParamKind) -> Param {
    let name = tree.text(pattern).trim_start_matches('*').trim().to_string();
    Param { name, text, kind }
}

fn separator(text: String, kind: ParamKind) -> Param {
    Param {
        name: String::new(),
        text,
        kind,
    }
}

fn unsupported(method: &str, node: Node<'_>) -> TransformError {
    TransformError::UnsupportedParameter {
        method: method.to_string(),
        kind: node.kind().to_string(),
    }
}

fn leading_docstring(tree: &SourceTree, body: Node<'_>) -> Option<Docstring> {
    let first = named_children(body).into_iter().next()?;
    if first.kind() != "expression_statement" {
        return None;
    }
    let exprs = named_children(first);
    let [literal] = exprs.as_slice() else {
        return None;
    };
    let plain = match literal.kind() {
        "string" => is_plain_string(tree, *literal),
        "concatenated_string" => named_children(*literal)
            .into_iter()
            .all(|part| part.kind() == "string" && is_plain_string(tree, part)),
        _ => false,
    };
    plain.then(|| Docstring {
        text: tree.text(*literal).to_string(),
        column: literal.start_position().column,
    })
}

/// Formatted and bytes literals are expressions, not docstrings.
fn is_plain_string(tree: &SourceTree, literal: Node<'_>) -> bool {
    let text = tree.text(literal);
    let prefix = &text[..text.find(['"', '\'']).unwrap_or(0)];
    !prefix.contains(['f', 'F', 'b', 'B'])
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::scan::public_methods;

    fn record(src: &str) -> MethodRecord {
        let tree = SourceTree::parse(Path::new("t.py"), src.to_string()).expect("parse");
        let marked = public_methods(&tree, "_public").next().expect("one marked method");
        MethodRecord::from_marked(&tree, &marked).expect("record")
    }

    #[test]
    fn full_parameter_taxonomy() {
        let r = record(
            "class C:\n    @_public\n    def m(self, a, /, b: int, *rest, c=1, d: str = 'x', **kw) -> None:\n        pass\n",
        );
        let kinds: Vec<ParamKind> = r.params.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ParamKind::PositionalOnly,
                ParamKind::PositionalOnly,
                ParamKind::PositionalSeparator,
                ParamKind::Positional,
                ParamKind::VarPositional,
                ParamKind::KeywordOnly,
                ParamKind::KeywordOnly,
                ParamKind::VarKeyword,
            ]
        );
        assert_eq!(r.positional().count(), 3);
        assert_eq!(r.var_positional().map(|p| p.name.as_str()), Some("rest"));
        let kw: Vec<&str> = r.keyword_only().map(|p| p.name.as_str()).collect();
        assert_eq!(kw, vec!["c", "d"]);
        assert_eq!(r.var_keyword().map(|p| p.name.as_str()), Some("kw"));
        assert_eq!(r.params[6].text, "d: str = 'x'");
        assert_eq!(r.returns.as_deref(), Some("None"));
    }

    #[test]
    fn bare_star_makes_following_params_keyword_only() {
        let r = record("class C:\n    @_public\n    async def f(self, x, *, y=2):\n        pass\n");
        assert!(r.is_async);
        assert_eq!(r.params[2].kind, ParamKind::KeywordSeparator);
        assert_eq!(r.params[3].kind, ParamKind::KeywordOnly);
        assert_eq!(r.params[3].name, "y");
    }

    #[test]
    fn typed_splats_are_recognised() {
        let r = record(
            "class C:\n    @_public\n    def f(self, *args: int, **kwargs: object):\n        pass\n",
        );
        assert_eq!(r.params[1].kind, ParamKind::VarPositional);
        assert_eq!(r.params[1].name, "args");
        assert_eq!(r.params[1].text, "*args: int");
        assert_eq!(r.params[2].kind, ParamKind::VarKeyword);
        assert_eq!(r.params[2].name, "kwargs");
    }

    #[test]
    fn docstring_is_captured_only_when_first() {
        let with = record("class C:\n    @_public\n    def f(self):\n        \"doc\"\n        return 1\n");
        assert_eq!(with.docstring.as_ref().map(|d| d.text.as_str()), Some("\"doc\""));
        assert_eq!(with.docstring.as_ref().map(|d| d.column), Some(8));

        let without = record("class C:\n    @_public\n    def f(self):\n        x = 1\n        \"not doc\"\n");
        assert!(without.docstring.is_none());
    }

    #[rstest::rstest]
    #[case("f\"{self.name}\"")]
    #[case("F'{self.name}'")]
    #[case("b\"bytes\"")]
    #[case("rb'raw bytes'")]
    #[case("\"plain \" f\"{self.name}\"")]
    fn formatted_and_bytes_literals_are_not_docstrings(#[case] literal: &str) {
        let r = record(&format!(
            "class C:\n    @_public\n    def f(self):\n        {literal}\n        return 1\n"
        ));
        assert!(r.docstring.is_none(), "{literal} taken as docstring");
    }

    #[rstest::rstest]
    #[case("r\"raw doc\"")]
    #[case("u'unicode doc'")]
    #[case("\"one \" \"two\"")]
    fn plain_prefixed_literals_are_docstrings(#[case] literal: &str) {
        let r = record(&format!(
            "class C:\n    @_public\n    def f(self):\n        {literal}\n        return 1\n"
        ));
        assert_eq!(r.docstring.map(|d| d.text), Some(literal.to_string()));
    }

    #[test]
    fn type_parameters_are_captured() {
        let r = record("class C:\n    @_public\n    def f[T](self, x: T) -> T:\n        pass\n");
        assert_eq!(r.type_params.as_deref(), Some("[T]"));
        assert!(record("class C:\n    @_public\n    def f(self):\n        pass\n")
            .type_params
            .is_none());
    }

    #[test]
    fn whitespace_only_docstring_lines_keep_relative_indent() {
        let doc = Docstring {
            text: "\"\"\"Summary.\n          \n        \"\"\"".to_string(),
            column: 8,
        };
        assert_eq!(doc.reindented(4), "\"\"\"Summary.\n      \n    \"\"\"");
    }

    #[test]
    fn reindent_moves_continuation_lines() {
        let doc = Docstring {
            text: "\"\"\"Summary.\n\n        Details here.\n          indented more\n        \"\"\"".to_string(),
            column: 8,
        };
        assert_eq!(
            doc.reindented(4),
            "\"\"\"Summary.\n\n    Details here.\n      indented more\n    \"\"\""
        );
    }

    #[test]
    fn plain_def_is_not_async() {
        let r = record("class C:\n    @_public\n    def f(self):\n        pass\n");
        assert!(!r.is_async);
        assert_eq!(r.name, "f");
        assert_eq!(r.line, 3);
    }
}
