//! Template contexts: serializable rendering payloads for one file header
//! and for one wrapper function.

use serde::Serialize;

use pubwrap_core::{ImportSpec, ReturnRewrite, Settings, SourceFile};
use pubwrap_scanner::{MethodRecord, ScannedMethod};

use crate::error::RenderError;

/// Indentation of a wrapper body.
const BODY_INDENT: usize = 4;

/// Payload for `header.py.tera`.
#[derive(Debug, Clone, Serialize)]
pub struct HeaderCtx {
    pub protection: ImportSpec,
    pub context: ImportSpec,
    /// Per-file imports, newline-terminated; `None` when empty.
    pub imports: Option<String>,
    pub platform: Option<String>,
    /// Platform guard needs `TYPE_CHECKING` and the imports don't provide it.
    pub needs_type_checking: bool,
    /// Platform guard needs `sys` and the imports don't provide it.
    pub needs_sys: bool,
}

impl HeaderCtx {
    pub fn new(file: &SourceFile, settings: &Settings) -> Self {
        let imports = file
            .imports
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .map(|text| {
                let mut text = text.to_string();
                if !text.ends_with('\n') {
                    text.push('\n');
                }
                text
            });
        let platform = file.platform.clone().filter(|p| !p.is_empty());
        let provided = imports.as_deref().unwrap_or_default();

        HeaderCtx {
            protection: settings.protection.clone(),
            context: settings.context.clone(),
            needs_type_checking: platform.is_some() && !provided.contains("TYPE_CHECKING"),
            needs_sys: platform.is_some() && !provided.contains("import sys"),
            imports,
            platform,
        }
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self).map_err(RenderError::from)
    }
}

/// Payload for `wrapper.py.tera`.
#[derive(Debug, Clone, Serialize)]
pub struct WrapperCtx {
    pub name: String,
    pub is_async: bool,
    /// PEP 695 type parameter list, e.g. `[T]`.
    pub type_params: Option<String>,
    pub params: String,
    pub returns: Option<String>,
    /// Docstring literal re-indented for the wrapper body.
    pub docstring: Option<String>,
    pub call_args: String,
    pub context_symbol: String,
    /// Attribute path on the context object, e.g. `runner.io_manager`.
    pub module: String,
    pub protection_symbol: String,
    /// Escaped for use inside a double-quoted Python string.
    pub error_message: String,
}

impl WrapperCtx {
    pub fn new(method: &ScannedMethod, file: &SourceFile, settings: &Settings) -> Self {
        let record = &method.record;
        WrapperCtx {
            name: record.name.clone(),
            is_async: record.is_async,
            type_params: record.type_params.clone(),
            params: method.signature.params.clone(),
            returns: record
                .returns
                .as_deref()
                .map(|r| rewrite_return(r, record, &settings.scoped_rewrites)),
            docstring: record.docstring.as_ref().map(|d| d.reindented(BODY_INDENT)),
            call_args: method.signature.call_args.clone(),
            context_symbol: settings.context.symbol.clone(),
            module: file.module.0.clone(),
            protection_symbol: settings.protection.symbol.clone(),
            error_message: python_escape(&settings.error_message),
        }
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self).map_err(RenderError::from)
    }
}

/// Apply the first matching scoped-resource rewrite to a return annotation.
///
/// A rule matches when the method carries `rule.decorator` and the annotation
/// starts with `rule.from` as a whole name (`Iterator` or `Iterator[...]`,
/// not `IteratorLike`).
pub fn rewrite_return(returns: &str, record: &MethodRecord, rules: &[ReturnRewrite]) -> String {
    for rule in rules {
        if !record.has_decorator(&rule.decorator) {
            continue;
        }
        if let Some(rest) = returns.strip_prefix(rule.from.as_str()) {
            if rest.is_empty() || rest.starts_with('[') {
                return format!("{}{}", rule.to, rest);
            }
        }
    }
    returns.to_string()
}

fn python_escape(message: &str) -> String {
    message.replace('\\', "\\\\").replace('"', "\\\"")
}
