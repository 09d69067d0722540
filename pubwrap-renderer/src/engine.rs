//! Tera rendering engine: [`TemplateEngine`] and the file-level [`Renderer`].
//!
//! # Output layout
//!
//! ```text
//! header.py.tera        banner, support imports, per-file imports, platform guard
//! wrapper.py.tera       one forwarding function per marked method
//! ...
//! footer.py.tera        closing pragma
//! ```
//!
//! Each piece is trimmed to end in exactly one newline and the pieces are
//! joined by a blank-line pair, so the assembled text depends only on the
//! inputs and never on template trailing whitespace.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tera::Tera;

use pubwrap_core::{Settings, SourceFile};
use pubwrap_scanner::ScannedMethod;

use crate::context::{HeaderCtx, WrapperCtx};
use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Embedded templates, baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

pub const HEADER_TEMPLATE: &str = "header.py.tera";
pub const WRAPPER_TEMPLATE: &str = "wrapper.py.tera";
pub const FOOTER_TEMPLATE: &str = "footer.py.tera";

const TPLS: &[(&str, &str)] = &[
    (HEADER_TEMPLATE, include_str!("templates/header.py.tera")),
    (WRAPPER_TEMPLATE, include_str!("templates/wrapper.py.tera")),
    (FOOTER_TEMPLATE, include_str!("templates/footer.py.tera")),
];

const PIECE_SEPARATOR: &str = "\n\n";

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io { path: path.into(), source }
}

fn normalize_template_name(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/").to_lowercase()
}

fn collect_template_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), RenderError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let meta = entry.metadata().map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            collect_template_files(&path, out)?;
        } else if meta.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

fn load_user_templates(dir: &Path) -> Result<Vec<(String, String)>, RenderError> {
    if !dir.exists() {
        return Err(io_err(
            dir,
            std::io::Error::new(std::io::ErrorKind::NotFound, "template directory not found"),
        ));
    }
    let mut files = Vec::new();
    collect_template_files(dir, &mut files)?;
    files.sort();
    let mut templates = Vec::new();
    for path in files {
        if path.extension().and_then(|s| s.to_str()) != Some("tera") {
            continue;
        }
        let rel = path.strip_prefix(dir).unwrap_or(path.as_path());
        let name = normalize_template_name(rel);
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        templates.push((name, contents));
    }
    Ok(templates)
}

fn build_tera(user_template_dir: Option<&Path>) -> Result<Tera, RenderError> {
    let mut templates: HashMap<String, String> = HashMap::new();
    for (name, content) in TPLS {
        templates.insert(
            normalize_template_name(Path::new(name)),
            (*content).to_string(),
        );
    }
    if let Some(dir) = user_template_dir {
        for (name, content) in load_user_templates(dir)? {
            templates.insert(name, content);
        }
    }

    let mut tera = Tera::default();
    let items: Vec<(String, String)> = templates.into_iter().collect();
    tera.add_raw_templates(items)?;
    Ok(tera)
}

/// Trim trailing whitespace and end with exactly one newline.
fn finish_piece(mut piece: String) -> String {
    piece.truncate(piece.trim_end().len());
    piece.push('\n');
    piece
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Tera-based engine for rendering templates with optional user overrides.
///
/// `user_template_dir` may contain `.tera` files that override embedded defaults.
/// Template names are normalised to lowercase and relative paths.
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Construct a new [`TemplateEngine`], loading embedded templates plus any
    /// overrides found in `user_template_dir`.
    pub fn new(user_template_dir: Option<&Path>) -> Result<Self, RenderError> {
        let tera = build_tera(user_template_dir)?;
        Ok(TemplateEngine { tera })
    }

    /// Render the header block for `file`.
    pub fn render_header(&self, ctx: &HeaderCtx) -> Result<String, RenderError> {
        let content = self.tera.render(HEADER_TEMPLATE, &ctx.to_tera_context()?)?;
        Ok(finish_piece(content))
    }

    /// Render one forwarding function.
    pub fn render_wrapper(&self, ctx: &WrapperCtx) -> Result<String, RenderError> {
        let content = self.tera.render(WRAPPER_TEMPLATE, &ctx.to_tera_context()?)?;
        Ok(finish_piece(content))
    }

    pub fn render_footer(&self) -> Result<String, RenderError> {
        let content = self.tera.render(FOOTER_TEMPLATE, &tera::Context::new())?;
        Ok(finish_piece(content))
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Assembles complete generated files. Create once and reuse across files.
pub struct Renderer {
    engine: TemplateEngine,
}

impl Renderer {
    /// Construct a new [`Renderer`] with embedded templates.
    pub fn new() -> Result<Self, RenderError> {
        Ok(Renderer { engine: TemplateEngine::new(None)? })
    }

    /// Construct a [`Renderer`] whose templates may be overridden from `dir`.
    pub fn with_templates(dir: &Path) -> Result<Self, RenderError> {
        Ok(Renderer { engine: TemplateEngine::new(Some(dir))? })
    }

    /// Render the wrapper for a single scanned method.
    pub fn render_wrapper(
        &self,
        method: &ScannedMethod,
        file: &SourceFile,
        settings: &Settings,
    ) -> Result<String, RenderError> {
        self.engine.render_wrapper(&WrapperCtx::new(method, file, settings))
    }

    /// Render the full generated module for `file` from its scanned methods.
    pub fn render_file(
        &self,
        file: &SourceFile,
        settings: &Settings,
        methods: &[ScannedMethod],
    ) -> Result<String, RenderError> {
        let mut pieces = Vec::with_capacity(methods.len() + 2);
        pieces.push(self.engine.render_header(&HeaderCtx::new(file, settings))?);
        for method in methods {
            pieces.push(self.render_wrapper(method, file, settings)?);
        }
        pieces.push(self.engine.render_footer()?);
        Ok(pieces.join(PIECE_SEPARATOR))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
