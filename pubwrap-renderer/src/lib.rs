//! # pubwrap-renderer
//!
//! Tera-based synthesizer that turns scanned public methods into a generated
//! Python module of forwarding functions.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pubwrap_core::{Settings, SourceFile};
//! use pubwrap_renderer::Renderer;
//!
//! fn render(file: &SourceFile, settings: &Settings) {
//!     let methods = pubwrap_scanner::scan_file(&file.path, &settings.marker).unwrap_or_default();
//!     if let Ok(renderer) = Renderer::new() {
//!         if let Ok(text) = renderer.render_file(file, settings, &methods) {
//!             println!("{}: {} bytes", file.output_path(&settings.prefix).display(), text.len());
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::{HeaderCtx, WrapperCtx};
pub use engine::{Renderer, TemplateEngine};
pub use error::RenderError;
