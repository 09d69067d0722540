//! Generation pipeline entrypoint used by the CLI.
//!
//! Every input is scanned and rendered before anything touches the disk, so a
//! failure in any one module leaves all generated files as they were.

use std::path::PathBuf;

use pubwrap_core::Manifest;
use pubwrap_renderer::Renderer;

use crate::{
    diff,
    staleness::{self, FileStatus},
    writer::atomic_write,
    SyncError,
};

/// What a run does with the generated texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Overwrite every generated module.
    Regenerate,
    /// Compare on-disk modules to the generated texts; write nothing.
    Verify,
}

/// One fully rendered output, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub source: PathBuf,
    pub output: PathBuf,
    pub text: String,
    /// Number of forwarding functions in `text`.
    pub wrappers: usize,
}

/// Per-file result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Written,
    UpToDate,
    Stale,
    Missing,
}

impl Outcome {
    pub fn is_ok(self) -> bool {
        matches!(self, Outcome::Written | Outcome::UpToDate)
    }
}

impl From<FileStatus> for Outcome {
    fn from(status: FileStatus) -> Self {
        match status {
            FileStatus::UpToDate => Outcome::UpToDate,
            FileStatus::Stale => Outcome::Stale,
            FileStatus::Missing => Outcome::Missing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub source: PathBuf,
    pub output: PathBuf,
    pub outcome: Outcome,
    pub wrappers: usize,
    /// Unified diff from disk to the generated text, for stale or missing files.
    pub diff: Option<String>,
}

/// Result of [`run`], in manifest order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub mode: Mode,
    pub files: Vec<FileReport>,
}

impl RunReport {
    /// `true` when every file was written or is up to date.
    pub fn passed(&self) -> bool {
        self.files.iter().all(|f| f.outcome.is_ok())
    }

    /// Files that are stale or missing.
    pub fn failing(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| !f.outcome.is_ok())
    }
}

/// Scan and render every manifest entry, in order, without writing.
pub fn generate(manifest: &Manifest, renderer: &Renderer) -> Result<Vec<GeneratedFile>, SyncError> {
    let settings = &manifest.settings;
    let mut generated = Vec::with_capacity(manifest.files.len());
    for file in &manifest.files {
        tracing::info!("scanning: {}", file.path.display());
        let methods = pubwrap_scanner::scan_file(&file.path, &settings.marker)?;
        let text = renderer.render_file(file, settings, &methods)?;
        let output = file.output_path(&settings.prefix);
        tracing::debug!(
            "rendered {} wrapper(s) for {}",
            methods.len(),
            output.display()
        );
        generated.push(GeneratedFile {
            source: file.path.clone(),
            output,
            text,
            wrappers: methods.len(),
        });
    }
    Ok(generated)
}

/// Run the pipeline over `manifest` in the given `mode`.
pub fn run(manifest: &Manifest, mode: Mode, renderer: &Renderer) -> Result<RunReport, SyncError> {
    let generated = generate(manifest, renderer)?;

    let mut files = Vec::with_capacity(generated.len());
    for file in generated {
        let (outcome, diff) = match mode {
            Mode::Regenerate => {
                atomic_write(&file.output, &file.text)?;
                (Outcome::Written, None)
            }
            Mode::Verify => {
                let outcome = Outcome::from(staleness::check(&file.output, &file.text)?);
                let diff = if outcome.is_ok() {
                    None
                } else {
                    Some(diff::diff_against_disk(&file.output, &file.text)?)
                };
                (outcome, diff)
            }
        };
        files.push(FileReport {
            source: file.source,
            output: file.output,
            outcome,
            wrappers: file.wrappers,
            diff,
        });
    }

    Ok(RunReport { mode, files })
}
