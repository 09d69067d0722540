//! `pubwrap [--test]`: regenerate or verify every module in the manifest.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use pubwrap_core::manifest;
use pubwrap_renderer::Renderer;
use pubwrap_sync::{pipeline, Mode, Outcome, RunReport};

/// Arguments for a generation run.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Check that generated files are up to date instead of writing them.
    #[arg(short, long)]
    pub test: bool,

    /// Print a unified diff for every stale or missing file.
    #[arg(long, requires = "test")]
    pub diff: bool,

    /// Manifest listing the modules to wrap [default: pubwrap.yaml].
    #[arg(short, long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Directory of `.tera` files overriding the built-in templates.
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,
}

impl GenerateArgs {
    pub fn run(self) -> Result<ExitCode> {
        let manifest_path = self
            .manifest
            .clone()
            .unwrap_or_else(|| manifest::manifest_path_at(Path::new("")));
        let manifest = manifest::load_at(&manifest_path)
            .with_context(|| format!("failed to load manifest {}", manifest_path.display()))?;
        let renderer = match &self.templates {
            Some(dir) => Renderer::with_templates(dir)
                .with_context(|| format!("failed to load templates from {}", dir.display()))?,
            None => Renderer::new().context("failed to load built-in templates")?,
        };

        for file in &manifest.files {
            println!("Scanning: {}", file.path.display());
        }

        let mode = if self.test { Mode::Verify } else { Mode::Regenerate };
        let report = pipeline::run(&manifest, mode, &renderer).context("generation failed")?;

        print_report(&report);
        if self.diff {
            print_diffs(&report);
        }
        Ok(conclude(&report))
    }
}

fn print_report(report: &RunReport) {
    for file in &report.files {
        let path = file.output.display();
        match file.outcome {
            Outcome::Written => println!("  ✎  {path} ({} wrapper(s))", file.wrappers),
            Outcome::UpToDate => println!("  {}  {path}", "✓".green()),
            Outcome::Stale => println!("  {}  {path} (stale)", "✗".red()),
            Outcome::Missing => println!("  {}  {path} (missing)", "✗".red()),
        }
    }
}

fn print_diffs(report: &RunReport) {
    for file in report.failing() {
        let Some(diff) = file.diff.as_deref() else {
            continue;
        };
        print!("{diff}");
        if !diff.ends_with('\n') {
            println!();
        }
    }
}

fn conclude(report: &RunReport) -> ExitCode {
    match report.mode {
        Mode::Regenerate => {
            println!("{}", "Regenerated sources successfully.".green());
            ExitCode::SUCCESS
        }
        Mode::Verify if report.passed() => {
            println!("{}", "Generated sources are up to date.".green());
            ExitCode::SUCCESS
        }
        Mode::Verify => {
            println!("{}", "Generated sources are outdated. Please regenerate.".red());
            ExitCode::FAILURE
        }
    }
}
