//! pubwrap: generate top-level forwarding functions for marked methods.
//!
//! # Usage
//!
//! ```text
//! pubwrap [--manifest pubwrap.yaml] [--templates <dir>] [-v]...
//! pubwrap --test [--diff]
//! ```

mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use commands::generate::GenerateArgs;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "pubwrap",
    version,
    about = "Generate module-level wrappers for methods marked as public",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    generate: GenerateArgs,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    log::debug!("{cli:?}");
    cli.generate.run()
}
