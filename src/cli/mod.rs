//! Command-line interface layer.
//!
//! Separate from the pruning logic so strprune can be used as a library.

use std::{env, io};

use anyhow::{Context, Result};

mod args;
mod commands;
mod exit_status;
mod report;

pub use args::{Arguments, Command, PruneArgs};
pub use commands::PruneSummary;
pub use exit_status::ExitStatus;

/// Main entry point for the strprune CLI.
///
/// Without a subcommand, prunes orphaned keys from the resource tree
/// found from the current directory.
pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let cwd = env::current_dir().context("Failed to determine the current directory")?;
    let mut out = io::stdout().lock();
    let mut err = io::stderr().lock();

    match args.command {
        Some(Command::Init) => commands::init::init(&cwd, &mut out, &mut err),
        None => commands::prune::prune(&args.prune, &cwd, &mut out, &mut err),
    }
}
