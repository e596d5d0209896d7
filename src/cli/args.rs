//! CLI argument definitions using clap.
//!
//! Running `strprune` without a subcommand prunes the resource tree.
//!
//! ## Commands
//!
//! - `init`: Write a default `.strprunerc.json`

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::prune::CleanMode;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None, args_conflicts_with_subcommands = true)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub prune: PruneArgs,
}

#[derive(Debug, Clone, Default, Args)]
pub struct PruneArgs {
    /// Resource root containing `values/` (overrides config file)
    #[arg(long)]
    pub res_dir: Option<PathBuf>,

    /// Name of the base locale directory (overrides config file)
    #[arg(long)]
    pub base_dir: Option<String>,

    /// Name of the strings file in each locale directory (overrides config file)
    #[arg(long)]
    pub file_name: Option<String>,

    /// Report orphaned keys without modifying any file
    #[arg(long)]
    pub dry_run: bool,

    /// Like --dry-run, but exit with status 1 if orphaned keys are found
    #[arg(long)]
    pub check: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl PruneArgs {
    pub fn mode(&self) -> CleanMode {
        if self.dry_run || self.check {
            CleanMode::DryRun
        } else {
            CleanMode::Apply
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Initialize a new .strprunerc.json configuration file
    Init,
}
