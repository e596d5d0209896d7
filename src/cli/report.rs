//! Report formatting and printing utilities.
//!
//! Progress goes to the `out` writer, warnings and errors to the `err`
//! writer. Every function takes the writer explicitly so output can be
//! captured in tests.

use std::{io::Write, path::Path};

use colored::Colorize;

use super::commands::PruneSummary;
use crate::{
    config::CONFIG_FILE_NAME,
    issues::{ResourceError, Severity},
    prune::{CleanMode, CleanOutcome},
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print_start_to<W: Write>(res_root: &Path, writer: &mut W) {
    let _ = writeln!(
        writer,
        "Looking for translations in: {}",
        res_root.display().to_string().cyan()
    );
}

pub fn print_base_keys_to<W: Write>(count: usize, base_file: &Path, writer: &mut W) {
    let _ = writeln!(
        writer,
        "Found {} source {} in {}",
        count,
        if count == 1 { "key" } else { "keys" },
        base_file.display()
    );
}

/// Print a resource problem, prefixed by its severity.
pub fn print_resource_error_to<W: Write>(error: &ResourceError, writer: &mut W) {
    let label = match error.severity() {
        Severity::Error => format!("{}:", Severity::Error).bold().red(),
        Severity::Warning => format!("{}:", Severity::Warning).bold().yellow(),
    };
    let _ = writeln!(writer, "{} {}", label, error);
}

pub fn print_abort_to<W: Write>(writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} No source keys found. Aborting.",
        "warning:".bold().yellow()
    );
}

pub fn print_config_source_to<W: Write>(from_file: bool, project_root: &Path, writer: &mut W) {
    let source = if from_file {
        format!("{} in {}", CONFIG_FILE_NAME, project_root.display())
    } else {
        "defaults (no config file found)".to_string()
    };
    let _ = writeln!(writer, "Config: {}", source);
}

pub fn print_checking_to<W: Write>(file: &Path, locale: &str, writer: &mut W) {
    let _ = writeln!(writer);
    let _ = writeln!(
        writer,
        "Checking: {} {}",
        file.display(),
        format!("[{}]", locale).dimmed()
    );
}

pub fn print_skipped_to<W: Write>(dir: &Path, file_name: &str, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{}",
        format!("Skipping {}: no {}", dir.display(), file_name).dimmed()
    );
}

/// Print the removed keys and the verdict for one translation file.
pub fn print_outcome_to<W: Write>(
    outcome: &CleanOutcome,
    mode: CleanMode,
    verbose: bool,
    writer: &mut W,
) {
    let verb = match mode {
        CleanMode::Apply => "Removing unused key:",
        CleanMode::DryRun => "Unused key:",
    };
    for key in &outcome.removed {
        let _ = writeln!(writer, "  {} {} {}", FAILURE_MARK.red(), verb, key.bold());
    }

    let path = outcome.path.display();
    if !outcome.has_orphans() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("No unused keys in: {}", path).green()
        );
    } else if outcome.written {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Cleaned: {}", path).green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} ({} {})",
            "Would clean:".yellow().bold(),
            path,
            outcome.removed.len(),
            if outcome.removed.len() == 1 { "key" } else { "keys" }
        );
    }

    if verbose {
        let _ = writeln!(writer, "  kept {} key(s)", outcome.kept);
        if outcome.declaration_added {
            let _ = writeln!(writer, "  added XML declaration");
        }
    }
}

pub fn print_summary_to<W: Write>(summary: &PruneSummary, mode: CleanMode, writer: &mut W) {
    let _ = writeln!(writer);

    let checked = format!(
        "Checked {} translation {}",
        summary.files_checked,
        if summary.files_checked == 1 { "file" } else { "files" }
    );

    if summary.keys_removed == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("{} - no unused keys found", checked).green()
        );
    } else {
        match mode {
            CleanMode::Apply => {
                let _ = writeln!(
                    writer,
                    "{}: {} {} key(s) from {} file(s).",
                    checked,
                    "Removed".green().bold(),
                    summary.keys_removed,
                    summary.files_with_orphans
                );
            }
            CleanMode::DryRun => {
                let _ = writeln!(
                    writer,
                    "{}: {} {} key(s) from {} file(s).",
                    checked,
                    "Would remove".yellow().bold(),
                    summary.keys_removed,
                    summary.files_with_orphans
                );
                let _ = writeln!(
                    writer,
                    "Run without {} to remove these keys.",
                    "--dry-run/--check".cyan()
                );
            }
        }
    }

    if summary.failed_files > 0 {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be processed",
            FAILURE_MARK.red(),
            summary.failed_files
        );
    }
}
