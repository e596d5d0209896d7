use std::{io::Write, path::Path};

use anyhow::Result;

use super::super::{args::PruneArgs, exit_status::ExitStatus, report};
use crate::{
    config::{Config, load_config},
    prune::{
        ResourceLayout, clean_translation_file, extract_base_keys, resolve_res_root,
    },
};

/// Counters for the end-of-run summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneSummary {
    pub files_checked: usize,
    pub files_with_orphans: usize,
    pub keys_removed: usize,
    pub failed_files: usize,
}

/// Prune orphaned keys from every translation under the resource root.
///
/// Phases run strictly in order: locate the base file, extract its keys,
/// discover translation directories, clean each one. An empty key set aborts
/// before any translation is touched.
pub fn prune<O: Write, E: Write>(
    args: &PruneArgs,
    cwd: &Path,
    out: &mut O,
    err: &mut E,
) -> Result<ExitStatus> {
    let loaded = load_config(cwd)?;
    let config = apply_overrides(loaded.config, args);
    config.validate()?;

    let res_root = resolve_res_root(&loaded.project_root, &config, args.res_dir.as_deref());
    let layout = ResourceLayout::from_config(res_root, &config);
    let mode = args.mode();

    report::print_start_to(&layout.res_root, out);
    if args.verbose {
        report::print_config_source_to(loaded.from_file, &loaded.project_root, out);
    }

    let base_file = layout.base_file();
    let keys = match extract_base_keys(&base_file) {
        Ok(keys) => keys,
        Err(error) => {
            report::print_resource_error_to(&error, err);
            Default::default()
        }
    };
    if keys.is_empty() {
        report::print_abort_to(err);
        return Ok(ExitStatus::Error);
    }
    if args.verbose {
        report::print_base_keys_to(keys.len(), &base_file, out);
    }

    let discovery = layout.discover()?;
    if args.verbose {
        for dir in &discovery.skipped {
            report::print_skipped_to(dir, &layout.file_name, out);
        }
    }

    let mut summary = PruneSummary::default();
    for translation in &discovery.translations {
        report::print_checking_to(&translation.file, &translation.locale, out);
        summary.files_checked += 1;

        match clean_translation_file(&translation.file, &keys, mode) {
            Ok(outcome) => {
                if outcome.has_orphans() {
                    summary.files_with_orphans += 1;
                    summary.keys_removed += outcome.removed.len();
                }
                report::print_outcome_to(&outcome, mode, args.verbose, out);
            }
            Err(error) => {
                summary.failed_files += 1;
                report::print_resource_error_to(&error, err);
            }
        }
    }

    report::print_summary_to(&summary, mode, out);

    Ok(exit_status(&summary, args.check))
}

fn apply_overrides(mut config: Config, args: &PruneArgs) -> Config {
    if let Some(base_dir) = &args.base_dir {
        config.base_dir = base_dir.clone();
    }
    if let Some(file_name) = &args.file_name {
        config.file_name = file_name.clone();
    }
    config
}

fn exit_status(summary: &PruneSummary, check: bool) -> ExitStatus {
    if check && (summary.keys_removed > 0 || summary.failed_files > 0) {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    }
}
