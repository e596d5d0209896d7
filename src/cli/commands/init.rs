use std::{fs, io::Write, path::Path};

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::exit_status::ExitStatus;
use super::super::report::SUCCESS_MARK;
use crate::config::{CONFIG_FILE_NAME, default_config_json};

pub fn init<O: Write, E: Write>(cwd: &Path, out: &mut O, err: &mut E) -> Result<ExitStatus> {
    let config_path = cwd.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        let _ = writeln!(err, "Error: {} already exists", CONFIG_FILE_NAME);
        return Ok(ExitStatus::Failure);
    }

    fs::write(&config_path, default_config_json()? + "\n")
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    let _ = writeln!(
        out,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );

    Ok(ExitStatus::Success)
}
