use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".strprunerc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Resource root, relative to the project root.
    #[serde(default = "default_res_root")]
    pub res_root: String,
    /// Directory holding the base (source language) file.
    #[serde(default = "default_base_dir")]
    pub base_dir: String,
    /// Glob matched against directory names under the resource root.
    #[serde(default = "default_locale_pattern")]
    pub locale_pattern: String,
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

fn default_res_root() -> String {
    "app/src/main/res".to_string()
}

fn default_base_dir() -> String {
    "values".to_string()
}

fn default_locale_pattern() -> String {
    "values-*".to_string()
}

fn default_file_name() -> String {
    "strings.xml".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            res_root: default_res_root(),
            base_dir: default_base_dir(),
            locale_pattern: default_locale_pattern(),
            file_name: default_file_name(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// `baseDir` and `fileName` must be plain names, `localePattern` a valid glob.
    pub fn validate(&self) -> Result<()> {
        Pattern::new(&self.locale_pattern).with_context(|| {
            format!(
                "Invalid glob pattern in 'localePattern': \"{}\"",
                self.locale_pattern
            )
        })?;

        for (field, value) in [("baseDir", &self.base_dir), ("fileName", &self.file_name)] {
            if value.is_empty() || value.contains(['/', '\\']) {
                bail!("'{}' must be a plain file name, got \"{}\"", field, value);
            }
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Find the directory the resource root is resolved against.
///
/// Walks up from `start_dir` to the first directory holding a config file
/// or a `.git` directory. Falls back to `start_dir` itself.
pub fn find_project_root(start_dir: &Path) -> PathBuf {
    start_dir
        .ancestors()
        .find(|dir| dir.join(CONFIG_FILE_NAME).exists() || dir.join(".git").exists())
        .unwrap_or(start_dir)
        .to_path_buf()
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
    /// Directory that relative config paths are resolved against.
    pub project_root: PathBuf,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let project_root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                from_file: true,
                project_root,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
            project_root: find_project_root(start_dir),
        }),
    }
}
