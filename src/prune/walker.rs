//! Discovery of locale-variant directories under a resource root.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;

use crate::config::Config;

/// Where the base file and its translations live.
#[derive(Debug, Clone)]
pub struct ResourceLayout {
    pub res_root: PathBuf,
    pub base_dir: String,
    pub locale_pattern: String,
    pub file_name: String,
}

/// A locale-variant directory that holds a translation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationDir {
    /// Directory name without the base prefix, e.g. `de` for `values-de`.
    pub locale: String,
    pub dir: PathBuf,
    pub file: PathBuf,
}

/// Directories found under the resource root.
#[derive(Debug, Default)]
pub struct Discovery {
    pub translations: Vec<TranslationDir>,
    /// Matching directories without a translation file.
    pub skipped: Vec<PathBuf>,
}

impl ResourceLayout {
    pub fn from_config(res_root: PathBuf, config: &Config) -> Self {
        Self {
            res_root,
            base_dir: config.base_dir.clone(),
            locale_pattern: config.locale_pattern.clone(),
            file_name: config.file_name.clone(),
        }
    }

    pub fn base_file(&self) -> PathBuf {
        self.res_root.join(&self.base_dir).join(&self.file_name)
    }

    /// List the translation directories, sorted by name.
    ///
    /// The base directory is never returned, even when the pattern matches it.
    pub fn discover(&self) -> Result<Discovery> {
        let pattern = Pattern::new(&self.locale_pattern).with_context(|| {
            format!("Invalid locale pattern: \"{}\"", self.locale_pattern)
        })?;

        let mut dirs: Vec<(String, PathBuf)> = Vec::new();
        let entries = fs::read_dir(&self.res_root).with_context(|| {
            format!(
                "Failed to read resource directory: {}",
                self.res_root.display()
            )
        })?;
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if name == self.base_dir || !pattern.matches(name) || !path.is_dir() {
                continue;
            }
            dirs.push((name.to_string(), path));
        }
        dirs.sort();

        let mut discovery = Discovery::default();
        for (name, dir) in dirs {
            let file = dir.join(&self.file_name);
            if !file.is_file() {
                discovery.skipped.push(dir);
                continue;
            }
            discovery.translations.push(TranslationDir {
                locale: self.locale_of(&name),
                dir,
                file,
            });
        }

        Ok(discovery)
    }

    fn locale_of(&self, dir_name: &str) -> String {
        dir_name
            .strip_prefix(self.base_dir.as_str())
            .and_then(|rest| rest.strip_prefix('-'))
            .unwrap_or(dir_name)
            .to_string()
    }
}

/// Resolve the resource root: an explicit override wins, then the config.
pub fn resolve_res_root(project_root: &Path, config: &Config, res_dir: Option<&Path>) -> PathBuf {
    match res_dir {
        Some(dir) => dir.to_path_buf(),
        None => project_root.join(&config.res_root),
    }
}
