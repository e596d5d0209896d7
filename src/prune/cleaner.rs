//! Translation file cleaning.

use std::path::{Path, PathBuf};

use super::keys::KeySet;
use crate::{issues::ResourceError, resources::ResourceEditor};

/// Whether the cleaner may write to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanMode {
    /// Rewrite files that contain orphaned keys.
    Apply,
    /// Only report what would be removed.
    DryRun,
}

/// What happened to a single translation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanOutcome {
    pub path: PathBuf,
    /// Orphaned keys, in document order.
    pub removed: Vec<String>,
    /// Number of `<string>` entries left in the file.
    pub kept: usize,
    /// True if the file was rewritten.
    pub written: bool,
    /// True if the rewrite prepended a missing XML declaration.
    pub declaration_added: bool,
}

impl CleanOutcome {
    pub fn has_orphans(&self) -> bool {
        !self.removed.is_empty()
    }
}

/// Remove every top-level `<string>` whose key is not in `keys`.
///
/// The file is only rewritten when at least one key was removed and `mode`
/// is [`CleanMode::Apply`]. On error the file is left untouched.
pub fn clean_translation_file(
    path: &Path,
    keys: &KeySet,
    mode: CleanMode,
) -> Result<CleanOutcome, ResourceError> {
    let mut editor = ResourceEditor::open(path)?;
    let removed = editor.delete_keys_not_in(keys);

    let written = !removed.is_empty() && mode == CleanMode::Apply;
    if written {
        editor.save()?;
    }

    Ok(CleanOutcome {
        path: path.to_path_buf(),
        kept: editor.document().string_keys().count(),
        removed,
        written,
        declaration_added: written && !editor.document().has_declaration(),
    })
}
