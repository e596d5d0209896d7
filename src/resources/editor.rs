use std::{
    collections::BTreeSet,
    fs, io,
    path::{Path, PathBuf},
};

use super::document::ResourceDocument;
use crate::issues::ResourceError;

/// An editor that deletes `<string>` entries from a resource file.
///
/// Only the removed lines change; the rest of the file is written back
/// exactly as it was read.
pub struct ResourceEditor {
    file_path: PathBuf,
    document: ResourceDocument,
}

impl ResourceEditor {
    /// Open and parse a resource file for editing.
    pub fn open(path: &Path) -> Result<Self, ResourceError> {
        let content = read_resource(path)?;
        let document = ResourceDocument::parse(content).map_err(|error| ResourceError::Parse {
            path: path.to_path_buf(),
            error,
        })?;
        Ok(Self {
            file_path: path.to_path_buf(),
            document,
        })
    }

    pub fn document(&self) -> &ResourceDocument {
        &self.document
    }

    /// Delete every `<string>` entry whose key is not in `keys`.
    ///
    /// Returns the deleted keys in document order.
    pub fn delete_keys_not_in(&mut self, keys: &BTreeSet<String>) -> Vec<String> {
        self.document
            .remove_entries(|entry| {
                entry
                    .string_key()
                    .is_some_and(|key| !keys.contains(key))
            })
            .into_iter()
            .filter_map(|entry| entry.name)
            .collect()
    }

    /// Save the modified document back to the file.
    pub fn save(&self) -> Result<(), ResourceError> {
        fs::write(&self.file_path, self.document.to_output().as_bytes()).map_err(|source| {
            ResourceError::Io {
                path: self.file_path.clone(),
                source,
            }
        })
    }

    /// Get the current content as a string (for testing).
    #[cfg(test)]
    pub fn content(&self) -> &str {
        self.document.source()
    }
}

/// Read a resource file, mapping a missing file to its own error.
pub fn read_resource(path: &Path) -> Result<String, ResourceError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ResourceError::MissingFile {
            path: path.to_path_buf(),
        },
        _ => ResourceError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}
