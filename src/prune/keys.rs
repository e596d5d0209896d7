//! Base key extraction.

use std::{collections::BTreeSet, path::Path};

use crate::{
    issues::ResourceError,
    resources::{ResourceDocument, read_resource},
};

/// Keys declared by the base resource file.
pub type KeySet = BTreeSet<String>;

/// Collect the `name` of every top-level `<string>` in the base file.
///
/// Errors are returned rather than swallowed; the caller reports them and
/// treats the run as having no keys.
pub fn extract_base_keys(path: &Path) -> Result<KeySet, ResourceError> {
    let content = read_resource(path)?;
    let document = ResourceDocument::parse(content).map_err(|error| ResourceError::Parse {
        path: path.to_path_buf(),
        error,
    })?;
    Ok(document.string_keys().map(str::to_string).collect())
}
