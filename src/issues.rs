//! Problems that can be reported while reading resource files.
//!
//! A missing file is a warning: the caller decides whether it is fatal.
//! Anything that prevents a file from being read or parsed is an error.

use std::{
    fmt, io,
    path::{Path, PathBuf},
};

use crate::resources::SyntaxError;

/// Severity level of a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Failure to load or store a resource file.
#[derive(Debug)]
pub enum ResourceError {
    /// The file does not exist.
    MissingFile { path: PathBuf },
    /// The file exists but could not be read or written.
    Io { path: PathBuf, source: io::Error },
    /// The file is not well-formed markup.
    Parse { path: PathBuf, error: SyntaxError },
}

impl ResourceError {
    pub fn path(&self) -> &Path {
        match self {
            ResourceError::MissingFile { path }
            | ResourceError::Io { path, .. }
            | ResourceError::Parse { path, .. } => path,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            ResourceError::MissingFile { .. } => Severity::Warning,
            ResourceError::Io { .. } | ResourceError::Parse { .. } => Severity::Error,
        }
    }

    pub fn is_parse_error(&self) -> bool {
        matches!(self, ResourceError::Parse { .. })
    }
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::MissingFile { path } => {
                write!(f, "Strings file not found: {}", path.display())
            }
            ResourceError::Io { path, source } => {
                write!(f, "Failed to access {}: {}", path.display(), source)
            }
            ResourceError::Parse { path, error } => {
                write!(f, "Failed to parse {}: {}", path.display(), error)
            }
        }
    }
}

impl std::error::Error for ResourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResourceError::Io { source, .. } => Some(source),
            ResourceError::Parse { error, .. } => Some(error),
            ResourceError::MissingFile { .. } => None,
        }
    }
}
