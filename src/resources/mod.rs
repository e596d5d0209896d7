//! Android `strings.xml` resource files.
//!
//! - [`ResourceDocument`]: span index of the root element's children
//! - [`ResourceEditor`]: deletes entries from a file on disk

mod document;
mod editor;

pub use document::{
    ResourceDocument, ResourceEntry, STRING_TAG, SyntaxError, XML_DECLARATION,
};
pub use editor::{ResourceEditor, read_resource};
