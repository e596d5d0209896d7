//! Orphaned key pruning.
//!
//! ```text
//! ResourceLayout::base_file ──> extract_base_keys ──> KeySet
//!                                                       │
//! ResourceLayout::discover ──> TranslationDir ──> clean_translation_file
//! ```

pub mod cleaner;
pub mod keys;
pub mod walker;

pub use cleaner::{CleanMode, CleanOutcome, clean_translation_file};
pub use keys::{KeySet, extract_base_keys};
pub use walker::{Discovery, ResourceLayout, TranslationDir, resolve_res_root};
