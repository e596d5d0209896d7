//! strprune - orphaned key pruner for Android string resources
//!
//! strprune compares the keys of the base `values/strings.xml` against every
//! `values-*/strings.xml` translation and removes the entries whose key no
//! longer exists in the base file.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, commands, reporting)
//! - `config`: Configuration file loading and parsing
//! - `issues`: Errors raised while reading or writing resource files
//! - `prune`: Key extraction, translation cleaning and directory discovery
//! - `resources`: Span-preserving `strings.xml` parsing and editing

pub mod cli;
pub mod config;
pub mod issues;
pub mod prune;
pub mod resources;
