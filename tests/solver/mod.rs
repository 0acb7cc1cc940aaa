//! Symbol source tests
//!
//! Lookup by qualified name across backends and their composition.

pub mod tests_combined;
pub mod tests_directory;
