//! Shared test utilities.

pub mod resolve_helpers;
pub mod source_fixtures;
pub mod symbol_assertions;
