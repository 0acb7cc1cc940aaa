//! Foundation types for the symsolve toolchain.
//!
//! This module provides fundamental types used throughout the resolver:
//! - [`Position`], [`Span`], [`LineIndex`] - Line/column positions for diagnostics
//! - [`Name`] - Cheap-to-clone identifier storage
//! - Qualified-name helpers and identifier validation
//! - Domain constants (root type, implicit imports, file extension)
//!
//! This module has NO dependencies on other symsolve modules.

pub mod constants;
mod names;
mod position;

pub use names::{
    Name, is_valid_identifier, is_valid_qualified_name, join_qualified, last_segment,
    parent_segment,
};
pub use position::{LineIndex, Position, Span};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
