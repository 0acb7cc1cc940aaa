//! Owning structure for parsed source and the handles that point into it.
//!
//! - [`SourceUnit`] owns one parsed compilation unit and can be re-parsed
//! - [`NodeHandle`] is a `Send + Sync` back-reference that re-locates its
//!   node on demand and reports staleness instead of dangling

mod handle;
mod unit;

pub use handle::{NodeHandle, SyntaxNodePtr};
pub use unit::{SourceUnit, UnitId};

pub(crate) use unit::nested_types;
