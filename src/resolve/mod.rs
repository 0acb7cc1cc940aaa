//! Semantic queries over parsed source.
//!
//! ```text
//! facade        → Resolver: public entry point per node
//!   ↓
//! expr          → expression typing, call and constructor selection
//!   ↓
//! method_resolution → overload phases, inference, most-specific choice
//!   ↓
//! assignability / members / ancestors
//!   ↓
//! context, convert → scope chain and type-node conversion
//! ```
//!
//! Every query takes the [`TypeSolver`](crate::solver::TypeSolver) to look
//! types up in; none of them cache.

pub mod context;

mod ancestors;
mod assignability;
mod convert;
mod expr;
mod facade;
mod members;
pub(crate) mod method_resolution;

pub use context::{Context, context_for};
pub use convert::{convert_or_unsolved, convert_type};
pub use facade::Resolver;
