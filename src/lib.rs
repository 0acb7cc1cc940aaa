//! # symsolve-base
//!
//! Core library for parsing a Java-like language and resolving the symbols,
//! types and ancestors its names refer to.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! resolve   → Context chain, ancestors, overloads, Resolver facade
//!   ↓
//! solver    → TypeSolver backends (builtin, memory, source set, directory, combined)
//!   ↓
//! model     → Declaration, ResolvedType, SymbolReference, MethodUsage
//!   ↓
//! syntax    → SourceUnit (owning structure), NodeHandle
//!   ↓
//! parser    → Logos lexer, recursive-descent parser, typed AST
//!   ↓
//! base      → Primitives (Name, LineIndex, constants)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → model → solver → resolve)
// ============================================================================

/// Foundation types: Name, positions, qualified-name helpers, constants
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, typed AST wrappers
pub mod parser;

/// Syntax: parsed source units and node handles
pub mod syntax;

/// Declarations and resolved types
pub mod model;

/// Symbol sources looked up by qualified name
pub mod solver;

/// Scope-based resolution and the public Resolver
pub mod resolve;

/// Error type shared by every layer
pub mod error;

// Re-export commonly needed items
pub use error::{ResolveError, ResolveResult};
pub use model::{
    ConstructorUsage, Declaration, MethodUsage, ReferenceType, ResolvedType, SymbolReference,
    TypeDecl,
};
pub use resolve::{Context, Resolver};
pub use solver::{
    BuiltinTypeSolver, CombinedTypeSolver, DirectoryTypeSolver, MemoryTypeSolver,
    SourceSetTypeSolver, TypeSolver,
};
pub use syntax::{NodeHandle, SourceUnit};

// Re-export foundation types
pub use base::{LineIndex, Name, Position, Span, TextRange, TextSize};
