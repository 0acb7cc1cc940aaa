//! Error types for resolution operations.
//!
//! "Not found" is never an error: lookups return
//! [`SymbolReference::Unsolved`](crate::model::SymbolReference). The variants
//! here cover malformed queries, strict-mode failures and stale handles.

use crate::parser::{SyntaxKind, TextRange};
use thiserror::Error;

/// Errors that can occur while resolving symbols.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A name could not be resolved while converting a type or expression.
    #[error("Unsolved symbol: {name}")]
    UnsolvedSymbol { name: String },

    /// The query is undefined for this kind of declaration.
    #[error("Malformed query: `{query}` is not defined for {variant}")]
    MalformedQuery {
        query: &'static str,
        variant: &'static str,
    },

    /// Strict ancestor resolution hit a supertype it could not resolve.
    #[error("Incomplete ancestry for {type_name}: cannot resolve {missing}")]
    IncompleteAncestryAborted { type_name: String, missing: String },

    /// A node handle no longer points at a node of the same kind and range.
    #[error("Stale node handle: {kind:?} at {range:?}")]
    StaleNode { kind: SyntaxKind, range: TextRange },

    /// The symbol sources cannot provide the canonical root type.
    #[error("Missing root type: {0}")]
    MissingRootType(String),

    /// A reference type was built with the wrong number of type arguments.
    #[error("{type_name} expects {expected} type arguments, found {found}")]
    TypeArgumentArity {
        type_name: String,
        expected: usize,
        found: usize,
    },

    /// The node handed to an operation is not of a supported kind.
    #[error("Unexpected node: expected {expected}, found {found:?}")]
    UnexpectedNode {
        expected: &'static str,
        found: SyntaxKind,
    },
}

impl ResolveError {
    /// Create an unsolved symbol error.
    pub fn unsolved(name: impl Into<String>) -> Self {
        Self::UnsolvedSymbol { name: name.into() }
    }

    /// Create a malformed query error.
    pub fn malformed(query: &'static str, variant: &'static str) -> Self {
        Self::MalformedQuery { query, variant }
    }

    /// Create an unexpected node error.
    pub fn unexpected_node(expected: &'static str, found: SyntaxKind) -> Self {
        Self::UnexpectedNode { expected, found }
    }

    /// Check if this is the "name not found" failure.
    pub fn is_unsolved(&self) -> bool {
        matches!(self, Self::UnsolvedSymbol { .. })
    }
}

/// Result alias for resolution operations.
pub type ResolveResult<T> = Result<T, ResolveError>;
