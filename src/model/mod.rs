//! Declaration and type model.
//!
//! - [`Declaration`] - tagged variant over everything nameable
//! - [`ResolvedType`] - types as used, with generic arguments
//! - [`SymbolReference`] - solved / ambiguous / unsolved lookup results
//! - [`MethodUsage`] - a method with receiver-specific parameter and return types

mod declaration;
mod method_usage;
mod symbol_reference;
mod types;

pub use declaration::{
    ConstructorDecl, Declaration, FieldDecl, LocalVariableDecl, MethodDecl, ParameterDecl,
    TypeDecl, TypeKind, TypeParameterDecl,
};
pub use method_usage::{ConstructorUsage, MethodUsage};
pub use symbol_reference::SymbolReference;
pub use types::{PrimitiveType, ReferenceType, ResolvedType, TypeParameterMap, Wildcard};

pub(crate) use declaration::enclosing_type_node;
