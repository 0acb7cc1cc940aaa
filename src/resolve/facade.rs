//! Public entry point for resolving nodes.

use std::sync::Arc;

use rayon::prelude::*;

use crate::error::{ResolveError, ResolveResult};
use crate::model::{
    ConstructorUsage, Declaration, MethodUsage, ReferenceType, ResolvedType, SymbolReference,
    TypeDecl, enclosing_type_node,
};
use crate::parser::ast::{self, Expr};
use crate::parser::{AstNode, SyntaxKind};
use crate::solver::TypeSolver;
use crate::syntax::NodeHandle;

use super::context::{Context, context_for};
use super::convert::convert_or_unsolved;
use super::expr::{ExprTyper, type_of_expr};

/// Resolves types and declarations for nodes of any source unit, looking
/// types up in one symbol source.
///
/// Nothing is cached here; wrap the solver in a
/// [`CombinedTypeSolver`](crate::solver::CombinedTypeSolver) to memoize
/// type lookups.
#[derive(Clone)]
pub struct Resolver {
    solver: Arc<dyn TypeSolver>,
}

impl Resolver {
    pub fn new(solver: Arc<dyn TypeSolver>) -> Self {
        Self { solver }
    }

    pub fn solver(&self) -> &dyn TypeSolver {
        &*self.solver
    }

    /// Type of an expression, a type node, or a variable declarator or
    /// parameter. Names that cannot be resolved give
    /// [`ResolvedType::Unsolved`].
    pub fn type_of(&self, handle: &NodeHandle) -> ResolveResult<ResolvedType> {
        let node = handle.node()?;
        let unit = handle.unit();
        let kind = node.kind();
        if let Some(expr) = Expr::cast(node.clone()) {
            return type_of_expr(unit, &expr, self.solver());
        }
        if let Some(ty) = ast::Type::cast(node.clone()) {
            return convert_or_unsolved(unit, &ty, self.solver());
        }
        match kind {
            SyntaxKind::VAR_DECLARATOR | SyntaxKind::PARAM | SyntaxKind::ENUM_CONSTANT => {
                self.declared_type(&Declaration::from_handle(handle.clone())?)
            }
            _ => Err(ResolveError::unexpected_node("expression, type or variable", kind)),
        }
    }

    /// The declaration a name, member access, call, object creation or
    /// type reference refers to.
    ///
    /// A `NAME_REF` is resolved through its parent; a `NAME` gives the
    /// declaration it names.
    pub fn declaration_of(&self, handle: &NodeHandle) -> ResolveResult<SymbolReference<Declaration>> {
        let mut node = handle.node()?;
        let typer = ExprTyper::new(handle.unit(), self.solver());
        match node.kind() {
            SyntaxKind::NAME => {
                let owner = node
                    .parent()
                    .ok_or(ResolveError::unexpected_node("declaration name", node.kind()))?;
                return Ok(SymbolReference::Solved(Declaration::from_handle(handle.sibling(&owner))?));
            }
            SyntaxKind::NAME_REF => {
                if let Some(parent) = node.parent() {
                    node = parent;
                }
            }
            _ => {}
        }
        typer.declaration_of(&node)
    }

    /// The method a call expression invokes, with receiver and inferred
    /// type arguments substituted.
    pub fn solve_method_call(&self, handle: &NodeHandle) -> ResolveResult<SymbolReference<MethodUsage>> {
        let node = handle.node()?;
        let kind = node.kind();
        let call = ast::MethodCallExpr::cast(node).ok_or(ResolveError::unexpected_node("method call", kind))?;
        ExprTyper::new(handle.unit(), self.solver()).solve_call(&call)
    }

    /// The constructor a `new` expression or explicit constructor call
    /// invokes.
    pub fn solve_constructor(&self, handle: &NodeHandle) -> ResolveResult<SymbolReference<ConstructorUsage>> {
        let node = handle.node()?;
        ExprTyper::new(handle.unit(), self.solver()).solve_constructor(&node)
    }

    /// Convert a type node to the type it denotes in its scope.
    pub fn convert_to_usage(&self, handle: &NodeHandle) -> ResolveResult<ResolvedType> {
        let node = handle.node()?;
        let kind = node.kind();
        let ty = ast::Type::cast(node).ok_or(ResolveError::unexpected_node("type", kind))?;
        convert_or_unsolved(handle.unit(), &ty, self.solver())
    }

    pub fn ancestors_of(&self, decl: &TypeDecl, accept_incomplete: bool) -> ResolveResult<Vec<ReferenceType>> {
        decl.ancestors(self.solver(), accept_incomplete)
    }

    /// The type declared by `handle`, or the type enclosing it (an
    /// anonymous class body included).
    pub fn type_declaration(&self, handle: &NodeHandle) -> ResolveResult<TypeDecl> {
        let node = handle.node()?;
        if node.kind().is_type_decl() {
            return TypeDecl::from_handle(handle.clone());
        }
        let outer = enclosing_type_node(&node)
            .ok_or(ResolveError::unexpected_node("node inside a type", node.kind()))?;
        TypeDecl::from_handle(handle.sibling(&outer))
    }

    /// The scope names at `handle` are resolved in.
    pub fn context_for(&self, handle: &NodeHandle) -> ResolveResult<Box<dyn Context + '_>> {
        let node = handle.node()?;
        Ok(context_for(handle.unit(), &node, self.solver()))
    }

    /// Type of a value declaration.
    pub fn declared_type(&self, decl: &Declaration) -> ResolveResult<ResolvedType> {
        decl.declared_type(self.solver())
    }

    /// [`type_of`](Self::type_of) for many nodes in parallel, results in
    /// input order.
    pub fn resolve_types(&self, handles: &[NodeHandle]) -> Vec<ResolveResult<ResolvedType>> {
        handles.par_iter().map(|handle| self.type_of(handle)).collect()
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver").finish_non_exhaustive()
    }
}
