//! Scope chain for simple-name resolution.
//!
//! Every scope-bearing node produces a [`Context`] that resolves names
//! declared directly in that node and otherwise escalates to the context of
//! the enclosing scope:
//!
//! ```text
//! BlockContext / ForContext / CatchClauseContext
//!   → CallableContext            (parameters, method type parameters)
//!   → ClassContext               (members, inherited members; also
//!                                   anonymous class bodies)
//!     or ClassHeaderContext      (type parameters, own name)
//!   → CompilationUnitContext     (declared types, imports, package, java.lang)
//! ```
//!
//! Contexts are transient: [`context_for`] derives one from a node's
//! position whenever it is needed.

mod block;
mod callable;
mod catch;
mod class;
mod class_header;
mod compilation_unit;
mod for_stmt;

pub use block::BlockContext;
pub use callable::CallableContext;
pub use catch::CatchClauseContext;
pub use class::ClassContext;
pub use class_header::ClassHeaderContext;
pub use compilation_unit::CompilationUnitContext;
pub use for_stmt::ForContext;

use std::sync::Arc;

use crate::error::ResolveResult;
use crate::model::{Declaration, MethodUsage, ResolvedType, SymbolReference, TypeDecl};
use crate::parser::{SyntaxKind, SyntaxNode, TextSize};
use crate::solver::TypeSolver;
use crate::syntax::{NodeHandle, SourceUnit};

/// A scope's view for resolving simple names.
pub trait Context {
    /// A variable, parameter, field or enum constant named `name`.
    fn resolve_value(&self, name: &str) -> ResolveResult<SymbolReference<Declaration>>;

    /// A type or type variable named `name`.
    fn resolve_type(&self, name: &str) -> ResolveResult<SymbolReference<TypeDecl>>;

    /// The method an unqualified call `name(args)` invokes, with parameter
    /// and return types instantiated for the call.
    fn solve_method(
        &self,
        name: &str,
        arg_types: &[ResolvedType],
    ) -> ResolveResult<SymbolReference<MethodUsage>>;
}

/// State shared by every scope kind.
#[derive(Clone)]
pub(crate) struct Scope<'a> {
    unit: Arc<SourceUnit>,
    /// The scope-bearing node.
    node: SyntaxNode,
    /// Start of the node being resolved; only earlier locals are visible.
    origin: TextSize,
    solver: &'a dyn TypeSolver,
}

impl<'a> Scope<'a> {
    pub(crate) fn node(&self) -> &SyntaxNode {
        &self.node
    }

    pub(crate) fn solver(&self) -> &'a dyn TypeSolver {
        self.solver
    }

    pub(crate) fn origin(&self) -> TextSize {
        self.origin
    }

    pub(crate) fn handle(&self, node: &SyntaxNode) -> NodeHandle {
        self.unit.handle(node)
    }

    /// The context of the scope enclosing this one.
    pub(crate) fn parent(&self) -> Box<dyn Context + 'a> {
        tracing::trace!(from = ?self.node.kind(), "escalating to enclosing scope");
        context_at(&self.unit, &self.node, self.origin, self.solver)
    }
}

/// The context in which names at `node` are resolved.
pub fn context_for<'a>(
    unit: &Arc<SourceUnit>,
    node: &SyntaxNode,
    solver: &'a dyn TypeSolver,
) -> Box<dyn Context + 'a> {
    context_at(unit, node, node.text_range().start(), solver)
}

fn context_at<'a>(
    unit: &Arc<SourceUnit>,
    node: &SyntaxNode,
    origin: TextSize,
    solver: &'a dyn TypeSolver,
) -> Box<dyn Context + 'a> {
    let mut child = node.clone();
    while let Some(parent) = child.parent() {
        let scope = || Scope {
            unit: unit.clone(),
            node: parent.clone(),
            origin,
            solver,
        };
        let context: Option<Box<dyn Context + 'a>> = match parent.kind() {
            SyntaxKind::BLOCK => Some(Box::new(BlockContext::new(scope()))),
            SyntaxKind::FOR_STMT => Some(Box::new(ForContext::new(scope()))),
            SyntaxKind::FOR_EACH_STMT if is_statement(&child) => {
                Some(Box::new(ForContext::new(scope())))
            }
            SyntaxKind::CATCH_CLAUSE if child.kind() == SyntaxKind::BLOCK => {
                Some(Box::new(CatchClauseContext::new(scope())))
            }
            SyntaxKind::METHOD_DECL | SyntaxKind::CONSTRUCTOR_DECL => {
                Some(Box::new(CallableContext::new(scope())))
            }
            kind if kind.is_type_decl() => {
                if matches!(child.kind(), SyntaxKind::CLASS_BODY | SyntaxKind::ENUM_BODY) {
                    Some(Box::new(ClassContext::new(scope())))
                } else {
                    Some(Box::new(ClassHeaderContext::new(scope())))
                }
            }
            SyntaxKind::NEW_EXPR if child.kind() == SyntaxKind::CLASS_BODY => {
                Some(Box::new(ClassContext::new(scope())))
            }
            SyntaxKind::SOURCE_FILE => Some(Box::new(CompilationUnitContext::new(scope()))),
            _ => None,
        };
        if let Some(context) = context {
            return context;
        }
        child = parent;
    }
    // `node` is the root itself.
    Box::new(CompilationUnitContext::new(Scope {
        unit: unit.clone(),
        node: node.clone(),
        origin,
        solver,
    }))
}

/// The body of an enhanced `for`, as opposed to its header.
fn is_statement(node: &SyntaxNode) -> bool {
    let kind = node.kind();
    !(kind.is_expr() || kind.is_type() || kind == SyntaxKind::VAR_DECLARATOR)
}

#[cfg(test)]
mod tests;
