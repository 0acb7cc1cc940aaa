use super::{Context, Scope};
use crate::error::ResolveResult;
use crate::model::{Declaration, LocalVariableDecl, MethodUsage, ResolvedType, SymbolReference, TypeDecl};
use crate::parser::AstNode;
use crate::parser::ast::{self, VarDeclarator};

/// Variables declared in a `for` init section or an enhanced `for` header.
pub struct ForContext<'a> {
    scope: Scope<'a>,
}

impl<'a> ForContext<'a> {
    pub(crate) fn new(scope: Scope<'a>) -> Self {
        Self { scope }
    }

    fn declarators(&self) -> Vec<VarDeclarator> {
        let node = self.scope.node().clone();
        if let Some(for_each) = ast::ForEachStmt::cast(node.clone()) {
            return for_each.declarator().into_iter().collect();
        }
        ast::ForStmt::cast(node)
            .map(|f| f.init_declarators())
            .unwrap_or_default()
    }
}

impl Context for ForContext<'_> {
    fn resolve_value(&self, name: &str) -> ResolveResult<SymbolReference<Declaration>> {
        let origin = self.scope.origin();
        let found = self
            .declarators()
            .into_iter()
            .filter(|d| d.syntax().text_range().end() <= origin)
            .find(|d| d.name().as_deref() == Some(name));
        if let Some(declarator) = found {
            let handle = self.scope.handle(declarator.syntax());
            return Ok(SymbolReference::Solved(Declaration::LocalVariable(
                LocalVariableDecl::from_handle(handle)?,
            )));
        }
        self.scope.parent().resolve_value(name)
    }

    fn resolve_type(&self, name: &str) -> ResolveResult<SymbolReference<TypeDecl>> {
        self.scope.parent().resolve_type(name)
    }

    fn solve_method(
        &self,
        name: &str,
        arg_types: &[ResolvedType],
    ) -> ResolveResult<SymbolReference<MethodUsage>> {
        self.scope.parent().solve_method(name, arg_types)
    }
}
