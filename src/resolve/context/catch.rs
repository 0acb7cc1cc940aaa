use super::{Context, Scope};
use crate::error::ResolveResult;
use crate::model::{Declaration, MethodUsage, ParameterDecl, ResolvedType, SymbolReference, TypeDecl};
use crate::parser::AstNode;
use crate::parser::ast;

/// The exception parameter of a `catch` clause, visible in its body.
pub struct CatchClauseContext<'a> {
    scope: Scope<'a>,
}

impl<'a> CatchClauseContext<'a> {
    pub(crate) fn new(scope: Scope<'a>) -> Self {
        Self { scope }
    }
}

impl Context for CatchClauseContext<'_> {
    fn resolve_value(&self, name: &str) -> ResolveResult<SymbolReference<Declaration>> {
        let param = ast::CatchClause::cast(self.scope.node().clone()).and_then(|c| c.param());
        if let Some(param) = param.filter(|p| p.name().as_deref() == Some(name)) {
            let decl = ParameterDecl::from_handle(self.scope.handle(param.syntax()))?;
            return Ok(SymbolReference::Solved(Declaration::Parameter(decl)));
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
