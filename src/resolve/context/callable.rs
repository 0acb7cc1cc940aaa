use super::{Context, Scope};
use crate::error::ResolveResult;
use crate::model::{
    Declaration, MethodUsage, ParameterDecl, ResolvedType, SymbolReference, TypeDecl,
    TypeParameterDecl,
};
use crate::parser::AstNode;
use crate::parser::ast::{self, Param, TypeParam};

/// Parameters and type parameters of a method or constructor.
pub struct CallableContext<'a> {
    scope: Scope<'a>,
}

impl<'a> CallableContext<'a> {
    pub(crate) fn new(scope: Scope<'a>) -> Self {
        Self { scope }
    }

    fn params(&self) -> Vec<Param> {
        let node = self.scope.node().clone();
        if let Some(method) = ast::MethodDecl::cast(node.clone()) {
            return method.params();
        }
        ast::ConstructorDecl::cast(node)
            .map(|c| c.params())
            .unwrap_or_default()
    }

    fn type_params(&self) -> Vec<TypeParam> {
        let node = self.scope.node().clone();
        if let Some(method) = ast::MethodDecl::cast(node.clone()) {
            return method.type_params();
        }
        ast::ConstructorDecl::cast(node)
            .map(|c| c.type_params())
            .unwrap_or_default()
    }
}

impl Context for CallableContext<'_> {
    fn resolve_value(&self, name: &str) -> ResolveResult<SymbolReference<Declaration>> {
        if let Some(param) = self
            .params()
            .into_iter()
            .find(|p| p.name().as_deref() == Some(name))
        {
            let decl = ParameterDecl::from_handle(self.scope.handle(param.syntax()))?;
            return Ok(SymbolReference::Solved(Declaration::Parameter(decl)));
        }
        self.scope.parent().resolve_value(name)
    }

    fn resolve_type(&self, name: &str) -> ResolveResult<SymbolReference<TypeDecl>> {
        if let Some(tp) = self
            .type_params()
            .into_iter()
            .find(|tp| tp.name().as_deref() == Some(name))
        {
            let decl = TypeParameterDecl::from_handle(self.scope.handle(tp.syntax()))?;
            return Ok(SymbolReference::Solved(decl.as_type_decl()));
        }
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
