use super::{Context, Scope};
use crate::error::ResolveResult;
use crate::model::{Declaration, MethodUsage, ResolvedType, SymbolReference, TypeDecl};

/// Scope of a type's header: its `extends`/`implements` clauses and the
/// bounds of its type parameters.
///
/// Only the type parameters and the type's own name are visible here, so
/// resolving a supertype never consults inherited members.
pub struct ClassHeaderContext<'a> {
    scope: Scope<'a>,
}

impl<'a> ClassHeaderContext<'a> {
    pub(crate) fn new(scope: Scope<'a>) -> Self {
        Self { scope }
    }

    fn decl(&self) -> ResolveResult<TypeDecl> {
        TypeDecl::from_handle(self.scope.handle(self.scope.node()))
    }
}

impl Context for ClassHeaderContext<'_> {
    fn resolve_value(&self, name: &str) -> ResolveResult<SymbolReference<Declaration>> {
        self.scope.parent().resolve_value(name)
    }

    fn resolve_type(&self, name: &str) -> ResolveResult<SymbolReference<TypeDecl>> {
        let decl = self.decl()?;
        if let Some(tp) = decl
            .type_parameters()?
            .into_iter()
            .find(|tp| tp.name() == name)
        {
            return Ok(SymbolReference::Solved(tp.as_type_decl()));
        }
        if decl.name() == name {
            return Ok(SymbolReference::Solved(decl));
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
