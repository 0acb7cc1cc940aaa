use super::{Context, Scope};
use crate::error::ResolveResult;
use crate::model::{Declaration, MethodUsage, ResolvedType, SymbolReference, TypeDecl};
use crate::resolve::method_resolution::resolve_overload;

/// Scope of a type body, named or anonymous: its members and the members
/// it inherits.
pub struct ClassContext<'a> {
    scope: Scope<'a>,
}

impl<'a> ClassContext<'a> {
    pub(crate) fn new(scope: Scope<'a>) -> Self {
        Self { scope }
    }

    pub fn decl(&self) -> ResolveResult<TypeDecl> {
        TypeDecl::from_handle(self.scope.handle(self.scope.node()))
    }
}

impl Context for ClassContext<'_> {
    fn resolve_value(&self, name: &str) -> ResolveResult<SymbolReference<Declaration>> {
        let decl = self.decl()?;
        if let Some(field) = decl.find_field(name, self.scope.solver())? {
            return Ok(SymbolReference::Solved(Declaration::Field(field)));
        }
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
        if let Some(member) = decl.member_type(name)? {
            return Ok(SymbolReference::Solved(member));
        }
        if decl.name() == name {
            return Ok(SymbolReference::Solved(decl));
        }
        if let Some(inherited) = decl.find_member_type(name, self.scope.solver())? {
            return Ok(SymbolReference::Solved(inherited));
        }
        self.scope.parent().resolve_type(name)
    }

    /// The innermost type declaring or inheriting a method of this name
    /// decides the call, even when none of its overloads apply.
    fn solve_method(
        &self,
        name: &str,
        arg_types: &[ResolvedType],
    ) -> ResolveResult<SymbolReference<MethodUsage>> {
        let solver = self.scope.solver();
        let candidates = self.decl()?.methods_named(name, solver)?;
        if candidates.is_empty() {
            return self.scope.parent().solve_method(name, arg_types);
        }
        resolve_overload(candidates, arg_types, solver)
    }
}
