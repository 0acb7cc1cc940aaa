use super::{Context, Scope};
use crate::error::ResolveResult;
use crate::model::{Declaration, LocalVariableDecl, MethodUsage, ResolvedType, SymbolReference, TypeDecl};
use crate::parser::AstNode;
use crate::parser::ast;

/// Locals and local classes declared in a block before the resolved node.
pub struct BlockContext<'a> {
    scope: Scope<'a>,
}

impl<'a> BlockContext<'a> {
    pub(crate) fn new(scope: Scope<'a>) -> Self {
        Self { scope }
    }
}

impl Context for BlockContext<'_> {
    fn resolve_value(&self, name: &str) -> ResolveResult<SymbolReference<Declaration>> {
        let origin = self.scope.origin();
        for statement in self.scope.node().children() {
            let Some(local) = ast::LocalVarDecl::cast(statement) else {
                continue;
            };
            for declarator in local.declarators() {
                if declarator.syntax().text_range().end() <= origin
                    && declarator.name().as_deref() == Some(name)
                {
                    let handle = self.scope.handle(declarator.syntax());
                    return Ok(SymbolReference::Solved(Declaration::LocalVariable(
                        LocalVariableDecl::from_handle(handle)?,
                    )));
                }
            }
        }
        self.scope.parent().resolve_value(name)
    }

    fn resolve_type(&self, name: &str) -> ResolveResult<SymbolReference<TypeDecl>> {
        let origin = self.scope.origin();
        for statement in self.scope.node().children() {
            if !statement.kind().is_type_decl() || statement.text_range().start() > origin {
                continue;
            }
            if ast::TypeDecl::cast(statement.clone()).and_then(|d| d.name()).as_deref() == Some(name) {
                let decl = TypeDecl::from_handle(self.scope.handle(&statement))?;
                return Ok(SymbolReference::Solved(decl));
            }
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
