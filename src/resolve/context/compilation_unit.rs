use super::{Context, Scope};
use crate::base::constants::IMPLICIT_IMPORT_PACKAGE;
use crate::base::{join_qualified, last_segment, parent_segment};
use crate::error::ResolveResult;
use crate::model::{Declaration, MethodUsage, ResolvedType, SymbolReference, TypeDecl};
use crate::parser::AstNode;
use crate::parser::ast::{self, ImportDecl};
use crate::resolve::method_resolution::resolve_overload;

/// Top of the chain: types declared in the unit, imports, the unit's
/// package, `java.lang` and finally fully qualified names.
pub struct CompilationUnitContext<'a> {
    scope: Scope<'a>,
}

impl<'a> CompilationUnitContext<'a> {
    pub(crate) fn new(scope: Scope<'a>) -> Self {
        Self { scope }
    }

    fn file(&self) -> Option<ast::SourceFile> {
        ast::SourceFile::cast(self.scope.node().clone())
    }

    fn imports(&self) -> Vec<ImportDecl> {
        self.file().map(|f| f.imports().collect()).unwrap_or_default()
    }

    fn package(&self) -> String {
        self.file()
            .and_then(|f| f.package_decl())
            .and_then(|p| p.path())
            .map(|p| p.qualified())
            .unwrap_or_default()
    }

    /// Types that static imports bring members in from, for a member named
    /// `name`.
    fn static_import_owners(&self, name: &str) -> Vec<TypeDecl> {
        let solver = self.scope.solver();
        let mut owners: Vec<TypeDecl> = Vec::new();
        for import in self.imports().into_iter().filter(|i| i.is_static()) {
            let Some(path) = import.path() else {
                continue;
            };
            let qualified = path.qualified();
            let owner_name = if import.is_on_demand() {
                Some(qualified.as_str())
            } else if last_segment(&qualified) == name {
                parent_segment(&qualified)
            } else {
                None
            };
            if let Some(owner) = owner_name.and_then(|n| solver.try_solve_type(n).into_solved()) {
                if !owners.contains(&owner) {
                    owners.push(owner);
                }
            }
        }
        owners
    }
}

impl Context for CompilationUnitContext<'_> {
    fn resolve_value(&self, name: &str) -> ResolveResult<SymbolReference<Declaration>> {
        let solver = self.scope.solver();
        for owner in self.static_import_owners(name) {
            if let Some(field) = owner.find_field(name, solver)? {
                return Ok(SymbolReference::Solved(Declaration::Field(field)));
            }
        }
        Ok(SymbolReference::Unsolved)
    }

    fn resolve_type(&self, name: &str) -> ResolveResult<SymbolReference<TypeDecl>> {
        let solver = self.scope.solver();

        if let Some(file) = self.file() {
            if let Some(decl) = file.type_decls().find(|d| d.name().as_deref() == Some(name)) {
                let decl = TypeDecl::from_handle(self.scope.handle(decl.syntax()))?;
                return Ok(SymbolReference::Solved(decl));
            }
        }

        let imports = self.imports();
        for import in imports.iter().filter(|i| !i.is_static() && !i.is_on_demand()) {
            let Some(path) = import.path() else {
                continue;
            };
            let qualified = path.qualified();
            if last_segment(&qualified) == name {
                let found = solver.try_solve_type(&qualified);
                if !found.is_unsolved() {
                    return Ok(found);
                }
            }
        }

        let same_package = solver.try_solve_type(&join_qualified(&self.package(), name));
        if same_package.is_solved() {
            return Ok(same_package);
        }

        let mut on_demand: Vec<TypeDecl> = Vec::new();
        for import in imports.iter().filter(|i| !i.is_static() && i.is_on_demand()) {
            let Some(path) = import.path() else {
                continue;
            };
            let candidate = join_qualified(&path.qualified(), name);
            if let SymbolReference::Solved(decl) = solver.try_solve_type(&candidate) {
                if !on_demand.contains(&decl) {
                    on_demand.push(decl);
                }
            }
        }
        if !on_demand.is_empty() {
            if on_demand.len() > 1 {
                tracing::debug!(name, candidates = on_demand.len(), "ambiguous on-demand import");
            }
            return Ok(SymbolReference::from_candidates(on_demand));
        }

        let implicit = solver.try_solve_type(&join_qualified(IMPLICIT_IMPORT_PACKAGE, name));
        if implicit.is_solved() {
            return Ok(implicit);
        }

        Ok(solver.try_solve_type(name))
    }

    fn solve_method(
        &self,
        name: &str,
        arg_types: &[ResolvedType],
    ) -> ResolveResult<SymbolReference<MethodUsage>> {
        let solver = self.scope.solver();
        let mut candidates = Vec::new();
        for owner in self.static_import_owners(name) {
            for usage in owner.methods_named(name, solver)? {
                if usage.decl().is_static()? {
                    candidates.push(usage);
                }
            }
        }
        if candidates.is_empty() {
            return Ok(SymbolReference::Unsolved);
        }
        resolve_overload(candidates, arg_types, solver)
    }
}
