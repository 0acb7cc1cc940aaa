//! Symbol source over explicitly registered declarations.

use rustc_hash::FxHashMap;

use super::TypeSolver;
use crate::model::{SymbolReference, TypeDecl};

/// Declarations registered by name, typically for tests or synthetic types.
#[derive(Debug, Default)]
pub struct MemoryTypeSolver {
    types: FxHashMap<String, TypeDecl>,
}

impl MemoryTypeSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `decl` under its own qualified name.
    pub fn add(&mut self, decl: TypeDecl) {
        let name = decl.qualified_name().to_string();
        self.add_as(name, decl);
    }

    /// Register `decl` under an explicit name, replacing any previous entry.
    pub fn add_as(&mut self, qualified_name: impl Into<String>, decl: TypeDecl) {
        let qualified_name = qualified_name.into();
        if self.types.insert(qualified_name.clone(), decl).is_some() {
            tracing::debug!(name = %qualified_name, "replaced registered type");
        }
    }

    pub fn with(mut self, decl: TypeDecl) -> Self {
        self.add(decl);
        self
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeSolver for MemoryTypeSolver {
    fn try_solve_type(&self, qualified_name: &str) -> SymbolReference<TypeDecl> {
        match self.types.get(qualified_name) {
            Some(decl) => SymbolReference::Solved(decl.clone()),
            None => SymbolReference::Unsolved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::SourceUnit;

    #[test]
    fn test_registered_types() {
        let unit = SourceUnit::parse("package p; class A {} class B {}");
        let a = TypeDecl::from_handle(unit.find_type(&["A"]).unwrap()).unwrap();
        let b = TypeDecl::from_handle(unit.find_type(&["B"]).unwrap()).unwrap();

        let mut solver = MemoryTypeSolver::new().with(a.clone());
        solver.add_as("alias.B", b.clone());

        assert_eq!(solver.len(), 2);
        assert_eq!(solver.try_solve_type("p.A"), SymbolReference::Solved(a));
        assert_eq!(solver.solve_type("alias.B").unwrap(), b);
        assert!(solver.try_solve_type("p.B").is_unsolved());
        assert!(solver.root_type().is_err());
    }
}
