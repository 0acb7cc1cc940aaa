//! Symbol source over source units held in memory.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use super::{TypeSolver, decl_from_index, index_unit};
use crate::model::{SymbolReference, TypeDecl};
use crate::syntax::{NodeHandle, SourceUnit};

#[derive(Debug, Default)]
struct SourceIndex {
    /// Unit revisions the index was built from, parallel to `units`.
    revisions: Vec<u64>,
    types: IndexMap<String, NodeHandle>,
}

/// Types declared in a set of parsed units.
///
/// Units may be edited in place with [`SourceUnit::replace_text`]; the
/// index is rebuilt on the next lookup after any unit changes.
#[derive(Debug, Default)]
pub struct SourceSetTypeSolver {
    units: Vec<Arc<SourceUnit>>,
    index: RwLock<SourceIndex>,
}

impl SourceSetTypeSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_units(units: impl IntoIterator<Item = Arc<SourceUnit>>) -> Self {
        let mut solver = Self::new();
        for unit in units {
            solver.add_unit(unit);
        }
        solver
    }

    /// Add a unit. Types already declared by earlier units win.
    pub fn add_unit(&mut self, unit: Arc<SourceUnit>) {
        let index = self.index.get_mut();
        index.revisions.push(unit.revision());
        index_unit(&unit, &mut index.types);
        self.units.push(unit);
    }

    /// Parse `text` and add it as a new unit.
    pub fn add_source(&mut self, text: &str) -> Arc<SourceUnit> {
        let unit = SourceUnit::parse(text);
        self.add_unit(unit.clone());
        unit
    }

    pub fn units(&self) -> &[Arc<SourceUnit>] {
        &self.units
    }

    /// Qualified names of every indexed type.
    pub fn type_names(&self) -> Vec<String> {
        self.refresh();
        self.index.read().types.keys().cloned().collect()
    }

    fn is_current(&self, index: &SourceIndex) -> bool {
        index
            .revisions
            .iter()
            .zip(&self.units)
            .all(|(revision, unit)| *revision == unit.revision())
    }

    fn refresh(&self) {
        if self.is_current(&self.index.read()) {
            return;
        }
        let mut index = self.index.write();
        if self.is_current(&index) {
            return;
        }
        let mut rebuilt = SourceIndex::default();
        for unit in &self.units {
            rebuilt.revisions.push(unit.revision());
            index_unit(unit, &mut rebuilt.types);
        }
        tracing::debug!(types = rebuilt.types.len(), "source set reindexed");
        *index = rebuilt;
    }
}

impl TypeSolver for SourceSetTypeSolver {
    fn try_solve_type(&self, qualified_name: &str) -> SymbolReference<TypeDecl> {
        self.refresh();
        decl_from_index(qualified_name, self.index.read().types.get(qualified_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_and_top_level_types() {
        let mut solver = SourceSetTypeSolver::new();
        solver.add_source("package a; public class Outer { static class Inner {} }");
        solver.add_source("class Plain {}");

        assert!(solver.has_type("a.Outer"));
        assert!(solver.has_type("a.Outer.Inner"));
        assert!(solver.has_type("Plain"));
        assert!(solver.try_solve_type("a.Inner").is_unsolved());
        assert_eq!(
            solver.type_names(),
            vec!["a.Outer.Inner", "a.Outer", "Plain"]
        );
    }

    #[test]
    fn test_first_declaration_wins() {
        let mut solver = SourceSetTypeSolver::new();
        let first = solver.add_source("package p; class A { int x; }");
        solver.add_source("package p; class A { int y; }");

        let a = solver.solve_type("p.A").unwrap();
        assert_eq!(a.handle().unit().id(), first.id());
    }

    #[test]
    fn test_reindexes_after_edit() {
        let mut solver = SourceSetTypeSolver::new();
        let unit = solver.add_source("package p; class A {}");
        assert!(solver.has_type("p.A"));

        unit.replace_text("package p; class B {}");
        assert!(!solver.has_type("p.A"));
        assert!(solver.has_type("p.B"));
    }
}
