//! Bundled declarations for the core library.
//!
//! The stub sources under `stubs/` declare the commonly used parts of
//! `java.lang`, `java.util` and `java.io` (signatures only). They are parsed
//! once per process and shared; parsing runs in parallel.
//!
//! ```ignore
//! use symsolve::solver::{BuiltinTypeSolver, TypeSolver};
//!
//! let builtin = BuiltinTypeSolver::shared();
//! assert!(builtin.has_type("java.lang.String"));
//! ```

use std::sync::{Arc, LazyLock};

use indexmap::IndexMap;
use rayon::prelude::*;

use super::{TypeSolver, decl_from_index, index_unit};
use crate::model::{SymbolReference, TypeDecl};
use crate::syntax::{NodeHandle, SourceUnit};

const STUB_SOURCES: &[(&str, &str)] = &[
    ("java/lang.java", include_str!("stubs/lang.java")),
    ("java/util.java", include_str!("stubs/util.java")),
    ("java/io.java", include_str!("stubs/io.java")),
];

static SHARED: LazyLock<Arc<BuiltinTypeSolver>> =
    LazyLock::new(|| Arc::new(BuiltinTypeSolver::load()));

/// Symbol source over the bundled core-library stubs.
#[derive(Debug)]
pub struct BuiltinTypeSolver {
    units: Vec<Arc<SourceUnit>>,
    index: IndexMap<String, NodeHandle>,
}

impl BuiltinTypeSolver {
    /// The process-wide instance, parsed on first access.
    pub fn shared() -> Arc<BuiltinTypeSolver> {
        SHARED.clone()
    }

    fn load() -> Self {
        let units: Vec<_> = STUB_SOURCES
            .par_iter()
            .map(|(path, text)| {
                let unit = SourceUnit::parse_file(*path, text);
                if unit.has_errors() {
                    tracing::warn!(path, errors = unit.errors().len(), "builtin stub has syntax errors");
                }
                unit
            })
            .collect();

        let mut index = IndexMap::new();
        for unit in &units {
            index_unit(unit, &mut index);
        }
        tracing::debug!(types = index.len(), "builtin types indexed");
        Self { units, index }
    }

    /// Number of parsed stub units.
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Qualified names of every bundled type, in declaration order
    /// (nested types before their outer type).
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }
}

impl TypeSolver for BuiltinTypeSolver {
    fn try_solve_type(&self, qualified_name: &str) -> SymbolReference<TypeDecl> {
        decl_from_index(qualified_name, self.index.get(qualified_name))
    }
}
