//! Helpers for building a resolver over in-memory sources.

use std::sync::Arc;

use once_cell::sync::Lazy;
use symsolve::parser::SyntaxKind;
use symsolve::{
    BuiltinTypeSolver, CombinedTypeSolver, NodeHandle, Resolver, SourceSetTypeSolver,
    SourceUnit, TypeDecl, TypeSolver,
};

/// Builtin stubs parse once for the whole test binary.
pub static BUILTINS: Lazy<Arc<BuiltinTypeSolver>> = Lazy::new(BuiltinTypeSolver::shared);

/// Parsed sources plus a resolver that sees them and the builtins.
pub struct Workspace {
    pub units: Vec<Arc<SourceUnit>>,
    pub resolver: Resolver,
}

/// Parse every text into its own unit, sources first, builtins last.
pub fn workspace(texts: &[&str]) -> Workspace {
    let mut sources = SourceSetTypeSolver::new();
    let units = texts.iter().map(|t| sources.add_source(t)).collect();
    let solver = CombinedTypeSolver::new([
        Arc::new(sources) as Arc<dyn TypeSolver>,
        BUILTINS.clone() as Arc<dyn TypeSolver>,
    ]);
    Workspace {
        units,
        resolver: Resolver::new(Arc::new(solver)),
    }
}

impl Workspace {
    pub fn solver(&self) -> &dyn TypeSolver {
        self.resolver.solver()
    }

    /// First node of `kind` whose trimmed text is `text`, in any unit.
    pub fn find(&self, kind: SyntaxKind, text: &str) -> NodeHandle {
        self.find_all(kind, text)
            .into_iter()
            .next()
            .unwrap_or_else(|| panic!("no {kind:?} node `{text}`"))
    }

    pub fn find_all(&self, kind: SyntaxKind, text: &str) -> Vec<NodeHandle> {
        self.units
            .iter()
            .flat_map(|unit| {
                unit.syntax()
                    .descendants()
                    .filter(|n| n.kind() == kind && n.text().to_string().trim() == text)
                    .map(|n| unit.handle(&n))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// The type declared under `qualified_name`.
    pub fn type_decl(&self, qualified_name: &str) -> TypeDecl {
        self.solver()
            .solve_type(qualified_name)
            .unwrap_or_else(|e| panic!("{qualified_name}: {e}"))
    }

    /// Rendered type of the first node of `kind` spelled `text`.
    pub fn type_of(&self, kind: SyntaxKind, text: &str) -> String {
        let handle = self.find(kind, text);
        self.resolver.type_of(&handle).unwrap().describe()
    }
}
