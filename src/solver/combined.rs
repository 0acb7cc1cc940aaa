//! Priority-ordered chain of symbol sources.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::{BuiltinTypeSolver, TypeSolver};
use crate::model::{SymbolReference, TypeDecl};

/// Asks each child in order; the first one that solves a name wins.
///
/// Answers, including misses, are memoized by qualified name. Call
/// [`clear_cache`](Self::clear_cache) after the children's contents change.
pub struct CombinedTypeSolver {
    children: Vec<Arc<dyn TypeSolver>>,
    cache: Option<RwLock<FxHashMap<String, SymbolReference<TypeDecl>>>>,
}

impl CombinedTypeSolver {
    pub fn new(children: impl IntoIterator<Item = Arc<dyn TypeSolver>>) -> Self {
        Self {
            children: children.into_iter().collect(),
            cache: Some(RwLock::new(FxHashMap::default())),
        }
    }

    /// `children` followed by the bundled core library.
    pub fn with_builtins(children: impl IntoIterator<Item = Arc<dyn TypeSolver>>) -> Self {
        let mut combined = Self::new(children);
        combined.add(BuiltinTypeSolver::shared());
        combined
    }

    /// Enable or disable memoization.
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache = enabled.then(|| RwLock::new(FxHashMap::default()));
        self
    }

    /// Append a child with the lowest priority so far.
    pub fn add(&mut self, child: Arc<dyn TypeSolver>) {
        self.children.push(child);
        self.clear_cache();
    }

    pub fn children(&self) -> &[Arc<dyn TypeSolver>] {
        &self.children
    }

    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.write().clear();
        }
    }

    fn solve_uncached(&self, qualified_name: &str) -> SymbolReference<TypeDecl> {
        let mut ambiguous = None;
        for child in &self.children {
            match child.try_solve_type(qualified_name) {
                solved @ SymbolReference::Solved(_) => return solved,
                found @ SymbolReference::Ambiguous(_) => {
                    ambiguous.get_or_insert(found);
                }
                SymbolReference::Unsolved => {}
            }
        }
        ambiguous.unwrap_or(SymbolReference::Unsolved)
    }
}

impl TypeSolver for CombinedTypeSolver {
    fn try_solve_type(&self, qualified_name: &str) -> SymbolReference<TypeDecl> {
        let Some(cache) = &self.cache else {
            return self.solve_uncached(qualified_name);
        };
        if let Some(hit) = cache.read().get(qualified_name) {
            tracing::trace!(name = qualified_name, "type cache hit");
            return hit.clone();
        }
        let result = self.solve_uncached(qualified_name);
        // Keep whichever answer landed first if another thread raced us.
        cache
            .write()
            .entry(qualified_name.to_string())
            .or_insert(result)
            .clone()
    }
}

impl std::fmt::Debug for CombinedTypeSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombinedTypeSolver")
            .field("children", &self.children.len())
            .field("cached", &self.cache.as_ref().map(|c| c.read().len()))
            .finish()
    }
}
