//! Symbol sources: where type declarations are looked up by qualified name.
//!
//! Every backend implements [`TypeSolver`]. A [`CombinedTypeSolver`] chains
//! backends in priority order and memoizes the answers.
//!
//! ```text
//! CombinedTypeSolver
//!   ├── SourceSetTypeSolver   (units parsed in memory)
//!   ├── DirectoryTypeSolver   (a/b/C.java under a source root)
//!   ├── MemoryTypeSolver      (explicitly registered declarations)
//!   └── BuiltinTypeSolver     (bundled java.lang / java.util / java.io stubs)
//! ```

mod builtin;
mod combined;
mod directory;
mod memory;
mod source_set;

pub use builtin::BuiltinTypeSolver;
pub use combined::CombinedTypeSolver;
pub use directory::DirectoryTypeSolver;
pub use memory::MemoryTypeSolver;
pub use source_set::SourceSetTypeSolver;

use std::sync::Arc;

use indexmap::IndexMap;

use crate::base::constants::ROOT_TYPE;
use crate::error::{ResolveError, ResolveResult};
use crate::model::{SymbolReference, TypeDecl};
use crate::parser::AstNode;
use crate::syntax::{NodeHandle, SourceUnit, nested_types};

/// A place type declarations can be looked up by qualified name.
///
/// "Not found" is [`SymbolReference::Unsolved`], never an error.
pub trait TypeSolver: Send + Sync {
    /// Look up a type by its qualified name (`java.util.Map.Entry`).
    fn try_solve_type(&self, qualified_name: &str) -> SymbolReference<TypeDecl>;

    /// Like [`try_solve_type`](Self::try_solve_type), failing when the type
    /// is not uniquely found.
    fn solve_type(&self, qualified_name: &str) -> ResolveResult<TypeDecl> {
        self.try_solve_type(qualified_name)
            .into_solved()
            .ok_or_else(|| ResolveError::unsolved(qualified_name))
    }

    fn has_type(&self, qualified_name: &str) -> bool {
        self.try_solve_type(qualified_name).is_solved()
    }

    /// The canonical root type every reference type ultimately extends.
    fn root_type(&self) -> ResolveResult<TypeDecl> {
        self.try_solve_type(ROOT_TYPE)
            .into_solved()
            .ok_or_else(|| ResolveError::MissingRootType(ROOT_TYPE.to_string()))
    }
}

impl<T: TypeSolver + ?Sized> TypeSolver for Arc<T> {
    fn try_solve_type(&self, qualified_name: &str) -> SymbolReference<TypeDecl> {
        (**self).try_solve_type(qualified_name)
    }
}

/// Add every type declared in `unit`, nested ones included, to `index`
/// under its qualified name. Earlier entries win.
pub(crate) fn index_unit(unit: &Arc<SourceUnit>, index: &mut IndexMap<String, NodeHandle>) {
    let Some(file) = unit.source_file() else {
        return;
    };
    let package = unit.package_name().unwrap_or_default();
    for decl in file.type_decls() {
        let mut found = Vec::new();
        nested_types(decl, package.clone(), &mut found);
        for (name, decl) in found {
            index
                .entry(name)
                .or_insert_with(|| unit.handle(decl.syntax()));
        }
    }
}

/// Turn an indexed handle into a declaration, treating failures as unsolved.
pub(crate) fn decl_from_index(
    qualified_name: &str,
    handle: Option<&NodeHandle>,
) -> SymbolReference<TypeDecl> {
    let Some(handle) = handle else {
        return SymbolReference::Unsolved;
    };
    match TypeDecl::from_handle(handle.clone()) {
        Ok(decl) => SymbolReference::Solved(decl),
        Err(err) => {
            tracing::debug!(name = qualified_name, error = %err, "indexed type is unusable");
            SymbolReference::Unsolved
        }
    }
}
