//! Direct and transitive supertypes.
//!
//! Supertypes are resolved in the scope of the declaring header, so a
//! generic supertype keeps the declaring type's variables
//! (`class A<T> implements Comparable<T>`). Walking up from a concrete
//! reference type substitutes its arguments at every step.

use std::cell::RefCell;
use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use super::convert::convert_type;
use crate::base::constants::{ENUM_BASE_TYPE, ROOT_TYPE};
use crate::error::{ResolveError, ResolveResult};
use crate::model::{ReferenceType, ResolvedType, TypeDecl};
use crate::parser::AstNode;
use crate::parser::ast::{NewExpr, Type};
use crate::solver::TypeSolver;

thread_local! {
    /// Declarations whose ancestors are being computed on this thread.
    static IN_PROGRESS: RefCell<FxHashSet<TypeDecl>> = RefCell::new(FxHashSet::default());
}

/// Marks a declaration as in progress until dropped.
struct InProgress(TypeDecl);

impl InProgress {
    fn enter(decl: &TypeDecl) -> Option<Self> {
        IN_PROGRESS
            .with(|set| set.borrow_mut().insert(decl.clone()))
            .then(|| Self(decl.clone()))
    }
}

impl Drop for InProgress {
    fn drop(&mut self) {
        IN_PROGRESS.with(|set| {
            set.borrow_mut().remove(&self.0);
        });
    }
}

impl TypeDecl {
    /// Direct supertypes, in declaration order.
    ///
    /// - a class lists its superclass (the root type when none is written,
    ///   nothing for the root type itself), then its interfaces;
    /// - an enum extends `java.lang.Enum<Self>`;
    /// - an interface lists its superinterfaces, or the root type;
    /// - a type variable lists its bounds, or the root type;
    /// - an anonymous class lists the type it instantiates, after the root
    ///   type when that is an interface.
    ///
    /// With `accept_incomplete`, supertypes that cannot be resolved are
    /// dropped; otherwise the first one fails the call with
    /// [`ResolveError::IncompleteAncestryAborted`]. A declaration reached
    /// again while its own ancestors are being computed counts as
    /// unresolvable.
    pub fn ancestors(
        &self,
        solver: &dyn TypeSolver,
        accept_incomplete: bool,
    ) -> ResolveResult<Vec<ReferenceType>> {
        let Some(_guard) = InProgress::enter(self) else {
            if !accept_incomplete {
                return Err(self.incomplete(self.qualified_name()));
            }
            tracing::debug!(name = self.qualified_name(), "cyclic inheritance");
            return Ok(Vec::new());
        };

        let mut ancestors = Vec::new();
        let (declared, implicit) = self.declared_supertypes()?;
        for ty in &declared {
            self.push_converted(ty, solver, accept_incomplete, &mut ancestors)?;
        }

        match implicit {
            Implicit::None => {}
            Implicit::Root => {
                let mut root = Vec::new();
                self.push_root(solver, accept_incomplete, &mut root)?;
                ancestors.splice(0..0, root);
            }
            Implicit::Anonymous => {
                if ancestors.first().is_none_or(|a| a.decl().is_interface()) {
                    let mut root = Vec::new();
                    self.push_root(solver, accept_incomplete, &mut root)?;
                    ancestors.splice(0..0, root);
                }
            }
            Implicit::Enum => match solver.try_solve_type(ENUM_BASE_TYPE).into_solved() {
                Some(base) => {
                    let this = ResolvedType::Reference(ReferenceType::declared(self.clone())?);
                    let args = if base.type_parameters()?.len() == 1 { vec![this] } else { Vec::new() };
                    ancestors.insert(0, ReferenceType::new(base, args)?);
                }
                None if accept_incomplete => {
                    tracing::debug!(name = self.qualified_name(), "enum base type unavailable");
                }
                None => return Err(self.incomplete(ENUM_BASE_TYPE)),
            },
        }
        Ok(ancestors)
    }

    /// Every supertype reachable through [`ancestors`](Self::ancestors),
    /// breadth first, each listed once.
    pub fn all_ancestors(
        &self,
        solver: &dyn TypeSolver,
        accept_incomplete: bool,
    ) -> ResolveResult<Vec<ReferenceType>> {
        if self.is_type_variable() {
            let mut all = Vec::new();
            let mut seen = FxHashSet::default();
            for bound in self.ancestors(solver, accept_incomplete)? {
                if seen.insert(bound.decl().clone()) {
                    all.push(bound.clone());
                }
                for ancestor in bound.all_ancestors(solver, accept_incomplete)? {
                    if seen.insert(ancestor.decl().clone()) {
                        all.push(ancestor);
                    }
                }
            }
            return Ok(all);
        }
        ReferenceType::declared(self.clone())?.all_ancestors(solver, accept_incomplete)
    }

    /// Whether `other` is this type or one of its supertypes.
    pub fn is_subtype_of(&self, other: &TypeDecl, solver: &dyn TypeSolver) -> ResolveResult<bool> {
        if self == other || (other.qualified_name() == ROOT_TYPE && !self.is_type_variable()) {
            return Ok(true);
        }
        Ok(self
            .all_ancestors(solver, true)?
            .iter()
            .any(|a| a.decl() == other))
    }

    fn declared_supertypes(&self) -> ResolveResult<(Vec<Type>, Implicit)> {
        if let Some(tp) = self.as_type_parameter() {
            let bounds = tp.bound_nodes()?;
            let implicit = if bounds.is_empty() { Implicit::Root } else { Implicit::None };
            return Ok((bounds, implicit));
        }
        if self.is_anonymous() {
            let node = self.handle().node()?;
            let instantiated = NewExpr::cast(node).and_then(|new| new.class_type()).map(Type::Class);
            return Ok((instantiated.into_iter().collect(), Implicit::Anonymous));
        }
        let ast = self.ast("ancestors")?;
        let extends = ast.extends_types();
        let implicit = if self.is_enum() {
            Implicit::Enum
        } else if self.qualified_name() == ROOT_TYPE || !extends.is_empty() {
            Implicit::None
        } else {
            Implicit::Root
        };
        let mut declared = extends;
        declared.extend(ast.implements_types());
        Ok((declared, implicit))
    }

    fn push_converted(
        &self,
        ty: &Type,
        solver: &dyn TypeSolver,
        accept_incomplete: bool,
        out: &mut Vec<ReferenceType>,
    ) -> ResolveResult<()> {
        match convert_type(self.handle().unit(), ty, solver) {
            Ok(ResolvedType::Reference(reference)) => out.push(reference),
            Ok(ResolvedType::TypeVariable(tp)) => {
                // `<T, U extends T>`: U inherits T's bounds.
                out.extend(tp.as_type_decl().ancestors(solver, accept_incomplete)?);
            }
            Ok(other) => {
                tracing::debug!(name = self.qualified_name(), supertype = %other, "ignoring non-reference supertype");
            }
            Err(ResolveError::UnsolvedSymbol { name }) if accept_incomplete => {
                tracing::debug!(name = self.qualified_name(), missing = %name, "dropping unresolved supertype");
            }
            Err(ResolveError::UnsolvedSymbol { name }) => return Err(self.incomplete(&name)),
            Err(err) => return Err(err),
        }
        Ok(())
    }

    fn push_root(
        &self,
        solver: &dyn TypeSolver,
        accept_incomplete: bool,
        out: &mut Vec<ReferenceType>,
    ) -> ResolveResult<()> {
        match solver.root_type() {
            Ok(root) => out.push(ReferenceType::raw(root)),
            Err(err) if accept_incomplete => {
                tracing::debug!(name = self.qualified_name(), error = %err, "root type unavailable");
            }
            Err(err) => return Err(err),
        }
        Ok(())
    }

    fn incomplete(&self, missing: &str) -> ResolveError {
        ResolveError::IncompleteAncestryAborted {
            type_name: self.qualified_name().to_string(),
            missing: missing.to_string(),
        }
    }
}

/// Supertype added in front of the written ones.
enum Implicit {
    None,
    Root,
    Enum,
    /// The root type, unless the instantiated type is a class.
    Anonymous,
}

impl ReferenceType {
    /// Direct supertypes with this type's arguments substituted.
    pub fn ancestors(
        &self,
        solver: &dyn TypeSolver,
        accept_incomplete: bool,
    ) -> ResolveResult<Vec<ReferenceType>> {
        let map = self.type_parameter_map()?;
        Ok(self
            .decl()
            .ancestors(solver, accept_incomplete)?
            .iter()
            .map(|a| a.substitute(&map))
            .collect())
    }

    /// Every supertype, breadth first, each declaration listed once.
    pub fn all_ancestors(
        &self,
        solver: &dyn TypeSolver,
        accept_incomplete: bool,
    ) -> ResolveResult<Vec<ReferenceType>> {
        let mut seen = FxHashSet::default();
        seen.insert(self.decl().clone());
        let mut queue: VecDeque<ReferenceType> = self.ancestors(solver, accept_incomplete)?.into();
        let mut all = Vec::new();
        while let Some(next) = queue.pop_front() {
            if !seen.insert(next.decl().clone()) {
                continue;
            }
            queue.extend(next.ancestors(solver, accept_incomplete)?);
            all.push(next);
        }
        Ok(all)
    }
}
