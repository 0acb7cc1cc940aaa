//! Assignment compatibility between resolved types.
//!
//! Overload resolution checks applicability in two strengths: strict
//! (identity, widening, subtyping) and loose (strict plus boxing and
//! unboxing).

use crate::base::constants::ROOT_TYPE;
use crate::error::ResolveResult;
use crate::model::{PrimitiveType, ReferenceType, ResolvedType, Wildcard};
use crate::solver::TypeSolver;

use super::members::receiver_chain;

/// Types every array is assignable to besides the root type.
const ARRAY_SUPERTYPES: &[&str] = &["java.lang.Cloneable", "java.io.Serializable"];

impl ResolvedType {
    /// Whether a value of type `other` can be assigned to a variable of
    /// this type, boxing and unboxing allowed.
    ///
    /// Unsolved types are assignable both ways so that one unknown name
    /// does not make every candidate inapplicable.
    pub fn is_assignable_by(&self, other: &ResolvedType, solver: &dyn TypeSolver) -> ResolveResult<bool> {
        is_assignable(self, other, solver, true)
    }
}

pub(crate) fn is_assignable(
    target: &ResolvedType,
    source: &ResolvedType,
    solver: &dyn TypeSolver,
    allow_boxing: bool,
) -> ResolveResult<bool> {
    if target.is_unsolved() || source.is_unsolved() || target == source {
        return Ok(true);
    }
    match (target, source) {
        (ResolvedType::Void, _) | (_, ResolvedType::Void) => Ok(false),
        (ResolvedType::Primitive(_), ResolvedType::Null) => Ok(false),
        (_, ResolvedType::Null) => Ok(true),
        (ResolvedType::Primitive(to), ResolvedType::Primitive(from)) => Ok(from.widens_to(*to)),
        (ResolvedType::Primitive(to), _) => {
            Ok(allow_boxing && source.unboxed().is_some_and(|from| from.widens_to(*to)))
        }
        (_, ResolvedType::Primitive(from)) => {
            if !allow_boxing {
                return Ok(false);
            }
            match boxed(*from, solver) {
                Some(boxed) => is_assignable(target, &boxed, solver, false),
                None => Ok(false),
            }
        }
        (ResolvedType::Wildcard(wildcard), _) => contains(wildcard, source, solver),
        (ResolvedType::TypeVariable(tp), _) => {
            // A variable left free after inference accepts whatever
            // satisfies its bounds.
            for bound in tp.bounds(solver)? {
                if !is_assignable(&bound, source, solver, allow_boxing)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        (ResolvedType::Array(to), ResolvedType::Array(from)) => {
            if to.is_primitive() || from.is_primitive() {
                return Ok(to == from);
            }
            is_assignable(to, from, solver, false)
        }
        (ResolvedType::Reference(to), ResolvedType::Array(_)) => {
            Ok(to.qualified_name() == ROOT_TYPE || ARRAY_SUPERTYPES.contains(&to.qualified_name()))
        }
        (ResolvedType::Reference(to), _) => reference_accepts(to, source, solver),
        _ => Ok(false),
    }
}

/// Subtyping into a reference type: find the target's declaration among
/// the source's supertypes and compare type arguments.
fn reference_accepts(
    target: &ReferenceType,
    source: &ResolvedType,
    solver: &dyn TypeSolver,
) -> ResolveResult<bool> {
    if target.qualified_name() == ROOT_TYPE && !source.is_primitive() {
        return Ok(true);
    }
    let chain = match source {
        ResolvedType::Reference(_) | ResolvedType::TypeVariable(_) => receiver_chain(source, solver)?,
        ResolvedType::Wildcard(Wildcard::Extends(bound)) => return reference_accepts(target, bound, solver),
        _ => return Ok(false),
    };
    let Some(found) = chain.iter().find(|link| link.decl() == target.decl()) else {
        return Ok(false);
    };
    if target.is_raw() || found.is_raw() {
        return Ok(true);
    }
    for (want, have) in target.type_args().iter().zip(found.type_args()) {
        if !type_argument_contains(want, have, solver)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Containment of a type argument: invariant for concrete arguments,
/// bounded for wildcards.
fn type_argument_contains(
    want: &ResolvedType,
    have: &ResolvedType,
    solver: &dyn TypeSolver,
) -> ResolveResult<bool> {
    match want {
        ResolvedType::Wildcard(wildcard) => contains(wildcard, have, solver),
        _ => Ok(want == have || want.is_unsolved() || have.is_unsolved()),
    }
}

fn contains(wildcard: &Wildcard, ty: &ResolvedType, solver: &dyn TypeSolver) -> ResolveResult<bool> {
    match (wildcard, ty) {
        (Wildcard::Unbounded, _) => Ok(true),
        (Wildcard::Extends(bound), ResolvedType::Wildcard(Wildcard::Extends(inner))) => {
            is_assignable(bound, inner, solver, false)
        }
        (Wildcard::Extends(bound), ResolvedType::Wildcard(_)) => {
            Ok(bound.as_reference().is_some_and(|r| r.qualified_name() == ROOT_TYPE))
        }
        (Wildcard::Extends(bound), _) => is_assignable(bound, ty, solver, false),
        (Wildcard::Super(bound), ResolvedType::Wildcard(Wildcard::Super(inner))) => {
            is_assignable(inner, bound, solver, false)
        }
        (Wildcard::Super(_), ResolvedType::Wildcard(_)) => Ok(false),
        (Wildcard::Super(bound), _) => is_assignable(ty, bound, solver, false),
    }
}

/// The wrapper class of a primitive, if the symbol sources know it.
pub(crate) fn boxed(primitive: PrimitiveType, solver: &dyn TypeSolver) -> Option<ResolvedType> {
    solver
        .try_solve_type(primitive.boxed_name())
        .into_solved()
        .map(|decl| ResolvedType::Reference(ReferenceType::raw(decl)))
}
