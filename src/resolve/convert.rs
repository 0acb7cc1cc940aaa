//! Turning type syntax into [`ResolvedType`]s.

use std::sync::Arc;

use crate::error::{ResolveError, ResolveResult};
use crate::model::{PrimitiveType, ReferenceType, ResolvedType, SymbolReference, TypeDecl, Wildcard};
use crate::parser::AstNode;
use crate::parser::ast::{self, ClassType, Type};
use crate::resolve::context::context_for;
use crate::solver::TypeSolver;
use crate::syntax::SourceUnit;

/// Resolve a type as written in `unit`, looking names up in the scope the
/// type appears in.
///
/// A name that cannot be found is an [`ResolveError::UnsolvedSymbol`].
pub fn convert_type(
    unit: &Arc<SourceUnit>,
    ty: &Type,
    solver: &dyn TypeSolver,
) -> ResolveResult<ResolvedType> {
    match ty {
        Type::Primitive(prim) => prim
            .keyword()
            .and_then(PrimitiveType::from_keyword)
            .map(ResolvedType::Primitive)
            .ok_or_else(|| ResolveError::unexpected_node("primitive keyword", prim.syntax().kind())),
        Type::Void(_) => Ok(ResolvedType::Void),
        Type::Array(array) => {
            let component = array
                .component()
                .ok_or_else(|| ResolveError::unexpected_node("array component", array.syntax().kind()))?;
            Ok(ResolvedType::array_of(convert_type(unit, &component, solver)?))
        }
        Type::Wildcard(wildcard) => {
            let Some(bound) = wildcard.bound() else {
                return Ok(ResolvedType::Wildcard(Wildcard::Unbounded));
            };
            let bound = Box::new(convert_type(unit, &bound, solver)?);
            if wildcard.is_super() {
                Ok(ResolvedType::Wildcard(Wildcard::Super(bound)))
            } else {
                Ok(ResolvedType::Wildcard(Wildcard::Extends(bound)))
            }
        }
        Type::Class(class) => convert_class_type(unit, class, solver),
    }
}

/// Like [`convert_type`], but an unknown name becomes
/// [`ResolvedType::Unsolved`] instead of an error.
pub fn convert_or_unsolved(
    unit: &Arc<SourceUnit>,
    ty: &Type,
    solver: &dyn TypeSolver,
) -> ResolveResult<ResolvedType> {
    match convert_type(unit, ty, solver) {
        Err(ResolveError::UnsolvedSymbol { name }) => Ok(ResolvedType::Unsolved(name.into())),
        other => other,
    }
}

fn convert_class_type(
    unit: &Arc<SourceUnit>,
    class: &ClassType,
    solver: &dyn TypeSolver,
) -> ResolveResult<ResolvedType> {
    let Some(decl) = class_type_decl(unit, class, solver)? else {
        return Err(ResolveError::unsolved(class.segments().join(".")));
    };
    if let Some(tp) = decl.as_type_parameter() {
        return Ok(ResolvedType::TypeVariable(tp));
    }
    let type_args = match class.type_args() {
        Some(args) => args
            .types()
            .iter()
            .map(|arg| convert_type(unit, arg, solver))
            .collect::<ResolveResult<Vec<_>>>()?,
        None => Vec::new(),
    };
    Ok(ResolvedType::Reference(ReferenceType::new(decl, type_args)?))
}

/// The declaration a class type names, or `None` when nothing matches.
///
/// The first segment is looked up in scope; when it is not a type the
/// leading segments are taken as a package.
pub(crate) fn class_type_decl(
    unit: &Arc<SourceUnit>,
    class: &ClassType,
    solver: &dyn TypeSolver,
) -> ResolveResult<Option<TypeDecl>> {
    let Some(name) = class.name() else {
        return Ok(None);
    };
    let Some(scope) = class.scope() else {
        let context = context_for(unit, class.syntax(), solver);
        return Ok(context.resolve_type(&name)?.into_solved());
    };
    if let Some(outer) = class_type_decl(unit, &scope, solver)? {
        if let Some(member) = outer.member_type(&name)? {
            return Ok(Some(member));
        }
        return outer.find_member_type(&name, solver);
    }
    let qualified = class.segments().join(".");
    Ok(match solver.try_solve_type(&qualified) {
        SymbolReference::Solved(decl) => Some(decl),
        _ => None,
    })
}

/// Declared type of a variable: the written type plus any `[]` after the
/// name, as an array for a variadic parameter.
pub(crate) fn variable_type(
    unit: &Arc<SourceUnit>,
    ty: Option<ast::Type>,
    extra_dims: usize,
    varargs: bool,
    solver: &dyn TypeSolver,
) -> ResolveResult<ResolvedType> {
    let Some(ty) = ty else {
        return Ok(ResolvedType::Unsolved("?".into()));
    };
    let base = convert_or_unsolved(unit, &ty, solver)?.with_dims(extra_dims);
    Ok(if varargs { ResolvedType::array_of(base) } else { base })
}
