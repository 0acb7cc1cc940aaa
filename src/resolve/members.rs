//! Member lookup through the type hierarchy, and the declared types of
//! values and callables.
//!
//! Inherited members are found by walking [`TypeDecl::member_chain`]: the
//! type itself followed by every ancestor, each already expressed in terms
//! of the starting type's own type variables.

use rustc_hash::FxHashSet;

use super::convert::{convert_or_unsolved, variable_type};
use crate::base::constants::{INFERRED_LOCAL_TYPE, ITERABLE_TYPE, ROOT_TYPE};
use crate::error::{ResolveError, ResolveResult};
use crate::model::{
    ConstructorDecl, ConstructorUsage, Declaration, FieldDecl, LocalVariableDecl, MethodDecl,
    MethodUsage, ParameterDecl, ReferenceType, ResolvedType, TypeDecl, TypeParameterDecl, Wildcard,
};
use crate::parser::ast::Type;
use crate::resolve::expr::type_of_expr;
use crate::solver::TypeSolver;

impl TypeDecl {
    /// This type followed by all of its ancestors (lenient).
    pub fn member_chain(&self, solver: &dyn TypeSolver) -> ResolveResult<Vec<ReferenceType>> {
        let mut chain = vec![ReferenceType::declared(self.clone())?];
        chain.extend(self.all_ancestors(solver, true)?);
        Ok(chain)
    }

    /// Fields declared here or inherited, nearest first. A field hides
    /// inherited fields of the same name.
    pub fn all_fields(&self, solver: &dyn TypeSolver) -> ResolveResult<Vec<FieldDecl>> {
        let mut seen = FxHashSet::default();
        let mut fields = Vec::new();
        for link in self.member_chain(solver)? {
            for field in link.decl().declared_fields()? {
                if seen.insert(field.name().to_string()) {
                    fields.push(field);
                }
            }
        }
        Ok(fields)
    }

    /// The field `name` visible in this type, declared or inherited.
    pub fn find_field(&self, name: &str, solver: &dyn TypeSolver) -> ResolveResult<Option<FieldDecl>> {
        if let Some(field) = self.declared_field(name)? {
            return Ok(Some(field));
        }
        for ancestor in self.all_ancestors(solver, true)? {
            if let Some(field) = ancestor.decl().declared_field(name)? {
                return Ok(Some(field));
            }
        }
        Ok(None)
    }

    /// Methods declared here or inherited, as seen from this type.
    ///
    /// A method overrides inherited methods with the same erased
    /// signature, so each signature appears once, nearest declaration
    /// first.
    pub fn all_methods(&self, solver: &dyn TypeSolver) -> ResolveResult<Vec<MethodUsage>> {
        self.collect_methods(None, solver)
    }

    /// [`all_methods`](Self::all_methods) restricted to `name`.
    pub fn methods_named(&self, name: &str, solver: &dyn TypeSolver) -> ResolveResult<Vec<MethodUsage>> {
        self.collect_methods(Some(name), solver)
    }

    fn collect_methods(
        &self,
        name: Option<&str>,
        solver: &dyn TypeSolver,
    ) -> ResolveResult<Vec<MethodUsage>> {
        let mut signatures = FxHashSet::default();
        let mut methods = Vec::new();
        for link in self.member_chain(solver)? {
            let map = link.type_parameter_map()?;
            for method in link.decl().declared_methods()? {
                if name.is_some_and(|n| method.name() != n) {
                    continue;
                }
                let usage = method.to_usage(solver)?.substitute(&map);
                if signatures.insert(usage.signature()) {
                    methods.push(usage);
                }
            }
        }
        Ok(methods)
    }

    /// A member type inherited from an ancestor.
    pub fn find_member_type(&self, name: &str, solver: &dyn TypeSolver) -> ResolveResult<Option<TypeDecl>> {
        for ancestor in self.all_ancestors(solver, true)? {
            if let Some(member) = ancestor.decl().member_type(name)? {
                return Ok(Some(member));
            }
        }
        Ok(None)
    }

    /// Constructors with their parameter types resolved.
    pub fn constructor_usages(&self, solver: &dyn TypeSolver) -> ResolveResult<Vec<ConstructorUsage>> {
        self.constructors()?
            .into_iter()
            .map(|ctor| ctor.to_usage(solver))
            .collect()
    }
}

// ============================================================================
// RECEIVERS
// ============================================================================

/// Reference types whose members are visible on a value of type `receiver`,
/// nearest first, with the receiver's type arguments applied.
pub(crate) fn receiver_chain(
    receiver: &ResolvedType,
    solver: &dyn TypeSolver,
) -> ResolveResult<Vec<ReferenceType>> {
    match receiver {
        ResolvedType::Reference(reference) => {
            let map = reference.type_parameter_map()?;
            let mut chain = vec![reference.clone()];
            for ancestor in reference.decl().all_ancestors(solver, true)? {
                chain.push(ancestor.substitute(&map));
            }
            Ok(chain)
        }
        ResolvedType::TypeVariable(tp) => tp.as_type_decl().all_ancestors(solver, true),
        ResolvedType::Wildcard(Wildcard::Extends(bound)) => receiver_chain(bound, solver),
        ResolvedType::Wildcard(_) | ResolvedType::Array(_) => match solver.try_solve_type(ROOT_TYPE).into_solved() {
            Some(root) => Ok(vec![ReferenceType::raw(root)]),
            None => Ok(Vec::new()),
        },
        _ => Ok(Vec::new()),
    }
}

/// Methods named `name` callable on a value of type `receiver`.
pub(crate) fn receiver_methods(
    receiver: &ResolvedType,
    name: &str,
    solver: &dyn TypeSolver,
) -> ResolveResult<Vec<MethodUsage>> {
    let mut signatures = FxHashSet::default();
    let mut methods = Vec::new();
    for link in receiver_chain(receiver, solver)? {
        let map = link.type_parameter_map()?;
        for method in link.decl().declared_methods()? {
            if method.name() != name {
                continue;
            }
            let usage = method.to_usage(solver)?.substitute(&map);
            if signatures.insert(usage.signature()) {
                methods.push(usage);
            }
        }
    }
    Ok(methods)
}

/// The field `name` on a value of type `receiver` and its type as seen
/// through the receiver.
pub(crate) fn receiver_field(
    receiver: &ResolvedType,
    name: &str,
    solver: &dyn TypeSolver,
) -> ResolveResult<Option<(FieldDecl, ResolvedType)>> {
    for link in receiver_chain(receiver, solver)? {
        if let Some(field) = link.decl().declared_field(name)? {
            let ty = field.declared_type(solver)?.substitute(&link.type_parameter_map()?);
            return Ok(Some((field, ty)));
        }
    }
    Ok(None)
}

// ============================================================================
// DECLARED TYPES
// ============================================================================

impl FieldDecl {
    /// The field's type; an enum constant has its enum's type.
    pub fn declared_type(&self, solver: &dyn TypeSolver) -> ResolveResult<ResolvedType> {
        if self.is_enum_constant() {
            return Ok(ResolvedType::Reference(ReferenceType::raw(self.declaring_type().clone())));
        }
        variable_type(self.handle().unit(), self.type_node()?, self.extra_dims()?, false, solver)
    }
}

impl ParameterDecl {
    /// The parameter's type; a variadic parameter is an array.
    pub fn declared_type(&self, solver: &dyn TypeSolver) -> ResolveResult<ResolvedType> {
        variable_type(
            self.handle().unit(),
            self.type_node()?,
            self.extra_dims()?,
            self.is_varargs()?,
            solver,
        )
    }
}

impl LocalVariableDecl {
    /// The variable's type. `var` takes the type of the initializer, or
    /// the element type of the iterated expression in an enhanced `for`.
    pub fn declared_type(&self, solver: &dyn TypeSolver) -> ResolveResult<ResolvedType> {
        let unit = self.handle().unit();
        let ty = self.type_node()?;
        if !ty.as_ref().is_some_and(is_inferred) {
            return variable_type(unit, ty, self.extra_dims()?, false, solver);
        }
        if self.is_for_each() {
            let Some(iterable) = self.iterable()? else {
                return Ok(ResolvedType::Unsolved(INFERRED_LOCAL_TYPE.into()));
            };
            let iterable = type_of_expr(unit, &iterable, solver)?;
            return element_type_of(&iterable, solver);
        }
        match self.initializer()? {
            Some(init) => type_of_expr(unit, &init, solver),
            None => Ok(ResolvedType::Unsolved(INFERRED_LOCAL_TYPE.into())),
        }
    }
}

fn is_inferred(ty: &Type) -> bool {
    match ty {
        Type::Class(class) => {
            class.scope().is_none()
                && class.type_args().is_none()
                && class.name().as_deref() == Some(INFERRED_LOCAL_TYPE)
        }
        _ => false,
    }
}

/// Element type produced by iterating over a value of type `iterable`.
pub(crate) fn element_type_of(
    iterable: &ResolvedType,
    solver: &dyn TypeSolver,
) -> ResolveResult<ResolvedType> {
    if let Some(element) = iterable.element_type() {
        return Ok(element.clone());
    }
    for link in receiver_chain(iterable, solver)? {
        if link.qualified_name() == ITERABLE_TYPE {
            return Ok(match link.type_args().first() {
                Some(ResolvedType::Wildcard(Wildcard::Extends(bound))) => (**bound).clone(),
                Some(ResolvedType::Wildcard(_)) | None => root_or_unsolved(solver),
                Some(arg) => arg.clone(),
            });
        }
    }
    Ok(ResolvedType::Unsolved(iterable.describe().into()))
}

pub(crate) fn root_or_unsolved(solver: &dyn TypeSolver) -> ResolvedType {
    match solver.try_solve_type(ROOT_TYPE).into_solved() {
        Some(root) => ResolvedType::Reference(ReferenceType::raw(root)),
        None => ResolvedType::Unsolved(ROOT_TYPE.into()),
    }
}

impl TypeParameterDecl {
    /// Declared bounds, resolved. An unresolvable bound is
    /// [`ResolvedType::Unsolved`].
    pub fn bounds(&self, solver: &dyn TypeSolver) -> ResolveResult<Vec<ResolvedType>> {
        let unit = self.handle().unit();
        self.bound_nodes()?
            .iter()
            .map(|bound| convert_or_unsolved(unit, bound, solver))
            .collect()
    }
}

impl MethodDecl {
    pub fn return_type(&self, solver: &dyn TypeSolver) -> ResolveResult<ResolvedType> {
        variable_type(self.handle().unit(), self.return_type_node()?, 0, false, solver)
    }

    /// Parameter types in order, the last one an array when variadic.
    pub fn param_types(&self, solver: &dyn TypeSolver) -> ResolveResult<Vec<ResolvedType>> {
        self.params()?.iter().map(|p| p.declared_type(solver)).collect()
    }

    pub fn throws_types(&self, solver: &dyn TypeSolver) -> ResolveResult<Vec<ResolvedType>> {
        let unit = self.handle().unit();
        self.throws_nodes()?
            .iter()
            .map(|ty| convert_or_unsolved(unit, ty, solver))
            .collect()
    }

    /// The method as declared, with no receiver type arguments applied.
    pub fn to_usage(&self, solver: &dyn TypeSolver) -> ResolveResult<MethodUsage> {
        Ok(MethodUsage::new(
            self.clone(),
            self.param_types(solver)?,
            self.return_type(solver)?,
            self.is_varargs()?,
        ))
    }
}

impl ConstructorDecl {
    pub fn param_types(&self, solver: &dyn TypeSolver) -> ResolveResult<Vec<ResolvedType>> {
        self.params()?.iter().map(|p| p.declared_type(solver)).collect()
    }

    pub fn throws_types(&self, solver: &dyn TypeSolver) -> ResolveResult<Vec<ResolvedType>> {
        let Some(handle) = self.handle() else {
            return Ok(Vec::new());
        };
        self.throws_nodes()?
            .iter()
            .map(|ty| convert_or_unsolved(handle.unit(), ty, solver))
            .collect()
    }

    pub fn to_usage(&self, solver: &dyn TypeSolver) -> ResolveResult<ConstructorUsage> {
        Ok(ConstructorUsage::new(
            self.clone(),
            self.param_types(solver)?,
            self.is_varargs()?,
        ))
    }
}

impl Declaration {
    /// Type of a value declaration. Undefined for types and callables.
    pub fn declared_type(&self, solver: &dyn TypeSolver) -> ResolveResult<ResolvedType> {
        match self {
            Self::Field(field) => field.declared_type(solver),
            Self::Parameter(param) => param.declared_type(solver),
            Self::LocalVariable(local) => local.declared_type(solver),
            other => Err(ResolveError::malformed("declared_type", other.variant_name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{CombinedTypeSolver, SourceSetTypeSolver};
    use std::sync::Arc;

    fn solver(text: &str) -> CombinedTypeSolver {
        let mut sources = SourceSetTypeSolver::new();
        sources.add_source(text);
        CombinedTypeSolver::with_builtins([Arc::new(sources) as Arc<dyn TypeSolver>])
    }

    fn decl(solver: &dyn TypeSolver, name: &str) -> TypeDecl {
        solver.solve_type(name).unwrap()
    }

    #[test]
    fn test_inherited_fields_hidden() {
        let solver = solver("class A { int x; String y; } class B extends A { long x; }");
        let b = decl(&solver, "B");
        let fields: Vec<_> = b
            .all_fields(&solver)
            .unwrap()
            .iter()
            .map(|f| f.qualified_name())
            .collect();
        assert_eq!(fields, vec!["B.x", "A.y"]);
        let y = b.find_field("y", &solver).unwrap().unwrap();
        assert_eq!(y.declaring_type().name(), "A");
        assert!(b.find_field("z", &solver).unwrap().is_none());
    }

    #[test]
    fn test_override_hides_inherited_method() {
        let solver = solver(
            "class A { void m(int i) {} void n() {} } class B extends A { void m(int j) {} }",
        );
        let b = decl(&solver, "B");
        let named = b.methods_named("m", &solver).unwrap();
        assert_eq!(named.len(), 1);
        assert_eq!(named[0].declaring_type().name(), "B");
        let all: Vec<_> = b.all_methods(&solver).unwrap().iter().map(|m| m.signature()).collect();
        assert!(all.contains(&"n()".to_string()));
        assert!(all.contains(&"toString()".to_string()));
    }

    #[test]
    fn test_inherited_generic_method_substituted() {
        let solver = solver(
            "class Box<T> { T get() { return null; } } class IntBox extends Box<Integer> {}",
        );
        let int_box = decl(&solver, "IntBox");
        let get = int_box.methods_named("get", &solver).unwrap();
        assert_eq!(get[0].return_type().to_string(), "java.lang.Integer");
    }

    #[test]
    fn test_receiver_field_through_type_arguments() {
        let solver = solver("class Box<T> { T value; } class Holder { Box<String> box; }");
        let holder = decl(&solver, "Holder");
        let boxed = holder.declared_field("box").unwrap().unwrap().declared_type(&solver).unwrap();
        let (field, ty) = receiver_field(&boxed, "value", &solver).unwrap().unwrap();
        assert_eq!(field.qualified_name(), "Box.value");
        assert_eq!(ty.to_string(), "java.lang.String");
    }

    #[test]
    fn test_declared_types() {
        let solver = solver(
            "enum Color { RED } class A { int[] a, b[]; <T> T pick(T first, String... rest) throws java.io.IOException { return first; } }",
        );
        let color = decl(&solver, "Color");
        let red = color.declared_field("RED").unwrap().unwrap();
        assert_eq!(red.declared_type(&solver).unwrap().to_string(), "Color");

        let a = decl(&solver, "A");
        let b = a.declared_field("b").unwrap().unwrap();
        assert_eq!(b.declared_type(&solver).unwrap().to_string(), "int[][]");

        let pick = &a.declared_methods().unwrap()[0];
        let params: Vec<_> = pick
            .param_types(&solver)
            .unwrap()
            .iter()
            .map(|t| t.to_string())
            .collect();
        assert_eq!(params, vec!["T", "java.lang.String[]"]);
        assert!(pick.return_type(&solver).unwrap().is_type_variable());
        assert_eq!(
            pick.throws_types(&solver).unwrap()[0].to_string(),
            "java.io.IOException"
        );
    }

    #[test]
    fn test_declared_type_undefined_for_types() {
        let solver = solver("class A {}");
        let a = Declaration::Type(decl(&solver, "A"));
        assert_eq!(
            a.declared_type(&solver),
            Err(ResolveError::malformed("declared_type", "type"))
        );
    }

    #[test]
    fn test_inherited_member_type() {
        let solver = solver("class A { static class Node {} } class B extends A {}");
        let b = decl(&solver, "B");
        assert!(b.member_type("Node").unwrap().is_none());
        assert_eq!(
            b.find_member_type("Node", &solver).unwrap().unwrap().qualified_name(),
            "A.Node"
        );
    }

    #[test]
    fn test_element_type_of_iterable() {
        let solver = solver("import java.util.List; class A { List<String> names; }");
        let a = decl(&solver, "A");
        let names = a.declared_field("names").unwrap().unwrap().declared_type(&solver).unwrap();
        assert_eq!(element_type_of(&names, &solver).unwrap().to_string(), "java.lang.String");
    }
}
