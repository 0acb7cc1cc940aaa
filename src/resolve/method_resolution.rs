//! Overload resolution for methods and constructors.
//!
//! Candidates are tried in three phases, stopping at the first phase that
//! finds an applicable candidate:
//!
//! 1. strict: same arity, widening and subtyping only
//! 2. loose: same arity, boxing and unboxing allowed
//! 3. variable arity: trailing arguments matched against the element type
//!    of a variadic parameter
//!
//! Among the applicable candidates the most specific one wins. Several
//! maximally specific candidates are reported as
//! [`SymbolReference::Ambiguous`].

use crate::error::ResolveResult;
use crate::model::{
    ConstructorUsage, MethodUsage, ReferenceType, ResolvedType, SymbolReference, TypeParameterDecl,
    TypeParameterMap, Wildcard,
};
use crate::solver::TypeSolver;

use super::assignability::{boxed, is_assignable};
use super::members::{receiver_chain, root_or_unsolved};

/// Something that can be called with arguments.
pub(crate) trait Invocable: Clone {
    fn param_types(&self) -> &[ResolvedType];
    fn is_varargs(&self) -> bool;
    /// Type parameters declared on the callable itself.
    fn type_parameters(&self) -> ResolveResult<Vec<TypeParameterDecl>>;
    fn substitute(&self, map: &TypeParameterMap) -> Self;
}

impl Invocable for MethodUsage {
    fn param_types(&self) -> &[ResolvedType] {
        MethodUsage::param_types(self)
    }

    fn is_varargs(&self) -> bool {
        MethodUsage::is_varargs(self)
    }

    fn type_parameters(&self) -> ResolveResult<Vec<TypeParameterDecl>> {
        self.decl().type_parameters()
    }

    fn substitute(&self, map: &TypeParameterMap) -> Self {
        MethodUsage::substitute(self, map)
    }
}

impl Invocable for ConstructorUsage {
    fn param_types(&self) -> &[ResolvedType] {
        ConstructorUsage::param_types(self)
    }

    fn is_varargs(&self) -> bool {
        ConstructorUsage::is_varargs(self)
    }

    fn type_parameters(&self) -> ResolveResult<Vec<TypeParameterDecl>> {
        self.decl().type_parameters()
    }

    fn substitute(&self, map: &TypeParameterMap) -> Self {
        ConstructorUsage::substitute(self, map)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Strict,
    Loose,
    VariableArity,
}

impl Phase {
    fn allows_boxing(self) -> bool {
        self != Phase::Strict
    }
}

/// Pick the candidate a call with `args` selects.
///
/// The returned candidate has its inferred type arguments substituted.
pub(crate) fn resolve_overload<T: Invocable>(
    candidates: Vec<T>,
    args: &[ResolvedType],
    solver: &dyn TypeSolver,
) -> ResolveResult<SymbolReference<T>> {
    for phase in [Phase::Strict, Phase::Loose, Phase::VariableArity] {
        let mut applicable = Vec::new();
        for candidate in &candidates {
            if let Some(instance) = instantiate(candidate, args, phase, solver)? {
                applicable.push(instance);
            }
        }
        if !applicable.is_empty() {
            return most_specific(applicable, args.len(), phase, solver);
        }
    }
    Ok(SymbolReference::Unsolved)
}

/// Parameter types a call with `arity` arguments matches against.
fn expanded_params<T: Invocable>(candidate: &T, arity: usize, phase: Phase) -> Option<Vec<ResolvedType>> {
    let params = candidate.param_types();
    if phase != Phase::VariableArity {
        return (params.len() == arity).then(|| params.to_vec());
    }
    if !candidate.is_varargs() || arity + 1 < params.len() {
        return None;
    }
    let (last, fixed) = params.split_last()?;
    let element = last.element_type()?.clone();
    let mut expanded = fixed.to_vec();
    expanded.resize(arity, element);
    Some(expanded)
}

/// The candidate with its type parameters inferred from `args`, if it is
/// applicable in `phase`.
fn instantiate<T: Invocable>(
    candidate: &T,
    args: &[ResolvedType],
    phase: Phase,
    solver: &dyn TypeSolver,
) -> ResolveResult<Option<T>> {
    let Some(params) = expanded_params(candidate, args.len(), phase) else {
        return Ok(None);
    };
    let type_params = candidate.type_parameters()?;
    let mut map = TypeParameterMap::new();
    if !type_params.is_empty() {
        for (param, arg) in params.iter().zip(args) {
            infer(param, arg, &type_params, &mut map, solver)?;
        }
        for tp in &type_params {
            if !map.contains(tp) {
                let fallback = tp.bounds(solver)?.into_iter().next().unwrap_or_else(|| root_or_unsolved(solver));
                map.insert(tp.clone(), fallback);
            }
        }
    }
    let instance = candidate.substitute(&map);
    let params = expanded_params(&instance, args.len(), phase).unwrap_or_default();
    for (param, arg) in params.iter().zip(args) {
        if !is_assignable(param, arg, solver, phase.allows_boxing())? {
            return Ok(None);
        }
    }
    Ok(Some(instance))
}

/// Bind type parameters appearing in `formal` by matching it against the
/// argument type `actual`. The first binding of a parameter wins.
fn infer(
    formal: &ResolvedType,
    actual: &ResolvedType,
    type_params: &[TypeParameterDecl],
    map: &mut TypeParameterMap,
    solver: &dyn TypeSolver,
) -> ResolveResult<()> {
    match (formal, actual) {
        (_, ResolvedType::Null | ResolvedType::Unsolved(_)) => {}
        (ResolvedType::TypeVariable(tp), _) if type_params.contains(tp) => {
            if !map.contains(tp) {
                let bound = match actual {
                    ResolvedType::Primitive(p) => boxed(*p, solver).unwrap_or_else(|| actual.clone()),
                    _ => actual.clone(),
                };
                map.insert(tp.clone(), bound);
            }
        }
        (ResolvedType::Array(formal), ResolvedType::Array(actual)) => {
            infer(formal, actual, type_params, map, solver)?;
        }
        (ResolvedType::Wildcard(Wildcard::Extends(bound) | Wildcard::Super(bound)), _) => {
            let actual = match actual {
                ResolvedType::Wildcard(Wildcard::Extends(inner) | Wildcard::Super(inner)) => inner,
                other => other,
            };
            infer(bound, actual, type_params, map, solver)?;
        }
        (ResolvedType::Reference(formal), _) if !formal.is_raw() => {
            if let Some(found) = supertype_named(actual, formal, solver)? {
                for (f, a) in formal.type_args().iter().zip(found.type_args()) {
                    infer(f, a, type_params, map, solver)?;
                }
            }
        }
        _ => {}
    }
    Ok(())
}

/// `actual` viewed as the generic type `formal` is declared as.
fn supertype_named(
    actual: &ResolvedType,
    formal: &ReferenceType,
    solver: &dyn TypeSolver,
) -> ResolveResult<Option<ReferenceType>> {
    let actual = match actual {
        ResolvedType::Primitive(p) => match boxed(*p, solver) {
            Some(boxed) => boxed,
            None => return Ok(None),
        },
        other => other.clone(),
    };
    Ok(receiver_chain(&actual, solver)?
        .into_iter()
        .find(|link| link.decl() == formal.decl()))
}

fn most_specific<T: Invocable>(
    applicable: Vec<T>,
    arity: usize,
    phase: Phase,
    solver: &dyn TypeSolver,
) -> ResolveResult<SymbolReference<T>> {
    if applicable.len() == 1 {
        return Ok(SymbolReference::from_candidates(applicable));
    }
    let params: Vec<Vec<ResolvedType>> = applicable
        .iter()
        .map(|c| expanded_params(c, arity, phase).unwrap_or_default())
        .collect();

    let mut maximal = Vec::new();
    for (i, candidate) in applicable.iter().enumerate() {
        let mut dominated = false;
        for j in 0..applicable.len() {
            if i == j {
                continue;
            }
            if more_specific(&params[j], &params[i], solver)?
                && !more_specific(&params[i], &params[j], solver)?
            {
                dominated = true;
                break;
            }
        }
        if !dominated {
            maximal.push(candidate.clone());
        }
    }
    if maximal.len() > 1 {
        tracing::debug!(candidates = maximal.len(), "ambiguous overload");
    }
    Ok(SymbolReference::from_candidates(maximal))
}

/// Every parameter of `a` can be passed where `b` expects one.
fn more_specific(a: &[ResolvedType], b: &[ResolvedType], solver: &dyn TypeSolver) -> ResolveResult<bool> {
    for (pa, pb) in a.iter().zip(b) {
        if !is_assignable(pb, pa, solver, false)? {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PrimitiveType, TypeDecl};
    use crate::solver::{CombinedTypeSolver, SourceSetTypeSolver};
    use std::sync::Arc;

    fn setup(text: &str) -> (CombinedTypeSolver, TypeDecl) {
        let mut sources = SourceSetTypeSolver::new();
        sources.add_source(text);
        let solver = CombinedTypeSolver::with_builtins([Arc::new(sources) as Arc<dyn TypeSolver>]);
        let decl = solver.solve_type("A").unwrap();
        (solver, decl)
    }

    fn reference(solver: &dyn TypeSolver, name: &str) -> ResolvedType {
        ResolvedType::Reference(ReferenceType::raw(solver.solve_type(name).unwrap()))
    }

    fn resolve(
        solver: &dyn TypeSolver,
        decl: &TypeDecl,
        name: &str,
        args: &[ResolvedType],
    ) -> SymbolReference<MethodUsage> {
        let candidates = decl.methods_named(name, solver).unwrap();
        resolve_overload(candidates, args, solver).unwrap()
    }

    const INT: ResolvedType = ResolvedType::Primitive(PrimitiveType::Int);
    const LONG: ResolvedType = ResolvedType::Primitive(PrimitiveType::Long);

    #[test]
    fn test_exact_beats_widening() {
        let (solver, a) = setup("class A { void m(int x) {} void m(long x) {} void m(double x) {} }");
        let chosen = resolve(&solver, &a, "m", &[INT]).into_solved().unwrap();
        assert_eq!(chosen.signature(), "m(int)");
        let chosen = resolve(&solver, &a, "m", &[LONG]).into_solved().unwrap();
        assert_eq!(chosen.signature(), "m(long)");
    }

    #[test]
    fn test_strict_phase_before_boxing() {
        let (solver, a) = setup("class A { void m(long x) {} void m(Integer x) {} }");
        let chosen = resolve(&solver, &a, "m", &[INT]).into_solved().unwrap();
        assert_eq!(chosen.signature(), "m(long)");
        let integer = reference(&solver, "java.lang.Integer");
        let chosen = resolve(&solver, &a, "m", &[integer]).into_solved().unwrap();
        assert_eq!(chosen.signature(), "m(java.lang.Integer)");
    }

    #[test]
    fn test_subtype_more_specific() {
        let (solver, a) = setup("class A { void m(Object o) {} void m(String s) {} }");
        let string = reference(&solver, "java.lang.String");
        let chosen = resolve(&solver, &a, "m", &[string]).into_solved().unwrap();
        assert_eq!(chosen.signature(), "m(java.lang.String)");
        assert!(resolve(&solver, &a, "m", &[ResolvedType::Null]).is_solved());
    }

    #[test]
    fn test_equally_specific_is_ambiguous() {
        let (solver, a) = setup(
            "interface P {} interface Q {} class PQ implements P, Q {} class A { void m(P p) {} void m(Q q) {} }",
        );
        let pq = reference(&solver, "PQ");
        match resolve(&solver, &a, "m", &[pq]) {
            SymbolReference::Ambiguous(candidates) => assert_eq!(candidates.len(), 2),
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    #[test]
    fn test_no_applicable_candidate() {
        let (solver, a) = setup("class A { void m(String s) {} }");
        assert!(resolve(&solver, &a, "m", &[INT]).is_unsolved());
        assert!(resolve(&solver, &a, "m", &[]).is_unsolved());
    }

    #[test]
    fn test_variable_arity() {
        let (solver, a) = setup("class A { void m(String first, int... rest) {} void m(String only) {} }");
        let string = reference(&solver, "java.lang.String");
        let chosen = resolve(&solver, &a, "m", &[string.clone()]).into_solved().unwrap();
        assert_eq!(chosen.signature(), "m(java.lang.String)");
        let chosen = resolve(&solver, &a, "m", &[string.clone(), INT, INT]).into_solved().unwrap();
        assert!(chosen.is_varargs());
        let array = ResolvedType::array_of(INT);
        assert!(resolve(&solver, &a, "m", &[string, array]).is_solved());
    }

    #[test]
    fn test_infers_method_type_arguments() {
        let (solver, a) = setup(
            "import java.util.List; class A { <T> T first(List<T> items) { return null; } <T extends Comparable<T>> T max(T a, T b) { return a; } }",
        );
        let string = reference(&solver, "java.lang.String");
        let list = solver.solve_type("java.util.List").unwrap();
        let strings = ResolvedType::Reference(ReferenceType::new(list, vec![string.clone()]).unwrap());
        let first = resolve(&solver, &a, "first", &[strings]).into_solved().unwrap();
        assert_eq!(first.return_type(), &string);

        let max = resolve(&solver, &a, "max", &[INT, INT]).into_solved().unwrap();
        assert_eq!(max.return_type().to_string(), "java.lang.Integer");
    }
}
