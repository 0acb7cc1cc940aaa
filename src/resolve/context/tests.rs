use std::sync::Arc;

use super::*;
use crate::parser::SyntaxNode;
use crate::solver::{CombinedTypeSolver, SourceSetTypeSolver};

fn workspace(texts: &[&str]) -> (CombinedTypeSolver, Vec<Arc<SourceUnit>>) {
    let mut sources = SourceSetTypeSolver::new();
    let units = texts.iter().map(|t| sources.add_source(t)).collect();
    let solver = CombinedTypeSolver::with_builtins([Arc::new(sources) as Arc<dyn TypeSolver>]);
    (solver, units)
}

/// The last node of `kind` whose text is `text`.
fn node(unit: &SourceUnit, kind: SyntaxKind, text: &str) -> SyntaxNode {
    unit.syntax()
        .descendants()
        .filter(|n| n.kind() == kind && n.text().to_string().trim() == text)
        .last()
        .unwrap()
}

fn value_kind(unit: &Arc<SourceUnit>, at: &SyntaxNode, name: &str, solver: &dyn TypeSolver) -> String {
    context_for(unit, at, solver)
        .resolve_value(name)
        .unwrap()
        .into_solved()
        .map(|d| d.variant_name().to_string())
        .unwrap_or_else(|| "unsolved".to_string())
}

#[test]
fn test_local_shadows_parameter_and_field() {
    let (solver, units) = workspace(&[
        "class A { String x; void m(long x) { int x = 0; use(x); } void n(long x) { use(x); } void o() { use(x); } }",
    ]);
    let unit = &units[0];
    let calls: Vec<_> = unit
        .syntax()
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::METHOD_CALL_EXPR)
        .collect();
    let kinds: Vec<_> = calls
        .iter()
        .map(|call| value_kind(unit, call, "x", &solver))
        .collect();
    assert_eq!(kinds, vec!["local variable", "parameter", "field"]);
}

#[test]
fn test_only_earlier_locals_visible() {
    let (solver, units) = workspace(&["class A { void m() { use(y); int y = 1; use(y); } }"]);
    let unit = &units[0];
    let calls: Vec<_> = unit
        .syntax()
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::METHOD_CALL_EXPR)
        .collect();
    assert_eq!(value_kind(unit, &calls[0], "y", &solver), "unsolved");
    assert_eq!(value_kind(unit, &calls[1], "y", &solver), "local variable");
}

#[test]
fn test_loop_and_catch_variables() {
    let (solver, units) = workspace(&[
        "class A { void m(int[] xs) { for (int i = 0; i < 3; i++) { use(i); } for (int v : xs) { use(v); } try { } catch (RuntimeException e) { use(e); } use(i); } }",
    ]);
    let unit = &units[0];
    let at = |text: &str| node(unit, SyntaxKind::METHOD_CALL_EXPR, text);
    assert_eq!(value_kind(unit, &at("use(i)"), "i", &solver), "unsolved");
    let first_use = unit
        .syntax()
        .descendants()
        .find(|n| n.kind() == SyntaxKind::METHOD_CALL_EXPR)
        .unwrap();
    assert_eq!(value_kind(unit, &first_use, "i", &solver), "local variable");
    assert_eq!(value_kind(unit, &at("use(v)"), "v", &solver), "local variable");
    assert_eq!(value_kind(unit, &at("use(e)"), "e", &solver), "parameter");
}

#[test]
fn test_type_parameters_in_header_and_method() {
    let (solver, units) = workspace(&[
        "class Box<T extends Comparable<T>> { <U> U map(T t) { return null; } }",
    ]);
    let unit = &units[0];
    let bound = node(unit, SyntaxKind::CLASS_TYPE, "Comparable<T>");
    let t = context_for(unit, &bound, &solver)
        .resolve_type("T")
        .unwrap()
        .into_solved()
        .unwrap();
    assert!(t.is_type_variable());

    let ret = node(unit, SyntaxKind::CLASS_TYPE, "U");
    let context = context_for(unit, &ret, &solver);
    assert!(context.resolve_type("U").unwrap().into_solved().unwrap().is_type_variable());
    assert!(context.resolve_type("T").unwrap().is_solved());
    assert_eq!(
        context.resolve_type("Comparable").unwrap().into_solved().unwrap().qualified_name(),
        "java.lang.Comparable"
    );
}

#[test]
fn test_imports_and_packages() {
    let (solver, units) = workspace(&[
        "package app; import java.util.List; import lib.*; class Main { } class Other { }",
        "package app; class Sibling { }",
        "package lib; public class Helper { } public class List { }",
    ]);
    let unit = &units[0];
    let root = unit.syntax();
    let context = context_for(unit, &root, &solver);
    let qualified = |name: &str| {
        context
            .resolve_type(name)
            .unwrap()
            .into_solved()
            .map(|d| d.qualified_name().to_string())
    };
    assert_eq!(qualified("Other").as_deref(), Some("app.Other"));
    assert_eq!(qualified("Sibling").as_deref(), Some("app.Sibling"));
    assert_eq!(qualified("Helper").as_deref(), Some("lib.Helper"));
    // Single-type import wins over on-demand.
    assert_eq!(qualified("List").as_deref(), Some("java.util.List"));
    assert_eq!(qualified("String").as_deref(), Some("java.lang.String"));
    assert_eq!(qualified("java.util.Map").as_deref(), Some("java.util.Map"));
    assert_eq!(qualified("Missing"), None);
}

#[test]
fn test_ambiguous_on_demand_import() {
    let (solver, units) = workspace(&[
        "import a.*; import b.*; class Main { }",
        "package a; public class Thing { }",
        "package b; public class Thing { }",
    ]);
    let unit = &units[0];
    let context = context_for(unit, &unit.syntax(), &solver);
    assert!(context.resolve_type("Thing").unwrap().is_ambiguous());
}

#[test]
fn test_static_imports() {
    let (solver, units) = workspace(&[
        "import static java.lang.Math.PI; import static java.lang.Math.*; class A { void m() { double r = max(1, 2); } }",
    ]);
    let unit = &units[0];
    let call = node(unit, SyntaxKind::METHOD_CALL_EXPR, "max(1, 2)");
    let context = context_for(unit, &call, &solver);
    let pi = context.resolve_value("PI").unwrap().into_solved().unwrap();
    assert_eq!(pi.qualified_name(), "java.lang.Math.PI");
    let int = ResolvedType::Primitive(crate::model::PrimitiveType::Int);
    let usage = context
        .solve_method("max", &[int.clone(), int])
        .unwrap()
        .into_solved()
        .unwrap();
    assert_eq!(usage.return_type().to_string(), "int");
}

#[test]
fn test_inherited_members_visible_in_body() {
    let (solver, units) = workspace(&[
        "class Base { protected int count; int size() { return 0; } } class A extends Base { void m() { use(count); } }",
    ]);
    let unit = &units[0];
    let call = node(unit, SyntaxKind::METHOD_CALL_EXPR, "use(count)");
    let context = context_for(unit, &call, &solver);
    let field = context.resolve_value("count").unwrap().into_solved().unwrap();
    assert_eq!(field.qualified_name(), "Base.count");
    let size = context.solve_method("size", &[]).unwrap().into_solved().unwrap();
    assert_eq!(size.declaring_type().name(), "Base");
}

#[test]
fn test_unknown_names_unsolved() {
    let (solver, units) = workspace(&["class A { void m() { use(nothing); } }"]);
    let unit = &units[0];
    let call = node(unit, SyntaxKind::METHOD_CALL_EXPR, "use(nothing)");
    let context = context_for(unit, &call, &solver);
    assert!(context.resolve_value("nothing").unwrap().is_unsolved());
    assert!(context.resolve_type("Nothing").unwrap().is_unsolved());
    assert!(context.solve_method("use", &[]).unwrap().is_unsolved());
}
