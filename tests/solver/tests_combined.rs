//! Composite symbol source tests.

use std::sync::Arc;

use rstest::rstest;
use symsolve::{
    CombinedTypeSolver, MemoryTypeSolver, SourceSetTypeSolver, SymbolReference, TypeSolver,
};

use crate::helpers::resolve_helpers::*;

fn source_set(text: &str) -> Arc<dyn TypeSolver> {
    let mut sources = SourceSetTypeSolver::new();
    sources.add_source(text);
    Arc::new(sources)
}

#[test]
fn test_first_source_wins() {
    let first = source_set("package p; class Same { int fromFirst; }");
    let second = source_set("package p; class Same { int fromSecond; }");
    let solver = CombinedTypeSolver::new([first, second]);

    let same = solver.solve_type("p.Same").unwrap();
    assert!(same.declared_field("fromFirst").unwrap().is_some());
    assert!(same.declared_field("fromSecond").unwrap().is_none());
}

#[test]
fn test_later_source_fills_gaps() {
    let first = source_set("package p; class OnlyFirst { }");
    let second = source_set("package q; class OnlySecond { }");
    let solver = CombinedTypeSolver::new([first, second]);

    assert!(solver.has_type("p.OnlyFirst"));
    assert!(solver.has_type("q.OnlySecond"));
}

#[test]
fn test_nested_composites() {
    let inner = CombinedTypeSolver::new([source_set("package lib; class Tool { }")]);
    let outer = CombinedTypeSolver::new([
        Arc::new(inner) as Arc<dyn TypeSolver>,
        BUILTINS.clone() as Arc<dyn TypeSolver>,
    ]);

    assert!(outer.has_type("lib.Tool"));
    assert_eq!(outer.root_type().unwrap().qualified_name(), "java.lang.Object");
}

#[rstest]
#[case("com.example.Nothing")]
#[case("java.lang.Nothing")]
#[case("Nothing")]
#[case("java..lang")]
#[case("")]
fn test_unknown_names_unsolved(#[case] name: &str) {
    let solver = CombinedTypeSolver::new([
        source_set("package p; class Known { }"),
        BUILTINS.clone() as Arc<dyn TypeSolver>,
    ]);

    assert!(solver.try_solve_type(name).is_unsolved());
    assert!(solver.solve_type(name).unwrap_err().is_unsolved());
}

#[test]
fn test_missing_root_type() {
    let solver = CombinedTypeSolver::new([source_set("package p; class Lonely { }")]);

    assert!(solver.root_type().is_err());
    let lonely = solver.solve_type("p.Lonely").unwrap();
    // Lenient ancestry tolerates the missing root; strict does not.
    assert!(lonely.ancestors(&solver, true).unwrap().is_empty());
    assert!(lonely.ancestors(&solver, false).is_err());
}

#[test]
fn test_memory_source_registration() {
    let ws = workspace(&["package p; class Registered { }"]);
    let decl = ws.type_decl("p.Registered");

    let mut memory = MemoryTypeSolver::new();
    memory.add_as("alias.Name", decl.clone());
    let solver = CombinedTypeSolver::new([Arc::new(memory) as Arc<dyn TypeSolver>]);

    assert_eq!(solver.try_solve_type("alias.Name"), SymbolReference::Solved(decl));
}

#[test]
fn test_cache_keeps_first_answer_until_cleared() {
    let mut sources = SourceSetTypeSolver::new();
    let unit = sources.add_source("package p; class Before { }");
    let solver = CombinedTypeSolver::new([Arc::new(sources) as Arc<dyn TypeSolver>]);

    assert!(solver.has_type("p.Before"));
    assert!(!solver.has_type("p.After"));

    unit.replace_text("package p; class After { }");
    // Negative answers are cached too.
    assert!(!solver.has_type("p.After"));

    solver.clear_cache();
    assert!(solver.has_type("p.After"));
    assert!(!solver.has_type("p.Before"));
}

#[test]
fn test_uncached_sees_edits_immediately() {
    let mut sources = SourceSetTypeSolver::new();
    let unit = sources.add_source("package p; class Before { }");
    let solver =
        CombinedTypeSolver::new([Arc::new(sources) as Arc<dyn TypeSolver>]).with_cache(false);

    assert!(solver.has_type("p.Before"));
    unit.replace_text("package p; class After { }");
    assert!(solver.has_type("p.After"));
}
