//! Overload selection tests.

use symsolve::parser::SyntaxKind;
use symsolve::{Declaration, SymbolReference};

use crate::helpers::resolve_helpers::*;
use crate::helpers::source_fixtures::*;
use crate::helpers::symbol_assertions::*;

#[test]
fn test_equally_specific_overloads_are_ambiguous() {
    let ws = workspace(&[OVERLOAD_TIE]);
    let call = ws.find(SyntaxKind::METHOD_CALL_EXPR, "visit(d)");

    match ws.resolver.solve_method_call(&call).unwrap() {
        SymbolReference::Ambiguous(candidates) => {
            let mut params: Vec<_> = candidates
                .iter()
                .map(|c| c.param_types()[0].describe())
                .collect();
            params.sort();
            assert_eq!(params, vec!["app.Swimmer", "app.Walker"]);
        }
        other => panic!("Expected an ambiguous call, got {other:?}"),
    }
    assert!(ws.resolver.declaration_of(&call).unwrap().is_ambiguous());
    // The call has no single result type.
    assert!(ws.resolver.type_of(&call).unwrap().is_unsolved());
}

#[test]
fn test_most_specific_overload_wins() {
    let source = r#"
        package app;
        class Printer {
            void print(Object o) { }
            void print(String s) { }
            void print(long n) { }
            void run() { print("text"); print(1); print(new Printer()); }
        }
    "#;
    let ws = workspace(&[source]);
    let chosen = |text: &str| {
        let call = ws.find(SyntaxKind::METHOD_CALL_EXPR, text);
        let usage = assert_solved(ws.resolver.solve_method_call(&call).unwrap());
        usage.param_types()[0].describe()
    };

    assert_eq!(chosen("print(\"text\")"), "java.lang.String");
    assert_eq!(chosen("print(1)"), "long");
    assert_eq!(chosen("print(new Printer())"), "java.lang.Object");
}

#[test]
fn test_inherited_overload_through_receiver() {
    let source = r#"
        package app;
        import java.util.ArrayList;
        class Names {
            boolean run(ArrayList<String> names) { return names.add("x"); }
        }
    "#;
    let ws = workspace(&[source]);
    let call = ws.find(SyntaxKind::METHOD_CALL_EXPR, "names.add(\"x\")");

    let usage = assert_solved(ws.resolver.solve_method_call(&call).unwrap());
    assert_eq!(usage.param_types()[0].describe(), "java.lang.String");
    assert_eq!(usage.return_type().describe(), "boolean");
}

#[test]
fn test_constructor_overloads() {
    let source = r#"
        package app;
        class Range {
            Range(int end) { this(0, end); }
            Range(int start, int end) { }
            Range(long start, long end) { }
            static Range make() { return new Range(1L, 2); }
        }
    "#;
    let ws = workspace(&[source]);

    let delegating = ws.find(SyntaxKind::CTOR_CALL_EXPR, "this(0, end)");
    let ctor = assert_solved(ws.resolver.solve_constructor(&delegating).unwrap());
    assert_eq!(ctor.param_types()[0].describe(), "int");

    let creation = ws.find(SyntaxKind::NEW_EXPR, "new Range(1L, 2)");
    let ctor = assert_solved(ws.resolver.solve_constructor(&creation).unwrap());
    assert_eq!(ctor.param_types()[1].describe(), "long");
}

#[test]
fn test_resolution_is_idempotent() {
    let ws = workspace(&[SHAPES]);
    let call = ws.find(SyntaxKind::METHOD_CALL_EXPR, "shapes.get(0)");

    let first_type = ws.resolver.type_of(&call).unwrap();
    let second_type = ws.resolver.type_of(&call).unwrap();
    assert_eq!(first_type, second_type);

    let first_decl = ws.resolver.declaration_of(&call).unwrap();
    let second_decl = ws.resolver.declaration_of(&call).unwrap();
    assert_eq!(first_decl, second_decl);
    assert!(matches!(first_decl, SymbolReference::Solved(Declaration::Method(_))));
}
