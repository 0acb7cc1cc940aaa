//! Expression typing through the resolver facade.

use rstest::rstest;
use symsolve::parser::SyntaxKind;

use crate::helpers::resolve_helpers::*;
use crate::helpers::source_fixtures::*;
use crate::helpers::symbol_assertions::*;

#[rstest]
#[case::local(SyntaxKind::NAME_EXPR, "sum", "double")]
#[case::for_each_variable(SyntaxKind::NAME_EXPR, "s", "shapes.Shape")]
#[case::abstract_call(SyntaxKind::METHOD_CALL_EXPR, "s.area()", "double")]
#[case::generic_receiver(SyntaxKind::METHOD_CALL_EXPR, "shapes.get(0)", "shapes.Shape")]
#[case::inherited_from_collection(SyntaxKind::METHOD_CALL_EXPR, "shapes.size()", "int")]
#[case::static_field_arithmetic(SyntaxKind::BINARY_EXPR, "Math.PI * radius * radius", "double")]
#[case::this_field(SyntaxKind::FIELD_ACCESS_EXPR, "this.radius", "double")]
#[case::generic_creation(SyntaxKind::NEW_EXPR, "new ArrayList<Shape>()", "java.util.ArrayList<shapes.Shape>")]
#[case::compound_assignment(SyntaxKind::ASSIGN_EXPR, "sum += s.area()", "double")]
#[case::field_type(SyntaxKind::CLASS_TYPE, "List<Shape>", "java.util.List<shapes.Shape>")]
fn test_shapes_expression_types(#[case] kind: SyntaxKind, #[case] text: &str, #[case] expected: &str) {
    let ws = workspace(&[SHAPES]);
    assert_eq!(ws.type_of(kind, text), expected);
}

#[rstest]
#[case("1 + 2L", "long")]
#[case("'a' + 1", "int")]
#[case("\"n=\" + 1", "java.lang.String")]
#[case("1 < 2 && true", "boolean")]
#[case("flag ? 1 : 2", "int")]
#[case("(Object) name", "java.lang.Object")]
#[case("name instanceof String", "boolean")]
#[case("new int[3][]", "int[][]")]
#[case("name.length()", "int")]
#[case("-count", "int")]
#[case("8 >> 1", "int")]
#[case("count << 2L", "int")]
#[case("2L >>> count", "long")]
#[case("'a' << 1", "int")]
fn test_operator_types(#[case] expr: &str, #[case] expected: &str) {
    let source = format!(
        "package app; class Ops {{ boolean flag; String name; short count; Object value = {expr}; }}"
    );
    let ws = workspace(&[source.as_str()]);
    let declarator = ws.find(SyntaxKind::VAR_DECLARATOR, &format!("value = {expr}"));
    let node = declarator.node().unwrap();
    let init = node.children().last().unwrap();

    let handle = ws.units[0].handle(&init);
    assert_eq!(ws.resolver.type_of(&handle).unwrap().describe(), expected);
}

#[test]
fn test_declarations_of_members() {
    let ws = workspace(&[SHAPES]);

    let area = ws.find(SyntaxKind::METHOD_CALL_EXPR, "s.area()");
    assert_declaration(ws.resolver.declaration_of(&area).unwrap(), "shapes.Shape.area");

    let radius = ws.find(SyntaxKind::FIELD_ACCESS_EXPR, "this.radius");
    assert_declaration(ws.resolver.declaration_of(&radius).unwrap(), "shapes.Circle.radius");

    let pi = ws.find(SyntaxKind::FIELD_ACCESS_EXPR, "Math.PI");
    assert_declaration(ws.resolver.declaration_of(&pi).unwrap(), "java.lang.Math.PI");
}

#[test]
fn test_var_declarations_infer_from_initializer() {
    let source = r#"
        package app;
        import java.util.*;
        class Inference {
            void run(Map<String, List<Integer>> index) {
                var keys = index.get("a");
                for (var n : keys) {
                    var doubled = n * 2;
                }
            }
        }
    "#;
    let ws = workspace(&[source]);

    let keys = ws.find(SyntaxKind::VAR_DECLARATOR, "keys = index.get(\"a\")");
    assert_eq!(
        ws.resolver.type_of(&keys).unwrap().describe(),
        "java.util.List<java.lang.Integer>"
    );
    assert_eq!(ws.type_of(SyntaxKind::NAME_EXPR, "n"), "java.lang.Integer");
    let doubled = ws.find(SyntaxKind::VAR_DECLARATOR, "doubled = n * 2");
    assert_eq!(ws.resolver.type_of(&doubled).unwrap().describe(), "int");
}

#[test]
fn test_batch_typing_preserves_order() {
    let ws = workspace(&[SHAPES]);
    let handles = vec![
        ws.find(SyntaxKind::METHOD_CALL_EXPR, "shapes.size()"),
        ws.find(SyntaxKind::NAME_EXPR, "s"),
        ws.find(SyntaxKind::METHOD_CALL_EXPR, "shapes.get(0)"),
    ];

    let types: Vec<String> = ws
        .resolver
        .resolve_types(&handles)
        .into_iter()
        .map(|t| t.unwrap().describe())
        .collect();
    assert_eq!(types, vec!["int", "shapes.Shape", "shapes.Shape"]);
}

#[test]
fn test_stale_handle_reported() {
    let ws = workspace(&[NO_SUPERTYPE]);
    let decl = ws.find(SyntaxKind::CLASS_DECL, "class Plain { }");

    ws.units[0].replace_text("package app; interface Other { }");
    assert!(decl.is_stale());
    assert!(matches!(
        ws.resolver.type_declaration(&decl),
        Err(symsolve::ResolveError::StaleNode { .. })
    ));
}
