//! Scope escalation tests.
//!
//! Names resolve to the innermost declaration visible at the use site.

use symsolve::parser::SyntaxKind;

use crate::helpers::resolve_helpers::*;
use crate::helpers::source_fixtures::*;
use crate::helpers::symbol_assertions::*;

// =============================================================================
// SHADOWING
// =============================================================================

#[test]
fn test_local_shadows_parameter_and_field() {
    let ws = workspace(&[SHADOWING]);
    let usage = ws.find(SyntaxKind::NAME_EXPR, "x");

    let decl = assert_solved(ws.resolver.declaration_of(&usage).unwrap());
    assert!(decl.is_local_variable());
    assert_eq!(ws.resolver.type_of(&usage).unwrap().describe(), "int");
}

#[test]
fn test_qualified_this_access_reaches_field() {
    let source = r#"
        package app;
        class Point {
            double x;
            void set(double x) { this.x = x; }
        }
    "#;
    let ws = workspace(&[source]);

    let access = ws.find(SyntaxKind::FIELD_ACCESS_EXPR, "this.x");
    assert_declaration(ws.resolver.declaration_of(&access).unwrap(), "app.Point.x");

    let value = ws
        .find_all(SyntaxKind::NAME_EXPR, "x")
        .pop()
        .unwrap();
    let decl = assert_solved(ws.resolver.declaration_of(&value).unwrap());
    assert!(decl.is_parameter());
}

#[test]
fn test_field_access_uses_target_type_not_lexical_scope() {
    let source = r#"
        package app;
        class Label { String text; }
        class View {
            int text;
            Object show(Label label) { return label.text; }
        }
    "#;
    let ws = workspace(&[source]);
    let access = ws.find(SyntaxKind::FIELD_ACCESS_EXPR, "label.text");

    assert_declaration(ws.resolver.declaration_of(&access).unwrap(), "app.Label.text");
    assert_eq!(ws.type_of(SyntaxKind::FIELD_ACCESS_EXPR, "label.text"), "java.lang.String");
}

#[test]
fn test_member_type_shadows_import() {
    let source = r#"
        package app;
        import java.util.List;
        class Holder {
            static class List { }
            List item;
        }
    "#;
    let ws = workspace(&[source]);
    let field_type = ws.find(SyntaxKind::CLASS_TYPE, "List");

    assert_eq!(
        ws.resolver.convert_to_usage(&field_type).unwrap().describe(),
        "app.Holder.List"
    );
}

// =============================================================================
// CROSS-UNIT AND UNSOLVED NAMES
// =============================================================================

#[test]
fn test_same_package_type_from_other_unit() {
    let ws = workspace(&[
        "package app; class Main { Helper helper; }",
        "package app; class Helper { }",
    ]);
    let ty = ws.find(SyntaxKind::CLASS_TYPE, "Helper");
    let decl = assert_solved(ws.resolver.declaration_of(&ty).unwrap());
    assert_eq!(decl.qualified_name(), "app.Helper");
}

#[test]
fn test_unknown_names_are_values_not_errors() {
    let ws = workspace(&["package app; class Main { Object o = nowhere; Ghost g; }"]);

    let name = ws.find(SyntaxKind::NAME_EXPR, "nowhere");
    assert!(ws.resolver.declaration_of(&name).unwrap().is_unsolved());
    assert!(ws.resolver.type_of(&name).unwrap().is_unsolved());

    let ghost = ws.find(SyntaxKind::CLASS_TYPE, "Ghost");
    assert!(ws.resolver.declaration_of(&ghost).unwrap().is_unsolved());
    assert!(ws.resolver.convert_to_usage(&ghost).unwrap().is_unsolved());
}

#[test]
fn test_context_for_exposes_scope_chain() {
    let ws = workspace(&[SHADOWING]);
    let usage = ws.find(SyntaxKind::NAME_EXPR, "x");
    let context = ws.resolver.context_for(&usage).unwrap();

    // `seen` is being declared by the statement that holds the use site.
    assert!(context.resolve_value("seen").unwrap().is_unsolved());
    assert!(assert_solved(context.resolve_value("x").unwrap()).is_local_variable());
    assert_eq!(
        assert_solved(context.resolve_type("Counter").unwrap()).qualified_name(),
        "app.Counter"
    );
}

// =============================================================================
// INHERITED AND ANONYMOUS MEMBERS
// =============================================================================

#[test]
fn test_inherited_generic_field_by_simple_name() {
    let source = r#"
        package app;
        class Base<T> { T value; }
        class Sub extends Base<String> {
            Object direct() { return value; }
            Object qualified() { return this.value; }
            class Inner {
                Object fromInner() { return value; }
            }
        }
    "#;
    let ws = workspace(&[source]);

    assert_eq!(ws.type_of(SyntaxKind::FIELD_ACCESS_EXPR, "this.value"), "java.lang.String");
    let uses = ws.find_all(SyntaxKind::NAME_EXPR, "value");
    assert_eq!(uses.len(), 2);
    for usage in &uses {
        assert_eq!(ws.resolver.type_of(usage).unwrap().describe(), "java.lang.String");
        assert_declaration(ws.resolver.declaration_of(usage).unwrap(), "app.Base.value");
    }
}

const ANONYMOUS_BODY: &str = r#"
    package app;
    class Outer {
        int count;
        String label;
        void helper() { }
        Runnable task() {
            return new Runnable() {
                String count;
                void helper() { }
                public void run() {
                    Object mine = count;
                    Object outer = label;
                    Object self = this;
                    helper();
                }
            };
        }
        void direct() {
            Object c = count;
            helper();
        }
    }
"#;

#[test]
fn test_anonymous_body_members_shadow_outer_members() {
    let ws = workspace(&[ANONYMOUS_BODY]);

    let counts = ws.find_all(SyntaxKind::NAME_EXPR, "count");
    assert_declaration(ws.resolver.declaration_of(&counts[0]).unwrap(), "app.Outer$1.count");
    assert_eq!(ws.resolver.type_of(&counts[0]).unwrap().describe(), "java.lang.String");
    assert_declaration(ws.resolver.declaration_of(&counts[1]).unwrap(), "app.Outer.count");
    assert_eq!(ws.resolver.type_of(&counts[1]).unwrap().describe(), "int");

    let calls = ws.find_all(SyntaxKind::METHOD_CALL_EXPR, "helper()");
    assert_declaration(ws.resolver.declaration_of(&calls[0]).unwrap(), "app.Outer$1.helper");
    assert_declaration(ws.resolver.declaration_of(&calls[1]).unwrap(), "app.Outer.helper");
}

#[test]
fn test_anonymous_body_escalates_and_types_this() {
    let ws = workspace(&[ANONYMOUS_BODY]);

    let label = ws.find(SyntaxKind::NAME_EXPR, "label");
    assert_declaration(ws.resolver.declaration_of(&label).unwrap(), "app.Outer.label");
    assert_eq!(ws.type_of(SyntaxKind::THIS_EXPR, "this"), "app.Outer$1");

    let mine = ws.find(SyntaxKind::NAME_EXPR, "count");
    let anonymous = ws.resolver.type_declaration(&mine).unwrap();
    assert!(anonymous.is_anonymous());
    assert_eq!(anonymous.qualified_name(), "app.Outer$1");
    let ancestors = ws.resolver.ancestors_of(&anonymous, false).unwrap();
    assert_ancestors(&ancestors, &["java.lang.Object", "java.lang.Runnable"]);
}
