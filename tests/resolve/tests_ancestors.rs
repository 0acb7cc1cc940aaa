//! Ancestor resolution tests.

use symsolve::ResolveError;

use crate::helpers::resolve_helpers::*;
use crate::helpers::source_fixtures::*;
use crate::helpers::symbol_assertions::*;

// =============================================================================
// IMPLICIT ROOT
// =============================================================================

#[test]
fn test_no_supertype_defaults_to_root() {
    let ws = workspace(&[NO_SUPERTYPE]);
    let plain = ws.type_decl("app.Plain");

    let ancestors = ws.resolver.ancestors_of(&plain, false).unwrap();
    assert_ancestors(&ancestors, &["java.lang.Object"]);
}

#[test]
fn test_interface_without_superinterfaces_defaults_to_root() {
    let ws = workspace(&["package app; interface Marker { }"]);
    let marker = ws.type_decl("app.Marker");

    assert_ancestors(&ws.resolver.ancestors_of(&marker, false).unwrap(), &["java.lang.Object"]);
}

#[test]
fn test_root_type_has_no_ancestors() {
    let ws = workspace(&[]);
    let object = ws.solver().root_type().unwrap();

    assert!(ws.resolver.ancestors_of(&object, false).unwrap().is_empty());
}

#[test]
fn test_enum_extends_enum_of_itself() {
    let ws = workspace(&["package app; enum Color { RED, GREEN }"]);
    let color = ws.type_decl("app.Color");

    assert_ancestors(
        &ws.resolver.ancestors_of(&color, false).unwrap(),
        &["java.lang.Enum<app.Color>"],
    );
}

// =============================================================================
// TYPE VARIABLES
// =============================================================================

#[test]
fn test_type_variable_bounds() {
    let ws = workspace(&[GENERIC_BOUNDS]);
    let sorted = ws.type_decl("app.Sorted");
    let params = sorted.type_parameters().unwrap();

    let t = params[0].as_type_decl();
    assert_ancestors(
        &ws.resolver.ancestors_of(&t, false).unwrap(),
        &["java.lang.Comparable<T>"],
    );

    let u = params[1].as_type_decl();
    assert_ancestors(&ws.resolver.ancestors_of(&u, false).unwrap(), &["java.lang.Object"]);
}

// =============================================================================
// GENERIC AND TRANSITIVE ANCESTORS
// =============================================================================

#[test]
fn test_generic_ancestor_substituted() {
    let ws = workspace(&[SHAPES]);
    let shape = ws.type_decl("shapes.Shape");

    assert_ancestors(
        &ws.resolver.ancestors_of(&shape, false).unwrap(),
        &["java.lang.Object", "java.lang.Comparable<shapes.Shape>"],
    );
}

#[test]
fn test_all_ancestors_breadth_first() {
    let ws = workspace(&[SHAPES]);
    let circle = ws.type_decl("shapes.Circle");

    let all = circle.all_ancestors(ws.solver(), false).unwrap();
    assert_ancestors(
        &all,
        &[
            "shapes.Shape",
            "java.lang.Object",
            "java.lang.Comparable<shapes.Shape>",
        ],
    );
    assert!(circle.is_subtype_of(&ws.type_decl("java.lang.Comparable"), ws.solver()).unwrap());
}

#[test]
fn test_cyclic_inheritance_terminates() {
    let ws = workspace(&["package app; class A extends B { } class B extends A { }"]);
    let a = ws.type_decl("app.A");

    let all = a.all_ancestors(ws.solver(), true).unwrap();
    assert_ancestors(&all, &["app.B"]);
}

// =============================================================================
// LENIENT VS STRICT
// =============================================================================

#[test]
fn test_lenient_drops_unresolvable_supertypes() {
    let ws = workspace(&[UNKNOWN_SUPERTYPE]);
    let broken = ws.type_decl("app.Broken");

    let ancestors = ws.resolver.ancestors_of(&broken, true).unwrap();
    assert_ancestors(&ancestors, &["java.lang.Runnable"]);
}

#[test]
fn test_strict_aborts_on_first_unresolvable_supertype() {
    let ws = workspace(&[UNKNOWN_SUPERTYPE]);
    let broken = ws.type_decl("app.Broken");

    let err = ws.resolver.ancestors_of(&broken, false).unwrap_err();
    match err {
        ResolveError::IncompleteAncestryAborted { type_name, missing } => {
            assert_eq!(type_name, "app.Broken");
            assert_eq!(missing, "Missing");
        }
        other => panic!("Expected IncompleteAncestryAborted, got {other:?}"),
    }
}
