//! Assertion helpers for resolution results.

use symsolve::{Declaration, ReferenceType, ResolvedType, SymbolReference};

/// Assert a reference is solved and return the value.
pub fn assert_solved<T: std::fmt::Debug>(reference: SymbolReference<T>) -> T {
    match reference {
        SymbolReference::Solved(value) => value,
        other => panic!("Expected a solved reference, got {:?}", other),
    }
}

/// Assert a declaration reference is solved to `qualified_name`.
pub fn assert_declaration(reference: SymbolReference<Declaration>, qualified_name: &str) -> Declaration {
    let decl = assert_solved(reference);
    assert_eq!(
        decl.qualified_name(),
        qualified_name,
        "Expected declaration '{}', got {} '{}'",
        qualified_name,
        decl.variant_name(),
        decl.qualified_name()
    );
    decl
}

/// Assert the rendered ancestors, in order.
pub fn assert_ancestors(ancestors: &[ReferenceType], expected: &[&str]) {
    let rendered: Vec<String> = ancestors
        .iter()
        .map(|a| ResolvedType::Reference(a.clone()).describe())
        .collect();
    assert_eq!(rendered, expected, "Unexpected ancestor list");
}
