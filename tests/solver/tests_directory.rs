//! Resolution over a source root on disk.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use symsolve::parser::SyntaxKind;
use symsolve::{CombinedTypeSolver, DirectoryTypeSolver, Resolver, TypeSolver};
use tempfile::TempDir;

use crate::helpers::resolve_helpers::BUILTINS;
use crate::helpers::symbol_assertions::*;

fn write(root: &Path, relative: &str, text: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "com/acme/model/Entity.java",
        "package com.acme.model; public abstract class Entity { protected long id; public long getId() { return id; } }",
    );
    write(
        dir.path(),
        "com/acme/model/User.java",
        "package com.acme.model; public class User extends Entity { String email; public static class Builder { } }",
    );
    write(
        dir.path(),
        "com/acme/app/Service.java",
        r#"
        package com.acme.app;

        import com.acme.model.*;

        public class Service {
            long lookup(User user) {
                User.Builder builder = new User.Builder();
                return user.getId();
            }
        }
        "#,
    );
    dir
}

fn resolver(root: &Path) -> Resolver {
    let solver = CombinedTypeSolver::new([
        Arc::new(DirectoryTypeSolver::new(root)) as Arc<dyn TypeSolver>,
        BUILTINS.clone() as Arc<dyn TypeSolver>,
    ]);
    Resolver::new(Arc::new(solver))
}

#[test]
fn test_resolves_across_files() {
    let dir = project();
    let resolver = resolver(dir.path());

    let service = resolver.solver().solve_type("com.acme.app.Service").unwrap();
    let unit = service.handle().unit().clone();
    let call = unit
        .syntax()
        .descendants()
        .find(|n| n.kind() == SyntaxKind::METHOD_CALL_EXPR)
        .unwrap();
    let call = unit.handle(&call);

    assert_eq!(resolver.type_of(&call).unwrap().describe(), "long");
    assert_declaration(
        resolver.declaration_of(&call).unwrap(),
        "com.acme.model.Entity.getId",
    );
}

#[test]
fn test_nested_type_from_outer_file() {
    let dir = project();
    let resolver = resolver(dir.path());

    let builder = resolver.solver().solve_type("com.acme.model.User.Builder").unwrap();
    assert_eq!(builder.name(), "Builder");

    let user = resolver.solver().solve_type("com.acme.model.User").unwrap();
    let ancestors = resolver.ancestors_of(&user, false).unwrap();
    assert_ancestors(&ancestors, &["com.acme.model.Entity"]);
}

#[test]
fn test_scan_lists_sources() {
    let dir = project();
    let solver = DirectoryTypeSolver::new(dir.path());

    let names: Vec<_> = solver
        .scan()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["Service.java", "Entity.java", "User.java"]);
}
