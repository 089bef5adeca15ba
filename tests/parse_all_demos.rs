mod common;

use common::assertions::{assert_has_query, assert_has_schema, assert_parses};
use common::fixtures::{discover_demos, load_demo};
use helixql::ast::visit::{walk_expression, walk_source, Visit};
use helixql::ast::*;
use helixql::parse;
use std::fs;

#[test]
fn test_all_demos_parse() {
    let demos = discover_demos();

    assert!(!demos.is_empty(), "No .hx demos found! Check demos/ directory.");

    let mut failures = Vec::new();

    for demo_path in &demos {
        let source = fs::read_to_string(demo_path)
            .unwrap_or_else(|e| panic!("Failed to read {:?}: {}", demo_path, e));

        let result = parse(&source);
        if result.diagnostics.is_empty() {
            println!("✓ Parsed: {}", demo_path.display());
        } else {
            eprintln!("✗ Diagnostics in: {}", demo_path.display());
            for diagnostic in &result.diagnostics {
                eprintln!("  {}", diagnostic);
            }
            failures.push((demo_path.clone(), result.diagnostics));
        }
    }

    if !failures.is_empty() {
        panic!(
            "\n{} out of {} demos did not parse cleanly:\n{}",
            failures.len(),
            demos.len(),
            failures
                .iter()
                .map(|(path, diagnostics)| format!("  - {}: {:?}", path.display(), diagnostics))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }
}

#[test]
fn test_social_demo_shape() {
    let ast = assert_parses(&load_demo("social"));
    assert_eq!(ast.schemas().count(), 4);

    let SchemaDef::Node(user) = assert_has_schema(&ast, "User") else {
        panic!("User should be a node");
    };
    assert!(user.fields[0].indexed);
    assert_eq!(user.fields[4].default, Some(DefaultValue::Now));

    let SchemaDef::Edge(follows) = assert_has_schema(&ast, "Follows") else {
        panic!("Follows should be an edge");
    };
    assert_eq!(follows.properties.len(), 1);

    let followers = assert_has_query(&ast, "followers");
    assert_eq!(followers.body.len(), 2);
    let ExpressionKind::IdTraversal(ret) = &followers.returns[0].kind else {
        panic!("expected projection on followers");
    };
    let StepKind::Object(object) = &ret.steps[0].kind else {
        panic!("expected object step");
    };
    assert_eq!(object.fields.len(), 2);
}

#[test]
fn test_vectors_demo_shape() {
    let ast = assert_parses(&load_demo("vectors"));
    let search = assert_has_query(&ast, "searchTop");
    assert!(search.body.is_empty());
    assert!(matches!(
        search.returns[0].kind,
        ExpressionKind::SearchVector(_)
    ));
}

#[test]
fn test_maintenance_demo_shape() {
    let ast = assert_parses(&load_demo("maintenance"));
    let remove = assert_has_query(&ast, "removeUser");
    assert_eq!(remove.body.len(), 3);
    assert!(remove
        .body
        .iter()
        .all(|stmt| matches!(stmt.kind, StatementKind::Drop { target: Some(_) })));

    let import = assert_has_query(&ast, "importUsers");
    let StatementKind::ForLoop { binding, body, .. } = &import.body[0].kind else {
        panic!("expected FOR loop");
    };
    assert_eq!(
        binding,
        &ForArg::Destructure(vec!["name".into(), "age".into(), "city".into()])
    );
    assert_eq!(body.len(), 1);
}

/// Collects the schema names that traversals and vector searches start from
#[derive(Default)]
struct StartTypes(Vec<String>);

impl Visit for StartTypes {
    fn visit_expression(&mut self, expr: &Expression) {
        match &expr.kind {
            ExpressionKind::Traversal(traversal) => {
                self.0.extend(traversal.start.types.iter().cloned())
            }
            ExpressionKind::SearchVector(search) => self.0.push(search.vector_type.clone()),
            _ => {}
        }
        walk_expression(self, expr);
    }
}

#[test]
fn test_demo_traversals_start_from_declared_schemas() {
    let mut declared = Vec::new();
    let mut used = StartTypes::default();

    for demo_path in discover_demos() {
        let source = fs::read_to_string(&demo_path)
            .unwrap_or_else(|e| panic!("Failed to read {:?}: {}", demo_path, e));
        let ast = assert_parses(&source);
        declared.extend(ast.schemas().map(|schema| schema.name().to_string()));
        walk_source(&mut used, &ast);
    }

    assert!(used.0.iter().any(|name| name == "User"));
    assert!(used.0.iter().any(|name| name == "Document"));
    for name in &used.0 {
        assert!(declared.contains(name), "`{}` is not declared in any demo", name);
    }
}
