//! End-to-end behaviour of `parse` on small inputs

mod common;

use common::assertions::{assert_has_query, assert_parses, assert_single_error};
use helixql::ast::*;
use helixql::{parse, parse_with_config, ParserConfig};

fn field(name: &str, ty: Type) -> (String, Type) {
    (name.to_string(), ty)
}

#[test]
fn test_node_definition() {
    let ast = assert_parses("N::User { name: String, age: U32 }");
    let Definition::Schema(SchemaDef::Node(node)) = &ast.definitions[0] else {
        panic!("expected node definition");
    };
    assert_eq!(node.name, "User");
    let fields: Vec<_> = node
        .fields
        .iter()
        .map(|f| (f.name.clone(), f.ty.clone()))
        .collect();
    assert_eq!(
        fields,
        vec![
            field("name", Type::Named(PrimitiveType::String)),
            field("age", Type::Named(PrimitiveType::U32)),
        ]
    );
}

#[test]
fn test_indexed_field_with_default() {
    let ast = assert_parses(r#"N::User { INDEX name: String DEFAULT "anon" }"#);
    let Definition::Schema(SchemaDef::Node(node)) = &ast.definitions[0] else {
        panic!("expected node definition");
    };
    assert_eq!(node.fields.len(), 1);
    assert!(node.fields[0].indexed);
    assert_eq!(
        node.fields[0].default,
        Some(DefaultValue::Literal(Literal::String("anon".into())))
    );
}

#[test]
fn test_edge_definition() {
    let ast = assert_parses("E::Follows { From: User, To: User }");
    let Definition::Schema(SchemaDef::Edge(edge)) = &ast.definitions[0] else {
        panic!("expected edge definition");
    };
    assert_eq!(edge.name, "Follows");
    assert_eq!(edge.from, "User");
    assert_eq!(edge.to, "User");
    assert!(edge.properties.is_empty());
}

#[test]
fn test_query_with_assignment() {
    let ast = assert_parses("QUERY getUser(id: String) => user <- N<User>(id) RETURN user");
    let query = assert_has_query(&ast, "getUser");
    assert_eq!(query.params[0].name, "id");
    assert_eq!(query.params[0].ty, Type::Named(PrimitiveType::String));

    let StatementKind::Assignment { var, value } = &query.body[0].kind else {
        panic!("expected assignment");
    };
    assert_eq!(var, "user");
    let ExpressionKind::Traversal(traversal) = &value.kind else {
        panic!("expected traversal");
    };
    assert_eq!(traversal.start.source, StartSource::Nodes);
    assert_eq!(traversal.start.types, vec!["User"]);
    assert_eq!(
        traversal.start.selector,
        Some(StartSelector::Ids(vec![IdArg::Identifier("id".into())]))
    );
    assert!(traversal.steps.is_empty() && traversal.last.is_none());

    assert_eq!(query.returns.len(), 1);
    assert_eq!(query.returns[0].kind, ExpressionKind::Identifier("user".into()));
}

#[test]
fn test_return_projection() {
    let ast = assert_parses("QUERY q() => RETURN { name, age: user::age }");
    let query = assert_has_query(&ast, "q");
    let ExpressionKind::ObjectStep(object) = &query.returns[0].kind else {
        panic!("expected object step");
    };
    assert_eq!(object.fields[0].name, "name");
    assert_eq!(object.fields[0].value, None);
    assert_eq!(object.fields[1].name, "age");
    let Some(ExpressionKind::IdTraversal(traversal)) = object.fields[1].value.as_ref().map(|v| &v.kind)
    else {
        panic!("expected id traversal value");
    };
    assert_eq!(traversal.base, "user");
    assert_eq!(traversal.steps.len(), 1);
    assert_eq!(traversal.steps[0].kind, StepKind::Field("age".into()));
    assert!(traversal.last.is_none());
}

#[test]
fn test_return_without_expression() {
    let result = parse("QUERY bad() => RETURN");
    assert!(result.ast.is_empty());
    assert_eq!(result.diagnostics.len(), 1);
    let error = &result.diagnostics[0];
    assert_eq!(error.severity, Severity::Error);
    assert_eq!(error.category(), Category::Syntax);
    assert_eq!(
        error.message,
        "expected an expression after `RETURN`, found end of input"
    );
}

#[test]
fn test_error_positions_map_to_lines() {
    let source = "N::User { name: String }\n\nE::Follows {\n    From: User\n}\n";
    let error = assert_single_error(source);
    assert_eq!(error.kind, DiagnosticKind::MissingEndpoint);
    let (line, col) = LineIndex::new(source).line_col(error.span.start);
    assert_eq!((line, col), (3, 1));
}

#[test]
fn test_every_error_is_reported() {
    let source = r#"
        N::A { x: string }
        N::B { y: String }
        E::C { From: B }
        QUERY q() => RETURN
        QUERY r() => RETURN NONE
    "#;
    let result = parse(source);
    assert_eq!(result.errors().count(), 3);
    let names: Vec<_> = result.ast.definitions.iter().map(Definition::name).collect();
    assert_eq!(names, vec!["B", "r"]);
}

#[test]
fn test_keywords_are_not_reserved() {
    let ast = assert_parses(
        "QUERY q(count: I64, where: String) => in <- N<User>::WHERE(_::where::EQ(where)) RETURN in::{ count }",
    );
    let query = assert_has_query(&ast, "q");
    assert_eq!(query.params[0].name, "count");
    assert!(matches!(
        &query.body[0].kind,
        StatementKind::Assignment { var, .. } if var == "in"
    ));
}

#[test]
fn test_case_sensitivity_in_type_positions() {
    for source in [
        "N::user",
        "E::Follows { From: user, To: User }",
        "QUERY q(id: string) => RETURN id",
        "QUERY q() => RETURN N<user>",
        "QUERY q() => x <- AddN<user> RETURN x",
    ] {
        let error = assert_single_error(source);
        assert_eq!(error.kind, DiagnosticKind::UnexpectedToken, "{source}");
        assert!(error.message.contains("uppercase"), "{source}: {}", error.message);
    }
}

#[test]
fn test_case_sensitivity_in_name_positions() {
    for source in [
        "N::User { Name: String }",
        "QUERY q(Id: String) => RETURN NONE",
        "QUERY q() => RETURN { Name }",
        "QUERY q() => FOR X IN xs { } RETURN NONE",
        "QUERY GetUser() => RETURN NONE",
    ] {
        let error = assert_single_error(source);
        assert!(error.message.contains("lowercase"), "{source}: {}", error.message);
    }
}

#[test]
fn test_nesting_limit_is_configurable() {
    let source = "QUERY q() => RETURN { a: { b: { c: { d: NONE } } } }";
    let result = parse_with_config(source, &ParserConfig::default().with_max_nesting_depth(4));
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].kind, DiagnosticKind::NestingTooDeep);
    assert_eq!(
        result.diagnostics[0].message,
        "nesting exceeds the maximum depth of 4"
    );

    let result = parse_with_config(source, &ParserConfig::default().with_max_nesting_depth(16));
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_ast_serializes_to_json() {
    let ast = assert_parses("N::User { name: String } QUERY q() => RETURN N<User>::COUNT");
    let json = serde_json::to_value(&ast).expect("AST should serialize");
    assert_eq!(json["definitions"][0]["Schema"]["Node"]["name"], "User");
    let back: Source = serde_json::from_value(json).expect("AST should deserialize");
    assert_eq!(back, ast);
}
