use helixql::ast::*;
use helixql::parse;

/// Assert that parsing produces no diagnostics at all and return the AST
pub fn assert_parses(source: &str) -> Source {
    let result = parse(source);
    assert!(
        result.diagnostics.is_empty(),
        "Expected source to parse cleanly, got: {:#?}",
        result.diagnostics
    );
    result.ast
}

/// Assert that parsing reports exactly one error and return it
pub fn assert_single_error(source: &str) -> Diagnostic {
    let result = parse(source);
    let errors: Vec<_> = result.errors().cloned().collect();
    assert_eq!(errors.len(), 1, "Expected exactly one error, got: {:#?}", errors);
    errors.into_iter().next().expect("one error")
}

/// Assert the AST contains a query with the given name
pub fn assert_has_query<'a>(source: &'a Source, name: &str) -> &'a QueryDef {
    source
        .queries()
        .find(|q| q.name == name)
        .unwrap_or_else(|| panic!("Expected query named: {}", name))
}

/// Assert the AST contains a schema definition with the given name
pub fn assert_has_schema<'a>(source: &'a Source, name: &str) -> &'a SchemaDef {
    source
        .schemas()
        .find(|s| s.name() == name)
        .unwrap_or_else(|| panic!("Expected schema named: {}", name))
}
