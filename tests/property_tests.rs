use helixql::ast::*;
use helixql::{parse, parse_with_config, ParserConfig};
use proptest::prelude::*;

const STEP_WORDS: &[&str] = &[
    "OutE", "InE", "FromN", "ToN", "Out", "In", "ShortestPath", "WHERE", "COUNT", "ID", "RANGE",
    "AddE", "UPDATE", "GT", "GTE", "LT", "LTE", "EQ", "NEQ",
];

fn type_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Z][a-z]{2,8}")
        .unwrap()
        .prop_filter("step keywords cannot name a schema", |name| {
            !STEP_WORDS.contains(&name.as_str())
        })
}

fn var_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_]{0,8}")
        .unwrap()
        .prop_filter("boolean literals are not names", |name| {
            name != "true" && name != "false"
        })
}

fn valid_definition() -> impl Strategy<Value = (String, String)> {
    prop_oneof![
        (type_name(), var_name()).prop_map(|(name, field)| {
            (format!("N::{name} {{ {field}: String }}"), name)
        }),
        type_name().prop_map(|name| (format!("E::{name} {{ From: A, To: B }}"), name)),
        type_name().prop_map(|name| (format!("V::{name}"), name)),
        var_name().prop_map(|name| (format!("QUERY {name}(id: ID) => RETURN NONE"), name)),
    ]
}

/// Each of these breaks exactly one definition
fn broken_definition() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "N::Broken { name: }",
        "N::Broken { name: String",
        "N::Broken { Name: String }",
        "E::Broken { From: User }",
        "E::Broken { From: User, From: User, To: User }",
        "QUERY broken() => RETURN",
        "QUERY broken( => RETURN x",
        "QUERY broken() => x <- N<User>",
        "QUERY broken() => RETURN user::age::GT(\"old\")",
        "garbage <- here",
        "}",
        // cut off right before the next definition
        "N::Broken { name:",
        "E::Broken { From:",
        "QUERY broken(x:",
        "QUERY broken() => x <- N<",
    ])
}

fn fragment() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "N", "E", "V", "::", "QUERY", "RETURN", "User", "name", "{", "}", "(", ")", "<", ">",
        "<-", "=>", ",", ":", "_", ".", "..", "!", "|", "String", "42", "1.5", "\"s\"", "WHERE",
        "AND", "GT", "UPDATE", "From", "To", "FOR", "IN", "DROP", "AddN", "AddE", "#", "\"open",
    ])
}

proptest! {
    #[test]
    fn prop_parse_is_deterministic(parts in prop::collection::vec(fragment(), 0..40)) {
        let source = parts.join(" ");
        let first = parse(&source);
        let second = parse(&source);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_diagnostic_spans_are_in_bounds(parts in prop::collection::vec(fragment(), 0..40)) {
        let source = parts.join(" ");
        let result = parse(&source);
        for diagnostic in &result.diagnostics {
            prop_assert!(diagnostic.span.start <= diagnostic.span.end);
            prop_assert!(diagnostic.span.end <= source.len());
        }
    }

    #[test]
    fn prop_resync_keeps_both_neighbours(
        (before, before_name) in valid_definition(),
        broken in broken_definition(),
        (after, after_name) in valid_definition(),
    ) {
        let source = format!("{before}\n{broken}\n{after}\n");
        let result = parse(&source);

        prop_assert_eq!(result.errors().count(), 1, "{:?}", result.diagnostics);
        let names: Vec<_> = result.ast.definitions.iter().map(Definition::name).collect();
        prop_assert_eq!(names, vec![before_name.as_str(), after_name.as_str()]);
    }

    #[test]
    fn prop_lowercase_never_names_a_type(name in var_name()) {
        for source in [
            format!("N::User {{ field: {name} }}"),
            format!("N::{name}"),
            format!("QUERY q() => RETURN N<{name}>"),
        ] {
            let result = parse(&source);
            prop_assert!(result.has_errors(), "{}", source);
            prop_assert!(result.ast.is_empty());
        }
    }

    #[test]
    fn prop_uppercase_never_names_a_field(name in type_name()) {
        for source in [
            format!("N::User {{ {name}: String }}"),
            format!("QUERY q({name}: String) => RETURN NONE"),
            format!("QUERY q() => RETURN {{ {name} }}"),
        ] {
            let result = parse(&source);
            prop_assert!(result.has_errors(), "{}", source);
            prop_assert!(result.ast.is_empty());
        }
    }

    #[test]
    fn prop_nesting_limit_is_reported(limit in 4usize..48, extra in 1usize..64) {
        let mut expr = String::from("flag");
        for _ in 0..(limit + extra) {
            expr = format!("_::WHERE({expr})");
        }
        let source = format!("QUERY q() => RETURN N<User>::WHERE({expr})");
        let config = ParserConfig::default().with_max_nesting_depth(limit);

        let result = parse_with_config(&source, &config);
        prop_assert_eq!(result.diagnostics.len(), 1);
        prop_assert_eq!(result.diagnostics[0].kind, DiagnosticKind::NestingTooDeep);
        prop_assert!(result.ast.is_empty());
    }
}
