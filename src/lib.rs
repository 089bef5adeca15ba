//! HelixQL - Schema and query language front-end for a property graph
//!
//! This is the root workspace crate that provides integration tests.
//! The actual implementation is in the workspace member crates.

// Re-export main crates for convenience
pub use helixql_ast as ast;
pub use helixql_lexer as lexer;
pub use helixql_parser as parser;

pub use helixql_parser::{parse, parse_with_config, ParseResult, ParserConfig};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports() {
        let result = parse("N::User");
        assert!(!result.has_errors());
        assert_eq!(result.ast.definitions[0].name(), "User");

        let (tokens, _) = lexer::tokenize("N::User");
        assert_eq!(tokens.last().map(|t| t.kind), Some(lexer::TokenKind::Eof));
    }
}
