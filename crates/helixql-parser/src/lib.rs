//! HelixQL Parser - Recursive descent parser
//!
//! Parses HelixQL source into a [`Source`] AST plus diagnostics.
//! Key parsing challenges:
//! - Keywords are not reserved: `COUNT` is a step after `::` but `count` is a
//!   field name, so bare words are checked by exact text where expected
//! - `{ ... }` means a creation argument, a projection or an update body
//!   depending on where it appears
//! - A broken definition must not take its well-formed neighbours with it

mod config;
mod error;
mod parser;

pub use config::*;
pub use error::*;
pub use parser::*;

use helixql_ast::{Diagnostic, Source};
use helixql_lexer::tokenize;

/// AST and diagnostics of one parse. The AST holds every definition that
/// parsed cleanly, even when other definitions produced errors.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    pub ast: Source,
    /// Lexer and parser diagnostics, ordered by position
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_error())
    }
}

/// Parse a source string with the default configuration
pub fn parse(source: &str) -> ParseResult {
    parse_with_config(source, &ParserConfig::default())
}

pub fn parse_with_config(source: &str, config: &ParserConfig) -> ParseResult {
    let (tokens, mut diagnostics) = tokenize(source);
    let (ast, parse_diagnostics) = Parser::new(source, tokens, *config).parse_source();
    diagnostics.extend(parse_diagnostics);
    diagnostics.sort_by_key(|d| d.span.start);
    ParseResult { ast, diagnostics }
}
