//! Recursive descent parser implementation
//!
//! Errors are propagated with `?` up to the enclosing top-level definition,
//! turned into a diagnostic there, and the parser skips ahead to the next
//! token that can start a definition.

mod expr;
mod object;
mod query;
mod schema;
mod traversal;

use helixql_ast::*;
use helixql_lexer::{Token, TokenKind};
use tracing::{debug, trace};

use crate::{ParseError, ParserConfig};

/// Stack headroom kept free before recursing; see [`Parser::nested`]
const RED_ZONE: usize = 64 * 1024;
/// Size of each heap-allocated stack segment
const STACK_SEGMENT: usize = 1024 * 1024;

/// Step and last-step keywords. `N::Out` is a traversal, `N::User` a definition.
const STEP_KEYWORDS: &[&str] = &[
    "OutE",
    "InE",
    "FromN",
    "ToN",
    "Out",
    "In",
    "ShortestPath",
    "WHERE",
    "COUNT",
    "ID",
    "RANGE",
    "AddE",
    "UPDATE",
    "GT",
    "GTE",
    "LT",
    "LTE",
    "EQ",
    "NEQ",
];

pub struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    prev_span: Span,
    config: ParserConfig,
    depth: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    /// Create a parser over a token stream. An `Eof` token is appended if the
    /// stream does not already end with one.
    pub fn new(source: &'a str, mut tokens: Vec<Token<'a>>, config: ParserConfig) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            tokens.push(Token::eof(source));
        }
        Self {
            tokens,
            pos: 0,
            prev_span: Span::dummy(),
            config,
            depth: 0,
            diagnostics: Vec::new(),
        }
    }

    // === Utilities ===

    fn current(&self) -> Token<'a> {
        self.nth(0)
    }

    /// Token `n` positions ahead, saturating at `Eof`
    fn nth(&self, n: usize) -> Token<'a> {
        let last = self.tokens.len() - 1;
        self.tokens[(self.pos + n).min(last)]
    }

    fn peek(&self) -> TokenKind {
        self.current().kind
    }

    fn advance(&mut self) -> Token<'a> {
        let token = self.current();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        self.prev_span = token.span;
        token
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == kind
    }

    fn at_word(&self, word: &str) -> bool {
        self.current().is_word(word)
    }

    fn consume(&mut self, kind: TokenKind) -> Result<Token<'a>, ParseError> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    fn expect_word(&mut self, word: &str) -> Result<Token<'a>, ParseError> {
        if self.at_word(word) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(format!("`{word}`")))
        }
    }

    /// Consume a lower-initial identifier (variable or field name)
    fn expect_lower(&mut self, what: &str) -> Result<String, ParseError> {
        if self.at(TokenKind::IdentifierLower) {
            Ok(self.advance().text.to_string())
        } else {
            Err(self.unexpected(format!("{what} (lowercase identifier)")))
        }
    }

    /// Consume an upper-initial identifier (schema type name). The start of
    /// the next definition is never taken as a name.
    fn expect_upper(&mut self, what: &str) -> Result<String, ParseError> {
        if self.at(TokenKind::IdentifierUpper) && !self.at_definition_start() {
            Ok(self.advance().text.to_string())
        } else {
            Err(self.unexpected(format!("{what} (uppercase identifier)")))
        }
    }

    fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        ParseError::unexpected(expected, &self.current())
    }

    fn span(&self) -> Span {
        self.current().span
    }

    /// Span from `start` through the last consumed token
    fn span_from(&self, start: Span) -> Span {
        start.merge(self.prev_span)
    }

    fn warn(&mut self, kind: DiagnosticKind, message: String, span: Span) {
        self.diagnostics.push(Diagnostic::warning(kind, message, span));
    }

    /// Run `f` one nesting level deeper.
    ///
    /// Fails with `NestingTooDeep` once the configured depth is exceeded. The
    /// stack is grown on the heap when headroom runs low, so the depth limit
    /// rather than the thread's stack size bounds recursion.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.config.max_nesting_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.config.max_nesting_depth,
                span: self.span(),
            });
        }
        self.depth += 1;
        let result = stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, || f(self));
        self.depth -= 1;
        result
    }

    /// `QUERY`, or `N::`/`E::`/`V::` followed by a schema name
    fn at_definition_start(&self) -> bool {
        let token = self.current();
        if token.is_word("QUERY") {
            return true;
        }
        if token.kind != TokenKind::IdentifierUpper || StartSource::from_keyword(token.text).is_none()
        {
            return false;
        }
        let name = self.nth(2);
        self.nth(1).kind == TokenKind::ColonColon
            && name.kind == TokenKind::IdentifierUpper
            && !STEP_KEYWORDS.contains(&name.text)
    }

    // === Source ===

    pub fn parse_source(mut self) -> (Source, Vec<Diagnostic>) {
        let start = self.span();
        let mut definitions = Vec::new();

        while !self.at(TokenKind::Eof) {
            let def_start = self.pos;
            self.depth = 0;
            match self.parse_definition() {
                Ok(def) => {
                    trace!(name = def.name(), "parsed definition");
                    definitions.push(def);
                }
                Err(error) => {
                    self.diagnostics.push(error.into());
                    self.synchronize(def_start);
                }
            }
        }

        let span = self.span_from(start);
        (Source { definitions, span }, self.diagnostics)
    }

    /// Skip to the next definition start, always moving past the token the
    /// failed definition began at.
    fn synchronize(&mut self, def_start: usize) {
        let from = self.pos;
        if self.pos == def_start {
            self.advance();
        }
        while !self.at(TokenKind::Eof) && !self.at_definition_start() {
            self.advance();
        }
        debug!(
            skipped = self.pos - from,
            offset = self.span().start,
            "resynchronized after parse error"
        );
    }
}
