//! HelixQL Lexer - Tokenization using logos
//!
//! Identifiers are split by the case of their first character:
//! - `IdentifierUpper` for schema type names and bare-word terminals
//! - `IdentifierLower` for variables and field names
//!
//! Tokens are produced lazily by [`Lexer`]; lexical problems are recorded as
//! diagnostics and never stop the stream.

mod error;
mod token;

pub use error::*;
pub use token::*;

use std::iter::FusedIterator;

use helixql_ast::{Diagnostic, Span};
use logos::Logos;

/// A token with its source text and span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub span: Span,
}

impl<'src> Token<'src> {
    pub fn eof(source: &'src str) -> Self {
        let end = source.len();
        Token {
            kind: TokenKind::Eof,
            text: "",
            span: Span::new(end, end),
        }
    }

    /// True for an identifier whose text is exactly `word`
    pub fn is_word(&self, word: &str) -> bool {
        self.kind.is_identifier() && self.text == word
    }

    /// Human-readable description used in "found ..." messages
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::StringLiteral => "string literal".to_string(),
            TokenKind::Integer | TokenKind::Float => format!("number `{}`", self.text),
            _ => format!("`{}`", self.text),
        }
    }
}

/// Lazy, single-pass token stream over a source string.
///
/// The stream does not include an `Eof` token; [`tokenize`] appends one.
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenKind>,
    diagnostics: Vec<Diagnostic>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            diagnostics: Vec::new(),
        }
    }

    /// Diagnostics recorded for the tokens yielded so far
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    fn report(&mut self, error: LexError) {
        self.diagnostics.push(error.into());
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let result = self.inner.next()?;
            let range = self.inner.span();
            let span = Span::new(range.start, range.end);
            let text = self.inner.slice();

            match result {
                Ok(kind) => return Some(Token { kind, text, span }),
                Err(LexErrorKind::UnterminatedString) => {
                    // Still hand the parser a literal so it reports nothing further
                    self.report(LexError::UnterminatedString { span });
                    return Some(Token {
                        kind: TokenKind::StringLiteral,
                        text,
                        span,
                    });
                }
                Err(LexErrorKind::InvalidCharacter) => {
                    self.report(LexError::InvalidCharacter {
                        character: text.to_string(),
                        span,
                    });
                }
            }
        }
    }
}

impl FusedIterator for Lexer<'_> {}

/// Tokenize a source string into a vector of tokens ending with `Eof`
pub fn tokenize(source: &str) -> (Vec<Token<'_>>, Vec<Diagnostic>) {
    let mut lexer = Lexer::new(source);
    let mut tokens: Vec<Token<'_>> = lexer.by_ref().collect();
    tokens.push(Token::eof(source));
    (tokens, lexer.into_diagnostics())
}

/// Decode the contents of a string literal token, dropping the quotes and
/// resolving backslash escapes. Tolerates a missing closing quote.
pub fn unescape_string(text: &str) -> String {
    let inner = text.strip_prefix('"').unwrap_or(text);
    let inner = if inner.ends_with('"') && !ends_with_escaped_quote(inner) {
        &inner[..inner.len() - 1]
    } else {
        inner
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Whether the final `"` is preceded by an odd run of backslashes
fn ends_with_escaped_quote(inner: &str) -> bool {
    let body = &inner[..inner.len() - 1];
    body.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}
