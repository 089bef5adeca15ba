//! Token definitions for HelixQL
//!
//! Bare words such as `QUERY`, `RETURN` or `AddN` are not keywords here:
//! they lex as ordinary identifiers and the parser matches them by exact
//! text only where the grammar expects them.

use logos::Logos;

/// Error produced by the token automaton itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexErrorKind {
    #[default]
    InvalidCharacter,
    UnterminatedString,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\n\f]+")] // Skip whitespace
#[logos(skip r"//[^\n]*")] // Skip line comments
pub enum TokenKind {
    // === Multi-character punctuation ===
    #[token("::")]
    ColonColon,
    #[token("<-")]
    LeftArrow,
    #[token("=>")]
    FatArrow,
    #[token("..")]
    DotDot,

    // === Delimiters ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,

    // === Punctuation ===
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("!")]
    Bang,
    #[token("|")]
    Pipe,
    #[token("_")]
    Underscore,

    // === Literals ===
    #[regex(r"[0-9]+", priority = 2)]
    Integer,

    #[regex(r"[0-9]+\.[0-9]+")]
    Float,

    #[token("\"", lex_string)]
    StringLiteral,

    // === Identifiers ===
    /// Schema type names and bare-word terminals
    #[regex(r"[A-Z][A-Za-z0-9_]*")]
    IdentifierUpper,

    /// Variables and field names
    #[regex(r"[a-z][A-Za-z0-9_]*")]
    IdentifierLower,

    // === Special ===
    Eof,
}

/// Scan the rest of a string literal after its opening quote.
///
/// Strings may span lines. Without a closing quote the literal is cut at the
/// end of its opening line so lexing can resume on the next one.
fn lex_string(lex: &mut logos::Lexer<TokenKind>) -> Result<(), LexErrorKind> {
    let rest = lex.remainder();
    let mut chars = rest.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => {
                lex.bump(i + 1);
                return Ok(());
            }
            '\\' => {
                chars.next();
            }
            _ => {}
        }
    }

    let line_end = rest.find('\n').unwrap_or(rest.len());
    lex.bump(line_end);
    Err(LexErrorKind::UnterminatedString)
}

impl TokenKind {
    pub fn is_identifier(&self) -> bool {
        matches!(self, TokenKind::IdentifierUpper | TokenKind::IdentifierLower)
    }

    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::ColonColon => "`::`",
            TokenKind::LeftArrow => "`<-`",
            TokenKind::FatArrow => "`=>`",
            TokenKind::DotDot => "`..`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::Lt => "`<`",
            TokenKind::Gt => "`>`",
            TokenKind::Comma => "`,`",
            TokenKind::Colon => "`:`",
            TokenKind::Dot => "`.`",
            TokenKind::Bang => "`!`",
            TokenKind::Pipe => "`|`",
            TokenKind::Underscore => "`_`",
            TokenKind::Integer => "integer",
            TokenKind::Float => "float",
            TokenKind::StringLiteral => "string literal",
            TokenKind::IdentifierUpper => "type name",
            TokenKind::IdentifierLower => "identifier",
            TokenKind::Eof => "end of input",
        }
    }
}
