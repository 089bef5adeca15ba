//! Lexer error types

use helixql_ast::{Diagnostic, DiagnosticKind, Span};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("invalid character `{character}`")]
    InvalidCharacter { character: String, span: Span },

    #[error("unterminated string literal")]
    UnterminatedString { span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::InvalidCharacter { span, .. } => *span,
            LexError::UnterminatedString { span } => *span,
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        match self {
            LexError::InvalidCharacter { .. } => DiagnosticKind::InvalidCharacter,
            LexError::UnterminatedString { .. } => DiagnosticKind::UnterminatedString,
        }
    }
}

impl From<LexError> for Diagnostic {
    fn from(error: LexError) -> Self {
        Diagnostic::error(error.kind(), error.to_string(), error.span())
    }
}
