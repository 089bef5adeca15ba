//! Parser error types

use helixql_ast::{Diagnostic, DiagnosticKind, Span};
use helixql_lexer::{Token, TokenKind};
use thiserror::Error;

/// An error that aborts the current top-level definition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("expected {expected}, found end of input")]
    UnexpectedEof { expected: String, span: Span },

    #[error("malformed numeric literal `{text}`")]
    MalformedNumber { text: String, span: Span },

    #[error("`{keyword}` given more than once")]
    DuplicateClause { keyword: String, span: Span },

    #[error("edge `{edge}` is missing `{endpoint}`")]
    MissingEndpoint {
        edge: String,
        endpoint: &'static str,
        span: Span,
    },

    #[error("query `{query}` must end with `RETURN`, found {found}")]
    MissingReturn {
        query: String,
        found: String,
        span: Span,
    },

    #[error("nesting exceeds the maximum depth of {limit}")]
    NestingTooDeep { limit: usize, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. } => *span,
            ParseError::UnexpectedEof { span, .. } => *span,
            ParseError::MalformedNumber { span, .. } => *span,
            ParseError::DuplicateClause { span, .. } => *span,
            ParseError::MissingEndpoint { span, .. } => *span,
            ParseError::MissingReturn { span, .. } => *span,
            ParseError::NestingTooDeep { span, .. } => *span,
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        match self {
            ParseError::UnexpectedToken { .. } => DiagnosticKind::UnexpectedToken,
            ParseError::UnexpectedEof { .. } => DiagnosticKind::UnexpectedEof,
            ParseError::MalformedNumber { .. } => DiagnosticKind::MalformedNumber,
            ParseError::DuplicateClause { .. } => DiagnosticKind::DuplicateClause,
            ParseError::MissingEndpoint { .. } => DiagnosticKind::MissingEndpoint,
            ParseError::MissingReturn { .. } => DiagnosticKind::MissingReturn,
            ParseError::NestingTooDeep { .. } => DiagnosticKind::NestingTooDeep,
        }
    }

    pub fn unexpected(expected: impl Into<String>, found: &Token<'_>) -> Self {
        if found.kind == TokenKind::Eof {
            ParseError::UnexpectedEof {
                expected: expected.into(),
                span: found.span,
            }
        } else {
            ParseError::UnexpectedToken {
                expected: expected.into(),
                found: found.describe(),
                span: found.span,
            }
        }
    }
}

impl From<ParseError> for Diagnostic {
    fn from(error: ParseError) -> Self {
        Diagnostic::error(error.kind(), error.to_string(), error.span())
    }
}
