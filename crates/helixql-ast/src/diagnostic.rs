//! Diagnostics shared by the lexer and the parser
//!
//! Diagnostics are collected, never thrown: every stage returns whatever it
//! managed to build together with the list of problems it found.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Span;

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

/// Broad family a diagnostic belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Bad characters or literals in the raw text
    Lexical,
    /// Token sequence does not match the grammar
    Syntax,
    /// A definition is well-formed token-wise but misses a required part
    Structural,
    /// A parser resource limit was exceeded
    Resource,
}

/// Specific kind of diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    InvalidCharacter,
    UnterminatedString,
    UnexpectedToken,
    UnexpectedEof,
    MalformedNumber,
    /// `To`/`From` supplied twice
    DuplicateClause,
    /// Edge definition without `From` or `To`
    MissingEndpoint,
    /// Query definition without `RETURN`
    MissingReturn,
    NestingTooDeep,
    /// Same field name declared twice in one body
    DuplicateField,
}

impl DiagnosticKind {
    pub fn category(self) -> Category {
        match self {
            DiagnosticKind::InvalidCharacter | DiagnosticKind::UnterminatedString => {
                Category::Lexical
            }
            DiagnosticKind::UnexpectedToken
            | DiagnosticKind::UnexpectedEof
            | DiagnosticKind::MalformedNumber
            | DiagnosticKind::DuplicateClause => Category::Syntax,
            DiagnosticKind::MissingEndpoint
            | DiagnosticKind::MissingReturn
            | DiagnosticKind::DuplicateField => Category::Structural,
            DiagnosticKind::NestingTooDeep => Category::Resource,
        }
    }

    /// Stable short code, e.g. `E-SYNTAX-001`
    pub fn code(self) -> &'static str {
        match self {
            DiagnosticKind::InvalidCharacter => "E-LEX-001",
            DiagnosticKind::UnterminatedString => "E-LEX-002",
            DiagnosticKind::UnexpectedToken => "E-SYNTAX-001",
            DiagnosticKind::UnexpectedEof => "E-SYNTAX-002",
            DiagnosticKind::MalformedNumber => "E-SYNTAX-003",
            DiagnosticKind::DuplicateClause => "E-SYNTAX-004",
            DiagnosticKind::MissingEndpoint => "E-STRUCT-001",
            DiagnosticKind::MissingReturn => "E-STRUCT-002",
            DiagnosticKind::DuplicateField => "W-STRUCT-001",
            DiagnosticKind::NestingTooDeep => "E-RESOURCE-001",
        }
    }
}

/// A single reported problem with its source location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    /// Create an error diagnostic
    pub fn error(kind: DiagnosticKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            message: message.into(),
            span,
        }
    }

    /// Create a warning diagnostic
    pub fn warning(kind: DiagnosticKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            message: message.into(),
            span,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(
            f,
            "{}[{}]: {} at {}..{}",
            level,
            self.kind.code(),
            self.message,
            self.span.start,
            self.span.end
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(DiagnosticKind::InvalidCharacter.category(), Category::Lexical);
        assert_eq!(DiagnosticKind::UnexpectedEof.category(), Category::Syntax);
        assert_eq!(DiagnosticKind::MissingReturn.category(), Category::Structural);
        assert_eq!(DiagnosticKind::NestingTooDeep.category(), Category::Resource);
    }

    #[test]
    fn test_display() {
        let diag = Diagnostic::error(
            DiagnosticKind::UnexpectedToken,
            "expected `{`, found `}`",
            Span::new(3, 4),
        );
        assert_eq!(
            diag.to_string(),
            "error[E-SYNTAX-001]: expected `{`, found `}` at 3..4"
        );
        assert!(diag.is_error());
    }
}
