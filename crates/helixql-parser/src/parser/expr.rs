//! Expressions, literals and operand classes

use helixql_ast::*;
use helixql_lexer::{unescape_string, TokenKind};

use super::Parser;
use crate::ParseError;

/// Which expressions an argument position accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Operand {
    /// `WHERE`, `AND`, `OR`
    Bool,
    /// `RANGE`
    Number,
    /// `GT`, `GTE`, `LT`, `LTE`
    Comparable,
    /// `EQ`, `NEQ`
    Any,
}

impl Operand {
    fn allows_anonymous(self) -> bool {
        !matches!(self, Operand::Number)
    }

    fn accepts(self, kind: &ExpressionKind) -> bool {
        let traversal_like = matches!(
            kind,
            ExpressionKind::Identifier(_)
                | ExpressionKind::Traversal(_)
                | ExpressionKind::IdTraversal(_)
        );
        let anonymous = matches!(kind, ExpressionKind::AnonymousTraversal(_));
        let number = matches!(
            kind,
            ExpressionKind::Literal(Literal::Int(_) | Literal::Float(_))
        );

        match self {
            Operand::Bool => {
                traversal_like
                    || anonymous
                    || matches!(
                        kind,
                        ExpressionKind::Exists(_)
                            | ExpressionKind::BoolCombinator(_)
                            | ExpressionKind::Literal(Literal::Bool(_))
                    )
            }
            Operand::Number => traversal_like || number,
            Operand::Comparable => traversal_like || number || anonymous,
            Operand::Any => true,
        }
    }

    fn expected(self) -> &'static str {
        match self {
            Operand::Bool => "a boolean expression",
            Operand::Number | Operand::Comparable => "a numeric expression",
            Operand::Any => "an expression",
        }
    }
}

/// Short noun for an expression, used in "found ..." messages
fn describe(kind: &ExpressionKind) -> &'static str {
    match kind {
        ExpressionKind::Traversal(_) => "traversal",
        ExpressionKind::IdTraversal(_) => "id traversal",
        ExpressionKind::AnonymousTraversal(_) => "anonymous traversal",
        ExpressionKind::Literal(Literal::String(_)) => "string literal",
        ExpressionKind::Literal(Literal::Int(_) | Literal::Float(_)) => "number",
        ExpressionKind::Literal(Literal::Bool(_)) => "boolean",
        ExpressionKind::Literal(Literal::None) => "`NONE`",
        ExpressionKind::BoolCombinator(_) => "boolean combinator",
        ExpressionKind::ObjectStep(_) => "object",
        ExpressionKind::Identifier(_) => "identifier",
        ExpressionKind::Create(_) => "creation",
        ExpressionKind::SearchVector(_) => "vector search",
        ExpressionKind::Exists(_) => "`EXISTS`",
    }
}

const EXPRESSION_WORDS: &[&str] = &[
    "N",
    "E",
    "V",
    "AddN",
    "AddE",
    "AddV",
    "BatchAddV",
    "SearchV",
    "EXISTS",
    "NONE",
    "AND",
    "OR",
];

impl<'a> Parser<'a> {
    /// True if the current token can begin an expression
    pub(super) fn at_expression_start(&self) -> bool {
        match self.peek() {
            TokenKind::StringLiteral
            | TokenKind::Integer
            | TokenKind::Float
            | TokenKind::LBrace
            | TokenKind::IdentifierLower => true,
            TokenKind::IdentifierUpper => {
                EXPRESSION_WORDS.contains(&self.current().text) && !self.at_definition_start()
            }
            _ => false,
        }
    }

    /// Any expression except a bare anonymous traversal
    pub(super) fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        self.parse_value(false)
    }

    /// An argument checked against its operand class
    pub(super) fn parse_operand(&mut self, class: Operand) -> Result<Expression, ParseError> {
        if !self.at_expression_start() && !(class.allows_anonymous() && self.at(TokenKind::Underscore))
        {
            return Err(self.unexpected(class.expected()));
        }
        let expr = self.parse_value(class.allows_anonymous())?;
        if class.accepts(&expr.kind) {
            Ok(expr)
        } else {
            Err(ParseError::UnexpectedToken {
                expected: class.expected().to_string(),
                found: describe(&expr.kind).to_string(),
                span: expr.span,
            })
        }
    }

    /// Parse one expression. `_` traversals are accepted only where
    /// `anonymous` allows them (field values and step arguments).
    pub(super) fn parse_value(&mut self, anonymous: bool) -> Result<Expression, ParseError> {
        self.nested(|p| {
            let start = p.span();
            let kind = p.parse_expression_kind(anonymous)?;
            Ok(Expression {
                kind,
                span: p.span_from(start),
            })
        })
    }

    fn parse_expression_kind(&mut self, anonymous: bool) -> Result<ExpressionKind, ParseError> {
        let token = self.current();
        match token.kind {
            TokenKind::StringLiteral | TokenKind::Integer | TokenKind::Float => {
                Ok(ExpressionKind::Literal(self.parse_literal()?))
            }
            TokenKind::LBrace => Ok(ExpressionKind::ObjectStep(self.parse_object_step()?)),
            TokenKind::Underscore if anonymous => Ok(ExpressionKind::AnonymousTraversal(
                self.parse_anonymous_traversal()?,
            )),
            TokenKind::IdentifierLower => {
                if token.text == "true" || token.text == "false" {
                    Ok(ExpressionKind::Literal(self.parse_literal()?))
                } else if self.chain_entry_at(1).is_some() {
                    Ok(ExpressionKind::IdTraversal(self.parse_id_traversal()?))
                } else {
                    self.advance();
                    Ok(ExpressionKind::Identifier(token.text.to_string()))
                }
            }
            TokenKind::IdentifierUpper if !self.at_definition_start() => match token.text {
                "N" | "E" | "V" => Ok(ExpressionKind::Traversal(self.parse_traversal()?)),
                "AddN" | "AddE" | "AddV" | "BatchAddV" => {
                    Ok(ExpressionKind::Create(Box::new(self.parse_creation()?)))
                }
                "SearchV" => Ok(ExpressionKind::SearchVector(self.parse_search_vector()?)),
                "EXISTS" => self.parse_exists(),
                "NONE" => Ok(ExpressionKind::Literal(self.parse_literal()?)),
                "AND" | "OR" => self.parse_bool_combinator(),
                _ => Err(self.unexpected("an expression")),
            },
            _ => Err(self.unexpected("an expression")),
        }
    }

    /// String, integer, float, `true`/`false` or `NONE`
    pub(super) fn parse_literal(&mut self) -> Result<Literal, ParseError> {
        let token = self.current();
        let literal = match token.kind {
            TokenKind::Integer => return Ok(Literal::Int(self.parse_integer()?)),
            TokenKind::Float => return Ok(Literal::Float(self.parse_float()?)),
            TokenKind::StringLiteral => Literal::String(unescape_string(token.text)),
            _ if token.is_word("true") => Literal::Bool(true),
            _ if token.is_word("false") => Literal::Bool(false),
            _ if token.is_word("NONE") => Literal::None,
            _ => return Err(self.unexpected("a literal")),
        };
        self.advance();
        Ok(literal)
    }

    /// Consume an `Integer` token as `i64`
    pub(super) fn parse_integer(&mut self) -> Result<i64, ParseError> {
        let token = self.consume(TokenKind::Integer)?;
        token.text.parse().map_err(|_| ParseError::MalformedNumber {
            text: token.text.to_string(),
            span: token.span,
        })
    }

    /// Consume a `Float` or `Integer` token as `f64`
    pub(super) fn parse_float(&mut self) -> Result<f64, ParseError> {
        let token = self.current();
        if !matches!(token.kind, TokenKind::Float | TokenKind::Integer) {
            return Err(self.unexpected("a number"));
        }
        self.advance();
        token.text.parse().map_err(|_| ParseError::MalformedNumber {
            text: token.text.to_string(),
            span: token.span,
        })
    }

    /// `AND(a, b, ...)` / `OR(a, b, ...)`
    fn parse_bool_combinator(&mut self) -> Result<ExpressionKind, ParseError> {
        let op = if self.advance().text == "AND" {
            BoolOp::And
        } else {
            BoolOp::Or
        };
        self.consume(TokenKind::LParen)?;
        let mut operands = vec![self.parse_operand(Operand::Bool)?];
        while self.at(TokenKind::Comma) {
            self.advance();
            operands.push(self.parse_operand(Operand::Bool)?);
        }
        self.consume(TokenKind::RParen)?;
        Ok(ExpressionKind::BoolCombinator(BoolCombinator { op, operands }))
    }

    /// `EXISTS(traversal)`
    fn parse_exists(&mut self) -> Result<ExpressionKind, ParseError> {
        self.expect_word("EXISTS")?;
        self.consume(TokenKind::LParen)?;
        let inner = self.parse_value(true)?;
        if !matches!(
            inner.kind,
            ExpressionKind::Traversal(_)
                | ExpressionKind::IdTraversal(_)
                | ExpressionKind::AnonymousTraversal(_)
        ) {
            return Err(ParseError::UnexpectedToken {
                expected: "a traversal".to_string(),
                found: describe(&inner.kind).to_string(),
                span: inner.span,
            });
        }
        self.consume(TokenKind::RParen)?;
        Ok(ExpressionKind::Exists(Box::new(inner)))
    }

    /// `SearchV<Doc>(vec, 10)`
    fn parse_search_vector(&mut self) -> Result<SearchVector, ParseError> {
        self.expect_word("SearchV")?;
        let vector_type = self.parse_single_type_arg()?;
        self.consume(TokenKind::LParen)?;
        let data = self.parse_vector_data()?;
        self.consume(TokenKind::Comma)?;
        let limit = match self.peek() {
            TokenKind::Integer => SearchLimit::Integer(self.parse_integer()?),
            TokenKind::IdentifierLower => SearchLimit::Identifier(self.advance().text.to_string()),
            _ => return Err(self.unexpected("a result limit (integer or identifier)")),
        };
        self.consume(TokenKind::RParen)?;
        Ok(SearchVector {
            vector_type,
            data,
            limit,
        })
    }

    /// A lower-initial identifier or `[0.1, 0.2, ...]`
    pub(super) fn parse_vector_data(&mut self) -> Result<VectorData, ParseError> {
        match self.peek() {
            TokenKind::IdentifierLower => {
                Ok(VectorData::Identifier(self.advance().text.to_string()))
            }
            TokenKind::LBracket => {
                self.advance();
                let mut values = vec![self.parse_float()?];
                while self.at(TokenKind::Comma) {
                    self.advance();
                    values.push(self.parse_float()?);
                }
                self.consume(TokenKind::RBracket)?;
                Ok(VectorData::Literal(values))
            }
            _ => Err(self.unexpected("vector data (identifier or `[...]`)")),
        }
    }
}
