//! Query definitions, statements and creations

use helixql_ast::*;
use helixql_lexer::TokenKind;

use super::Parser;
use crate::ParseError;

impl<'a> Parser<'a> {
    /// `QUERY name(params) => statements RETURN expr, ...`
    pub(super) fn parse_query_def(&mut self) -> Result<QueryDef, ParseError> {
        let start = self.span();
        self.expect_word("QUERY")?;
        let name = self.expect_lower("query name")?;

        self.consume(TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.at(TokenKind::RParen) {
            params.push(self.parse_param()?);
            while self.at(TokenKind::Comma) {
                self.advance();
                params.push(self.parse_param()?);
            }
        }
        self.consume(TokenKind::RParen)?;
        self.consume(TokenKind::FatArrow)?;

        let mut body = Vec::new();
        while !self.at_word("RETURN") {
            if self.at(TokenKind::Eof) || self.at_definition_start() {
                return Err(ParseError::MissingReturn {
                    query: name,
                    found: self.current().describe(),
                    span: self.span(),
                });
            }
            body.push(self.parse_statement()?);
        }

        self.advance();
        if !self.at_expression_start() {
            return Err(self.unexpected("an expression after `RETURN`"));
        }
        let mut returns = vec![self.parse_expression()?];
        while self.at(TokenKind::Comma) {
            self.advance();
            returns.push(self.parse_expression()?);
        }

        Ok(QueryDef {
            name,
            params,
            body,
            returns,
            span: self.span_from(start),
        })
    }

    fn parse_param(&mut self) -> Result<Parameter, ParseError> {
        let start = self.span();
        let name = self.expect_lower("parameter name")?;
        self.consume(TokenKind::Colon)?;
        let ty = self.parse_type()?;
        Ok(Parameter {
            name,
            ty,
            span: self.span_from(start),
        })
    }

    // === Statements ===

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let start = self.span();
        let token = self.current();

        let kind = match token.kind {
            TokenKind::IdentifierLower if self.nth(1).kind == TokenKind::LeftArrow => {
                self.advance();
                self.advance();
                let value = self.parse_expression()?;
                StatementKind::Assignment {
                    var: token.text.to_string(),
                    value,
                }
            }
            TokenKind::IdentifierUpper => match token.text {
                "AddN" | "AddE" | "AddV" | "BatchAddV" => {
                    StatementKind::Create(self.parse_creation()?)
                }
                "DROP" => self.parse_drop()?,
                "FOR" => self.parse_for_loop()?,
                _ => return Err(self.unexpected("a statement or `RETURN`")),
            },
            _ => return Err(self.unexpected("a statement or `RETURN`")),
        };

        Ok(Statement {
            kind,
            span: self.span_from(start),
        })
    }

    /// `DROP`, optionally followed by what to drop. A following `x <- ...`
    /// is the next statement, not a target.
    fn parse_drop(&mut self) -> Result<StatementKind, ParseError> {
        self.expect_word("DROP")?;
        let token = self.current();
        let has_target = match token.kind {
            TokenKind::IdentifierLower => self.nth(1).kind != TokenKind::LeftArrow,
            TokenKind::IdentifierUpper => {
                StartSource::from_keyword(token.text).is_some() && !self.at_definition_start()
            }
            _ => false,
        };
        if !has_target {
            return Ok(StatementKind::Drop { target: None });
        }

        let target = self.parse_expression()?;
        match target.kind {
            ExpressionKind::Traversal(_)
            | ExpressionKind::IdTraversal(_)
            | ExpressionKind::Identifier(_) => Ok(StatementKind::Drop {
                target: Some(target),
            }),
            _ => Err(ParseError::UnexpectedToken {
                expected: "a traversal or identifier to drop".to_string(),
                found: token.describe(),
                span: target.span,
            }),
        }
    }

    /// `FOR x IN xs { ... }`, `FOR {a, b} IN xs { ... }`, `FOR x.f IN xs { ... }`
    fn parse_for_loop(&mut self) -> Result<StatementKind, ParseError> {
        self.expect_word("FOR")?;

        let binding = if self.at(TokenKind::LBrace) {
            self.advance();
            let mut names = vec![self.expect_lower("loop variable")?];
            while self.at(TokenKind::Comma) {
                self.advance();
                names.push(self.expect_lower("loop variable")?);
            }
            self.consume(TokenKind::RBrace)?;
            ForArg::Destructure(names)
        } else {
            let object = self.expect_lower("loop variable")?;
            if self.at(TokenKind::Dot) {
                self.advance();
                let field = self.expect_lower("field name")?;
                ForArg::FieldAccess { object, field }
            } else {
                ForArg::Identifier(object)
            }
        };

        self.expect_word("IN")?;
        let iterable = self.expect_lower("iterable")?;
        self.consume(TokenKind::LBrace)?;
        let body = self.nested(|p| {
            let mut body = Vec::new();
            while !p.at(TokenKind::RBrace) && !p.at(TokenKind::Eof) {
                body.push(p.parse_statement()?);
            }
            Ok(body)
        })?;
        self.consume(TokenKind::RBrace)?;

        Ok(StatementKind::ForLoop {
            binding,
            iterable,
            body,
        })
    }

    // === Creations ===

    pub(super) fn parse_creation(&mut self) -> Result<Creation, ParseError> {
        let token = self.current();
        match token.text {
            "AddN" => Ok(Creation::AddN(self.parse_add_node()?)),
            "AddE" => Ok(Creation::AddE(self.parse_add_edge()?)),
            "AddV" => Ok(Creation::AddV(self.parse_add_vector()?)),
            "BatchAddV" => Ok(Creation::BatchAddV(self.parse_batch_add_vector()?)),
            _ => Err(self.unexpected("`AddN`, `AddE`, `AddV` or `BatchAddV`")),
        }
    }

    /// `( { ... }? )?` after a creation's type argument
    fn parse_optional_create_args(&mut self) -> Result<Vec<NewField>, ParseError> {
        if !self.at(TokenKind::LParen) {
            return Ok(Vec::new());
        }
        self.advance();
        let fields = if self.at(TokenKind::LBrace) {
            self.parse_create_fields()?
        } else {
            Vec::new()
        };
        self.consume(TokenKind::RParen)?;
        Ok(fields)
    }

    fn parse_add_node(&mut self) -> Result<AddNode, ParseError> {
        let start = self.span();
        self.expect_word("AddN")?;
        let node_type = self.parse_single_type_arg()?;
        let fields = self.parse_optional_create_args()?;
        Ok(AddNode {
            node_type,
            fields,
            span: self.span_from(start),
        })
    }

    /// `AddE<Follows>({ since: now })::From(a)::To(b)`, also used as a step
    pub(super) fn parse_add_edge(&mut self) -> Result<AddEdge, ParseError> {
        let start = self.span();
        self.expect_word("AddE")?;
        let edge_type = self.parse_single_type_arg()?;
        let fields = self.parse_optional_create_args()?;
        let endpoints = self.parse_endpoints()?;
        Ok(AddEdge {
            edge_type,
            fields,
            endpoints,
            span: self.span_from(start),
        })
    }

    /// `AddV<Doc>(vec, { title: t })`. Repeated `{ ... }` groups are merged.
    fn parse_add_vector(&mut self) -> Result<AddVector, ParseError> {
        let start = self.span();
        self.expect_word("AddV")?;
        let vector_type = self.parse_single_type_arg()?;
        self.consume(TokenKind::LParen)?;
        let data = self.parse_vector_data()?;
        let mut fields = Vec::new();
        while self.at(TokenKind::Comma) {
            self.advance();
            fields.extend(self.parse_create_fields()?);
        }
        self.consume(TokenKind::RParen)?;
        Ok(AddVector {
            vector_type,
            data,
            fields,
            span: self.span_from(start),
        })
    }

    fn parse_batch_add_vector(&mut self) -> Result<BatchAddVector, ParseError> {
        let start = self.span();
        self.expect_word("BatchAddV")?;
        let vector_type = self.parse_single_type_arg()?;
        self.consume(TokenKind::LParen)?;
        let source = self.expect_lower("identifier")?;
        self.consume(TokenKind::RParen)?;
        Ok(BatchAddVector {
            vector_type,
            source,
            span: self.span_from(start),
        })
    }
}
