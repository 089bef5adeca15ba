//! Traversals, steps and last steps

use helixql_ast::*;
use helixql_lexer::TokenKind;

use super::expr::Operand;
use super::Parser;
use crate::ParseError;

/// What follows a `::` inside a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ChainEntry {
    Step,
    Last,
}

impl<'a> Parser<'a> {
    /// Classify the `::` at the current position without consuming it.
    /// `None` means the chain ends here (`::To(..)`, a definition, ...).
    pub(super) fn chain_entry_at(&self, offset: usize) -> Option<ChainEntry> {
        if self.nth(offset).kind != TokenKind::ColonColon {
            return None;
        }
        let next = self.nth(offset + 1);
        match next.kind {
            TokenKind::LBrace | TokenKind::Bang | TokenKind::Pipe | TokenKind::IdentifierLower => {
                Some(ChainEntry::Step)
            }
            TokenKind::IdentifierUpper => match next.text {
                "OutE" | "InE" | "FromN" | "ToN" | "Out" | "In" | "ShortestPath" | "WHERE"
                | "COUNT" | "ID" | "RANGE" | "AddE" => Some(ChainEntry::Step),
                "UPDATE" => Some(ChainEntry::Last),
                text if ComparisonOp::from_keyword(text).is_some() => Some(ChainEntry::Last),
                _ => None,
            },
            _ => None,
        }
    }

    /// `N<User>(id)::Out<Follows>::COUNT`
    pub(super) fn parse_traversal(&mut self) -> Result<Traversal, ParseError> {
        let start = self.parse_start_step()?;
        let (steps, last) = self.parse_chain()?;
        Ok(Traversal { start, steps, last })
    }

    /// `user::name`. The caller has checked that a step follows the base.
    pub(super) fn parse_id_traversal(&mut self) -> Result<IdTraversal, ParseError> {
        let start = self.span();
        let base = self.expect_lower("identifier")?;
        let (steps, last) = self.parse_chain()?;
        Ok(IdTraversal {
            base,
            steps,
            last,
            span: self.span_from(start),
        })
    }

    /// `_`, `_.name`, `_::age::GT(18)`
    pub(super) fn parse_anonymous_traversal(&mut self) -> Result<AnonymousTraversal, ParseError> {
        self.consume(TokenKind::Underscore)?;
        let property = if self.at(TokenKind::Dot) {
            self.advance();
            Some(self.expect_lower("property name")?)
        } else {
            None
        };
        let (steps, last) = self.parse_chain()?;
        Ok(AnonymousTraversal {
            property,
            steps,
            last,
        })
    }

    /// Zero or more steps, then at most one last step
    fn parse_chain(&mut self) -> Result<(Vec<Step>, Option<LastStep>), ParseError> {
        let mut steps = Vec::new();
        loop {
            match self.chain_entry_at(0) {
                Some(ChainEntry::Step) => steps.push(self.parse_step()?),
                Some(ChainEntry::Last) => return Ok((steps, Some(self.parse_last_step()?))),
                None => return Ok((steps, None)),
            }
        }
    }

    // === Start steps ===

    fn parse_start_step(&mut self) -> Result<StartStep, ParseError> {
        let start = self.span();
        let token = self.current();
        let source = StartSource::from_keyword(token.text)
            .filter(|_| token.kind == TokenKind::IdentifierUpper)
            .ok_or_else(|| self.unexpected("`N`, `E` or `V`"))?;
        self.advance();

        let types = if self.at(TokenKind::Lt) {
            self.parse_type_args()?
        } else {
            Vec::new()
        };

        let selector = if self.at(TokenKind::LParen) {
            self.advance();
            let selector = if self.at(TokenKind::LBrace) {
                self.advance();
                let key = self.parse_id_arg()?;
                self.consume(TokenKind::Colon)?;
                let value = self.parse_expression()?;
                self.consume(TokenKind::RBrace)?;
                StartSelector::ByIndex {
                    key,
                    value: Box::new(value),
                }
            } else {
                let mut ids = vec![self.parse_id_arg()?];
                while self.at(TokenKind::Comma) {
                    self.advance();
                    ids.push(self.parse_id_arg()?);
                }
                StartSelector::Ids(ids)
            };
            self.consume(TokenKind::RParen)?;
            Some(selector)
        } else {
            None
        };

        Ok(StartStep {
            source,
            types,
            selector,
            span: self.span_from(start),
        })
    }

    /// `<User, Admin>`
    pub(super) fn parse_type_args(&mut self) -> Result<Vec<String>, ParseError> {
        self.consume(TokenKind::Lt)?;
        let mut types = vec![self.expect_upper("type name")?];
        while self.at(TokenKind::Comma) {
            self.advance();
            types.push(self.expect_upper("type name")?);
        }
        self.consume(TokenKind::Gt)?;
        Ok(types)
    }

    /// `<User>`, exactly one type
    pub(super) fn parse_single_type_arg(&mut self) -> Result<String, ParseError> {
        self.consume(TokenKind::Lt)?;
        let name = self.expect_upper("type name")?;
        self.consume(TokenKind::Gt)?;
        Ok(name)
    }

    pub(super) fn parse_id_arg(&mut self) -> Result<IdArg, ParseError> {
        match self.peek() {
            TokenKind::StringLiteral => {
                let text = self.advance().text;
                Ok(IdArg::String(helixql_lexer::unescape_string(text)))
            }
            TokenKind::IdentifierLower if self.chain_entry_at(1).is_some() => {
                Ok(IdArg::Traversal(Box::new(self.parse_id_traversal()?)))
            }
            TokenKind::IdentifierLower => Ok(IdArg::Identifier(self.advance().text.to_string())),
            _ => Err(self.unexpected("an id (identifier, string or id traversal)")),
        }
    }

    /// `::To(a)::From(b)`, in either order, each at most once
    pub(super) fn parse_endpoints(&mut self) -> Result<Endpoints, ParseError> {
        let mut endpoints = Endpoints::default();

        while self.at(TokenKind::ColonColon)
            && (self.nth(1).is_word("To") || self.nth(1).is_word("From"))
        {
            self.advance();
            let keyword = self.advance();
            self.consume(TokenKind::LParen)?;
            let arg = self.parse_id_arg()?;
            self.consume(TokenKind::RParen)?;

            let slot = if keyword.text == "To" {
                &mut endpoints.to
            } else {
                &mut endpoints.from
            };
            if slot.is_some() {
                return Err(ParseError::DuplicateClause {
                    keyword: keyword.text.to_string(),
                    span: keyword.span,
                });
            }
            *slot = Some(arg);
        }

        if endpoints.from.is_none() && endpoints.to.is_none() {
            return Err(self.unexpected("`::From(..)` or `::To(..)`"));
        }
        Ok(endpoints)
    }

    // === Steps ===

    fn parse_step(&mut self) -> Result<Step, ParseError> {
        self.consume(TokenKind::ColonColon)?;
        let start = self.span();
        let token = self.current();

        let kind = match token.kind {
            TokenKind::LBrace => StepKind::Object(self.parse_object_step()?),
            TokenKind::Bang => StepKind::Exclude(self.parse_exclude()?),
            TokenKind::Pipe => {
                self.advance();
                let param = self.expect_lower("closure parameter")?;
                self.consume(TokenKind::Pipe)?;
                let object = self.parse_object_step()?;
                StepKind::Closure { param, object }
            }
            TokenKind::IdentifierLower => StepKind::Field(self.advance().text.to_string()),
            _ => match token.text {
                "OutE" | "InE" | "Out" | "In" => {
                    self.advance();
                    let types = if self.at(TokenKind::Lt) {
                        self.parse_type_args()?
                    } else {
                        Vec::new()
                    };
                    StepKind::Graph(match token.text {
                        "OutE" => GraphStep::OutE(types),
                        "InE" => GraphStep::InE(types),
                        "Out" => GraphStep::Out(types),
                        _ => GraphStep::In(types),
                    })
                }
                "FromN" => {
                    self.advance();
                    StepKind::Graph(GraphStep::FromN)
                }
                "ToN" => {
                    self.advance();
                    StepKind::Graph(GraphStep::ToN)
                }
                "ShortestPath" => {
                    self.advance();
                    let types = if self.at(TokenKind::Lt) {
                        self.parse_type_args()?
                    } else {
                        Vec::new()
                    };
                    let endpoints = self.parse_endpoints()?;
                    StepKind::Graph(GraphStep::ShortestPath { types, endpoints })
                }
                "WHERE" => {
                    self.advance();
                    self.consume(TokenKind::LParen)?;
                    let cond = self.parse_operand(Operand::Bool)?;
                    self.consume(TokenKind::RParen)?;
                    StepKind::Where(Box::new(cond))
                }
                "COUNT" => {
                    self.advance();
                    StepKind::Count
                }
                "ID" => {
                    self.advance();
                    StepKind::Id
                }
                "RANGE" => {
                    self.advance();
                    self.consume(TokenKind::LParen)?;
                    let start = self.parse_operand(Operand::Number)?;
                    self.consume(TokenKind::Comma)?;
                    let end = self.parse_operand(Operand::Number)?;
                    self.consume(TokenKind::RParen)?;
                    StepKind::Range {
                        start: Box::new(start),
                        end: Box::new(end),
                    }
                }
                "AddE" => StepKind::AddE(self.parse_add_edge()?),
                _ => return Err(self.unexpected("a step")),
            },
        };

        Ok(Step {
            kind,
            span: self.span_from(start),
        })
    }

    /// `!{ password, secret, .. }`
    fn parse_exclude(&mut self) -> Result<ExcludeField, ParseError> {
        self.consume(TokenKind::Bang)?;
        self.consume(TokenKind::LBrace)?;
        let mut fields = vec![self.expect_lower("field name")?];
        let mut spread = false;
        while self.at(TokenKind::Comma) {
            self.advance();
            if self.at(TokenKind::DotDot) {
                self.advance();
                if self.at(TokenKind::Comma) {
                    self.advance();
                }
                spread = true;
                break;
            }
            fields.push(self.expect_lower("field name")?);
        }
        self.consume(TokenKind::RBrace)?;
        Ok(ExcludeField { fields, spread })
    }

    // === Last steps ===

    fn parse_last_step(&mut self) -> Result<LastStep, ParseError> {
        self.consume(TokenKind::ColonColon)?;
        let start = self.span();
        let token = self.advance();

        let kind = if token.text == "UPDATE" {
            self.consume(TokenKind::LParen)?;
            let fields = self.parse_update_fields()?;
            self.consume(TokenKind::RParen)?;
            LastStepKind::Update { fields }
        } else {
            let op = ComparisonOp::from_keyword(token.text)
                .ok_or_else(|| ParseError::unexpected("a comparison or `UPDATE`", &token))?;
            let class = if op.is_ordering() {
                Operand::Comparable
            } else {
                Operand::Any
            };
            self.consume(TokenKind::LParen)?;
            let operand = self.parse_operand(class)?;
            self.consume(TokenKind::RParen)?;
            LastStepKind::BoolOp {
                op,
                operand: Box::new(operand),
            }
        };

        Ok(LastStep {
            kind,
            span: self.span_from(start),
        })
    }
}
