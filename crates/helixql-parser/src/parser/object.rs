//! Brace-delimited object literals
//!
//! Creation arguments, projections and `UPDATE` bodies share the
//! `{ key: value, ... }` shape but differ in what they allow. One routine
//! parses all three, tagged with the context it is called from.

use std::collections::HashSet;

use helixql_ast::*;
use helixql_lexer::TokenKind;

use super::Parser;
use crate::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ObjectContext {
    /// `AddN<User>({ name: n, address: { city: c } })`
    Creation,
    /// `::{ name, age: _::age, .. }`
    Projection,
    /// `::UPDATE({ name: n })`
    Update,
}

impl ObjectContext {
    /// Projections allow `..`, `{}` and a trailing comma
    fn is_projection(self) -> bool {
        self == ObjectContext::Projection
    }
}

struct Entry<V> {
    key: String,
    value: V,
    span: Span,
}

struct ObjectLiteral<V> {
    entries: Vec<Entry<V>>,
    spread: bool,
}

impl<'a> Parser<'a> {
    fn parse_object_literal<V>(
        &mut self,
        context: ObjectContext,
        value: fn(&mut Self) -> Result<V, ParseError>,
    ) -> Result<ObjectLiteral<V>, ParseError> {
        self.nested(|p| {
            p.consume(TokenKind::LBrace)?;
            let mut entries = Vec::new();
            let mut seen = HashSet::new();
            let mut spread = false;

            loop {
                if context.is_projection() {
                    if p.at(TokenKind::DotDot) {
                        p.advance();
                        if p.at(TokenKind::Comma) {
                            p.advance();
                        }
                        spread = true;
                        break;
                    }
                    if p.at(TokenKind::RBrace) {
                        break;
                    }
                }

                let entry = p.parse_object_entry(value)?;
                if !seen.insert(entry.key.clone()) {
                    p.warn(
                        DiagnosticKind::DuplicateField,
                        format!("field `{}` is given more than once", entry.key),
                        entry.span,
                    );
                }
                entries.push(entry);

                if p.at(TokenKind::Comma) {
                    p.advance();
                } else {
                    break;
                }
            }

            p.consume(TokenKind::RBrace)?;
            Ok(ObjectLiteral { entries, spread })
        })
    }

    /// `key` followed by whatever `value` parses, starting at the `:`
    fn parse_object_entry<V>(
        &mut self,
        value: fn(&mut Self) -> Result<V, ParseError>,
    ) -> Result<Entry<V>, ParseError> {
        let start = self.span();
        let key = self.expect_lower("field name")?;
        let value = value(self)?;
        Ok(Entry {
            key,
            value,
            span: self.span_from(start),
        })
    }

    /// `{ name, age: user::age, .. }`
    pub(super) fn parse_object_step(&mut self) -> Result<ObjectStep, ParseError> {
        let start = self.span();
        let object = self.parse_object_literal(ObjectContext::Projection, Self::parse_mapping_value)?;
        let fields = object
            .entries
            .into_iter()
            .map(|entry| MappingField {
                name: entry.key,
                value: entry.value,
                span: entry.span,
            })
            .collect();
        Ok(ObjectStep {
            fields,
            spread: object.spread,
            span: self.span_from(start),
        })
    }

    /// `: value`, or nothing for a shorthand `name`
    fn parse_mapping_value(&mut self) -> Result<Option<Expression>, ParseError> {
        if self.at(TokenKind::Colon) {
            self.advance();
            Ok(Some(self.parse_value(true)?))
        } else {
            Ok(None)
        }
    }

    /// `{ key: value, ... }` of an `AddN`/`AddE`/`AddV`
    pub(super) fn parse_create_fields(&mut self) -> Result<Vec<NewField>, ParseError> {
        let object = self.parse_object_literal(ObjectContext::Creation, Self::parse_field_value)?;
        Ok(object
            .entries
            .into_iter()
            .map(|entry| NewField {
                key: entry.key,
                value: entry.value,
                span: entry.span,
            })
            .collect())
    }

    fn parse_field_value(&mut self) -> Result<FieldValue, ParseError> {
        self.consume(TokenKind::Colon)?;
        if self.at(TokenKind::LBrace) {
            Ok(FieldValue::Object(self.parse_create_fields()?))
        } else {
            Ok(FieldValue::Expr(self.parse_value(true)?))
        }
    }

    /// `{ key: value, ... }` of an `UPDATE`
    pub(super) fn parse_update_fields(&mut self) -> Result<Vec<UpdateField>, ParseError> {
        let object = self.parse_object_literal(ObjectContext::Update, |p| {
            p.consume(TokenKind::Colon)?;
            p.parse_value(true)
        })?;
        Ok(object
            .entries
            .into_iter()
            .map(|entry| UpdateField {
                key: entry.key,
                value: entry.value,
                span: entry.span,
            })
            .collect())
    }
}
