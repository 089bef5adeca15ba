//! Top-level dispatch, schema definitions and types

use std::collections::HashSet;

use helixql_ast::*;
use helixql_lexer::TokenKind;

use super::Parser;
use crate::ParseError;

impl<'a> Parser<'a> {
    // === Definitions ===

    pub(super) fn parse_definition(&mut self) -> Result<Definition, ParseError> {
        let token = self.current();
        if token.is_word("QUERY") {
            return Ok(Definition::Query(self.parse_query_def()?));
        }

        if token.kind == TokenKind::IdentifierUpper && self.nth(1).kind == TokenKind::ColonColon {
            let schema = match token.text {
                "N" => Some(SchemaDef::Node(self.parse_node_def()?)),
                "E" => Some(SchemaDef::Edge(self.parse_edge_def()?)),
                "V" => Some(SchemaDef::Vector(self.parse_vector_def()?)),
                _ => None,
            };
            if let Some(schema) = schema {
                return Ok(Definition::Schema(schema));
            }
        }

        Err(self.unexpected("a definition (`N::`, `E::`, `V::` or `QUERY`)"))
    }

    fn parse_node_def(&mut self) -> Result<NodeDef, ParseError> {
        let start = self.span();
        self.advance();
        self.consume(TokenKind::ColonColon)?;
        let name = self.expect_upper("node type name")?;
        let fields = if self.at(TokenKind::LBrace) {
            self.parse_field_body()?
        } else {
            Vec::new()
        };

        Ok(NodeDef {
            name,
            fields,
            span: self.span_from(start),
        })
    }

    fn parse_vector_def(&mut self) -> Result<VectorDef, ParseError> {
        let start = self.span();
        self.advance();
        self.consume(TokenKind::ColonColon)?;
        let name = self.expect_upper("vector type name")?;
        let fields = if self.at(TokenKind::LBrace) {
            self.parse_field_body()?
        } else {
            Vec::new()
        };

        Ok(VectorDef {
            name,
            fields,
            span: self.span_from(start),
        })
    }

    /// `E::Name { From: A, To: B, Properties: { ... } }`
    ///
    /// `From` and `To` may come in either order but each exactly once.
    fn parse_edge_def(&mut self) -> Result<EdgeDef, ParseError> {
        let start = self.span();
        self.advance();
        self.consume(TokenKind::ColonColon)?;
        let name = self.expect_upper("edge type name")?;
        self.consume(TokenKind::LBrace)?;

        let mut from = None;
        let mut to = None;
        let mut properties = None;

        while !self.at(TokenKind::RBrace) {
            let clause = self.current();
            if clause.is_word("From") || clause.is_word("To") {
                self.advance();
                self.consume(TokenKind::Colon)?;
                let node = self.expect_upper("node type name")?;
                let slot = if clause.text == "From" { &mut from } else { &mut to };
                if slot.is_some() {
                    return Err(ParseError::DuplicateClause {
                        keyword: clause.text.to_string(),
                        span: clause.span,
                    });
                }
                *slot = Some(node);
            } else if clause.is_word("Properties") && properties.is_none() {
                self.advance();
                self.consume(TokenKind::Colon)?;
                properties = Some(self.parse_field_body()?);
            } else if clause.is_word("Properties") {
                return Err(ParseError::DuplicateClause {
                    keyword: clause.text.to_string(),
                    span: clause.span,
                });
            } else {
                return Err(self.unexpected("`From:`, `To:` or `Properties:`"));
            }

            if self.at(TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        self.consume(TokenKind::RBrace)?;
        let span = self.span_from(start);

        let from = from.ok_or_else(|| ParseError::MissingEndpoint {
            edge: name.clone(),
            endpoint: "From",
            span,
        })?;
        let to = to.ok_or_else(|| ParseError::MissingEndpoint {
            edge: name.clone(),
            endpoint: "To",
            span,
        })?;

        Ok(EdgeDef {
            name,
            from,
            to,
            properties: properties.unwrap_or_default(),
            span,
        })
    }

    // === Fields ===

    /// `{ field_def, field_def, }`
    fn parse_field_body(&mut self) -> Result<Vec<FieldDef>, ParseError> {
        self.nested(|p| {
            p.consume(TokenKind::LBrace)?;
            let mut fields = Vec::new();
            let mut seen = HashSet::new();

            while !p.at(TokenKind::RBrace) {
                let field = p.parse_field_def()?;
                if !seen.insert(field.name.clone()) {
                    p.warn(
                        DiagnosticKind::DuplicateField,
                        format!("field `{}` is declared more than once", field.name),
                        field.span,
                    );
                }
                fields.push(field);

                if p.at(TokenKind::Comma) {
                    p.advance();
                } else {
                    break;
                }
            }
            p.consume(TokenKind::RBrace)?;
            Ok(fields)
        })
    }

    fn parse_field_def(&mut self) -> Result<FieldDef, ParseError> {
        let start = self.span();
        let indexed = self.at_word("INDEX");
        if indexed {
            self.advance();
        }
        let name = self.expect_lower("field name")?;
        self.consume(TokenKind::Colon)?;
        let ty = self.parse_type()?;
        let default = if self.at_word("DEFAULT") {
            self.advance();
            Some(self.parse_default_value()?)
        } else {
            None
        };

        Ok(FieldDef {
            indexed,
            name,
            ty,
            default,
            span: self.span_from(start),
        })
    }

    fn parse_default_value(&mut self) -> Result<DefaultValue, ParseError> {
        if self.at_word("NOW") {
            self.advance();
            return Ok(DefaultValue::Now);
        }
        let literal = match self.peek() {
            TokenKind::StringLiteral | TokenKind::Integer | TokenKind::Float => {
                self.parse_literal()?
            }
            _ if self.at_word("true") || self.at_word("false") || self.at_word("NONE") => {
                self.parse_literal()?
            }
            _ => return Err(self.unexpected("a default value")),
        };
        Ok(DefaultValue::Literal(literal))
    }

    // === Types ===

    pub(super) fn parse_type(&mut self) -> Result<Type, ParseError> {
        match self.peek() {
            TokenKind::LBracket => self.nested(|p| {
                p.advance();
                let inner = p.parse_type()?;
                p.consume(TokenKind::RBracket)?;
                Ok(Type::Array(Box::new(inner)))
            }),
            TokenKind::LBrace => Ok(Type::Object(self.parse_field_body()?)),
            TokenKind::IdentifierUpper if !self.at_definition_start() => {
                let name = self.advance().text;
                Ok(match name {
                    "Date" => Type::Date,
                    "ID" => Type::Id,
                    _ => match PrimitiveType::from_name(name) {
                        Some(primitive) => Type::Named(primitive),
                        None => Type::Reference(name.to_string()),
                    },
                })
            }
            _ => Err(self.unexpected("a type (uppercase identifier, `[` or `{`)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use helixql_ast::*;

    fn schema(source: &str) -> SchemaDef {
        let result = parse(source);
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
        match result.ast.definitions.into_iter().next() {
            Some(Definition::Schema(schema)) => schema,
            other => panic!("expected schema definition, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_node_def() {
        let SchemaDef::Node(node) = schema("N::User { name: String, age: U32 }") else {
            panic!("expected node");
        };
        assert_eq!(node.name, "User");
        assert_eq!(node.fields.len(), 2);
        assert_eq!(node.fields[0].name, "name");
        assert_eq!(node.fields[0].ty, Type::Named(PrimitiveType::String));
        assert_eq!(node.fields[1].ty, Type::Named(PrimitiveType::U32));
        assert!(!node.fields[0].indexed);
    }

    #[test]
    fn test_parse_node_without_body() {
        let SchemaDef::Node(node) = schema("N::Marker") else {
            panic!("expected node");
        };
        assert!(node.fields.is_empty());
    }

    #[test]
    fn test_parse_index_and_defaults() {
        let SchemaDef::Node(node) = schema(
            r#"N::User {
                INDEX name: String DEFAULT "anon",
                created: Date DEFAULT NOW,
                score: F64 DEFAULT 0.5,
                nick: String DEFAULT NONE,
            }"#,
        ) else {
            panic!("expected node");
        };
        assert!(node.fields[0].indexed);
        assert_eq!(
            node.fields[0].default,
            Some(DefaultValue::Literal(Literal::String("anon".into())))
        );
        assert_eq!(node.fields[1].ty, Type::Date);
        assert_eq!(node.fields[1].default, Some(DefaultValue::Now));
        assert_eq!(
            node.fields[2].default,
            Some(DefaultValue::Literal(Literal::Float(0.5)))
        );
        assert_eq!(
            node.fields[3].default,
            Some(DefaultValue::Literal(Literal::None))
        );
    }

    #[test]
    fn test_parse_nested_types() {
        let SchemaDef::Vector(vector) =
            schema("V::Doc { tags: [String], meta: { owner: ID, refs: [[User]] } }")
        else {
            panic!("expected vector");
        };
        assert_eq!(
            vector.fields[0].ty,
            Type::Array(Box::new(Type::Named(PrimitiveType::String)))
        );
        let Type::Object(meta) = &vector.fields[1].ty else {
            panic!("expected object type");
        };
        assert_eq!(meta[0].ty, Type::Id);
        assert_eq!(
            meta[1].ty,
            Type::Array(Box::new(Type::Array(Box::new(Type::Reference(
                "User".into()
            )))))
        );
    }

    #[test]
    fn test_parse_edge_def() {
        let SchemaDef::Edge(edge) = schema("E::Follows { From: User, To: User }") else {
            panic!("expected edge");
        };
        assert_eq!(edge.name, "Follows");
        assert_eq!(edge.from, "User");
        assert_eq!(edge.to, "User");
        assert!(edge.properties.is_empty());
    }

    #[test]
    fn test_parse_edge_with_properties_reversed_order() {
        let SchemaDef::Edge(edge) = schema(
            "E::Rated { To: Movie, From: User, Properties: { stars: U8, at: Date DEFAULT NOW } }",
        ) else {
            panic!("expected edge");
        };
        assert_eq!(edge.from, "User");
        assert_eq!(edge.to, "Movie");
        assert_eq!(edge.properties.len(), 2);
    }

    #[test]
    fn test_edge_missing_to_is_structural() {
        let result = parse("E::Follows { From: User }");
        assert!(result.ast.is_empty());
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].kind, DiagnosticKind::MissingEndpoint);
        assert_eq!(result.diagnostics[0].category(), Category::Structural);
        assert!(result.diagnostics[0].message.contains("`To`"));
    }

    #[test]
    fn test_edge_duplicate_from() {
        let result = parse("E::Follows { From: User, From: User, To: User }");
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].kind, DiagnosticKind::DuplicateClause);
    }

    #[test]
    fn test_edge_requires_brace() {
        let result = parse("E::Follows From: User");
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(
            result.diagnostics[0].message,
            "expected `{`, found `From`"
        );
    }

    #[test]
    fn test_lowercase_type_rejected() {
        let result = parse("N::User { name: string }");
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].kind, DiagnosticKind::UnexpectedToken);
        assert!(result.ast.is_empty());
    }

    #[test]
    fn test_uppercase_field_name_rejected() {
        let result = parse("N::User { Name: String }");
        assert_eq!(result.diagnostics.len(), 1);
        assert!(result.diagnostics[0].message.contains("field name"));
    }

    #[test]
    fn test_lowercase_schema_name_rejected() {
        let result = parse("N::user { name: String }");
        assert_eq!(result.diagnostics.len(), 1);
        assert!(result.ast.is_empty());
    }

    #[test]
    fn test_duplicate_field_warns() {
        let result = parse("N::User { name: String, name: String }");
        assert_eq!(result.ast.definitions.len(), 1);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].severity, Severity::Warning);
        assert!(!result.has_errors());
    }
}
