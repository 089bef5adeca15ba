//! HelixQL AST - Core types for the abstract syntax tree
//!
//! This crate defines the schema, query, expression and step node types,
//! spans for source locations, the diagnostics shared by the lexer and the
//! parser, and a visitor for downstream consumers.

mod span;
mod diagnostic;
mod types;
mod schema;
mod query;
mod create;
mod expr;
pub mod visit;

pub use span::*;
pub use diagnostic::*;
pub use types::*;
pub use schema::*;
pub use query::*;
pub use create::*;
pub use expr::*;

use serde::{Deserialize, Serialize};

/// A parsed HelixQL file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Source {
    pub definitions: Vec<Definition>,
    pub span: Span,
}

impl Source {
    pub fn schemas(&self) -> impl Iterator<Item = &SchemaDef> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::Schema(schema) => Some(schema),
            Definition::Query(_) => None,
        })
    }

    pub fn queries(&self) -> impl Iterator<Item = &QueryDef> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::Query(query) => Some(query),
            Definition::Schema(_) => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// A top-level definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Definition {
    Schema(SchemaDef),
    Query(QueryDef),
}

impl Definition {
    pub fn name(&self) -> &str {
        match self {
            Definition::Schema(schema) => schema.name(),
            Definition::Query(query) => &query.name,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Definition::Schema(schema) => schema.span(),
            Definition::Query(query) => query.span,
        }
    }
}
