//! Query definition and statement AST nodes

use serde::{Deserialize, Serialize};

use crate::{Creation, Expression, Span, Type};

/// `QUERY name(params) => body RETURN a, b`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDef {
    pub name: String,
    pub params: Vec<Parameter>,
    pub body: Vec<Statement>,
    /// Never empty
    pub returns: Vec<Expression>,
    pub span: Span,
}

/// A query parameter: `id: ID`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub ty: Type,
    pub span: Span,
}

/// A statement inside a query body or a `FOR` loop body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StatementKind {
    /// `user <- N<User>(id)`
    Assignment { var: String, value: Expression },

    /// A bare creation: `AddN<User>({ name: name })`
    Create(Creation),

    /// `DROP N<User>(id)` or a bare `DROP`
    Drop { target: Option<Expression> },

    /// `FOR { a, b } IN items { ... }`
    ForLoop {
        binding: ForArg,
        iterable: String,
        body: Vec<Statement>,
    },
}

/// Loop variable form of a `FOR` loop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForArg {
    /// `FOR item IN items`
    Identifier(String),
    /// `FOR item.id IN items`
    FieldAccess { object: String, field: String },
    /// `FOR { name, age } IN items`
    Destructure(Vec<String>),
}
