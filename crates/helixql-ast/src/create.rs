//! Creation AST nodes: `AddN`, `AddE`, `AddV`, `BatchAddV`

use serde::{Deserialize, Serialize};

use crate::{Expression, IdArg, Span};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Creation {
    AddN(AddNode),
    AddE(AddEdge),
    AddV(AddVector),
    BatchAddV(BatchAddVector),
}

impl Creation {
    pub fn span(&self) -> Span {
        match self {
            Creation::AddN(node) => node.span,
            Creation::AddE(edge) => edge.span,
            Creation::AddV(vector) => vector.span,
            Creation::BatchAddV(batch) => batch.span,
        }
    }
}

/// `AddN<User>({ name: "alice" })`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddNode {
    pub node_type: String,
    pub fields: Vec<NewField>,
    pub span: Span,
}

/// `AddE<Follows>::From(a)::To(b)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddEdge {
    pub edge_type: String,
    pub fields: Vec<NewField>,
    pub endpoints: Endpoints,
    pub span: Span,
}

/// `AddV<Doc>(vec, { content: text })`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddVector {
    pub vector_type: String,
    pub data: VectorData,
    /// Entries of every `{ ... }` argument, in source order. Several groups,
    /// as in `AddV<Doc>(vec, { a: x }, { b: y })`, are merged into one list.
    pub fields: Vec<NewField>,
    pub span: Span,
}

/// `BatchAddV<Doc>(vectors)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchAddVector {
    pub vector_type: String,
    pub source: String,
    pub span: Span,
}

/// The `::To(..)` / `::From(..)` pair of an edge creation or shortest path.
/// At least one side is present.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Endpoints {
    pub from: Option<IdArg>,
    pub to: Option<IdArg>,
}

/// Vector payload: a variable or an inline `[0.1, 0.2]` literal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VectorData {
    Identifier(String),
    Literal(Vec<f64>),
}

/// One `key: value` entry of a creation argument list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewField {
    pub key: String,
    pub value: FieldValue,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Expr(Expression),
    /// Nested creation object: `address: { city: city }`
    Object(Vec<NewField>),
}
