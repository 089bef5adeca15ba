//! Expression, traversal and step AST nodes

use serde::{Deserialize, Serialize};

use crate::{AddEdge, Creation, Endpoints, Span, VectorData};

/// An expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExpressionKind {
    /// `N<User>(id)::Out<Follows>`
    Traversal(Traversal),

    /// `user::name`
    IdTraversal(IdTraversal),

    /// `_::age::GT(18)`, `_.name`
    AnonymousTraversal(AnonymousTraversal),

    /// `"text"`, `42`, `1.5`, `true`, `NONE`
    Literal(Literal),

    /// `AND(a, b)`, `OR(a, b)`
    BoolCombinator(BoolCombinator),

    /// `{ name, age: user::age }`
    ObjectStep(ObjectStep),

    /// `user`
    Identifier(String),

    /// `AddN<User>(...)` used as a value
    Create(Box<Creation>),

    /// `SearchV<Doc>(vec, 10)`
    SearchVector(SearchVector),

    /// `EXISTS(_::Out<Follows>)`
    Exists(Box<Expression>),
}

/// A literal value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    None,
}

/// Traversal anchored on `N`, `E` or `V`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Traversal {
    pub start: StartStep,
    pub steps: Vec<Step>,
    pub last: Option<LastStep>,
}

/// Traversal anchored on a variable. Always has a step or a last step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdTraversal {
    pub base: String,
    pub steps: Vec<Step>,
    pub last: Option<LastStep>,
    pub span: Span,
}

/// Traversal on `_`, the value supplied by the enclosing step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnonymousTraversal {
    /// `_.name`
    pub property: Option<String>,
    pub steps: Vec<Step>,
    pub last: Option<LastStep>,
}

/// `N<User, Admin>(id)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartStep {
    pub source: StartSource,
    pub types: Vec<String>,
    pub selector: Option<StartSelector>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StartSource {
    /// `N`
    Nodes,
    /// `E`
    Edges,
    /// `V`
    Vectors,
}

impl StartSource {
    pub fn from_keyword(text: &str) -> Option<Self> {
        match text {
            "N" => Some(StartSource::Nodes),
            "E" => Some(StartSource::Edges),
            "V" => Some(StartSource::Vectors),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            StartSource::Nodes => "N",
            StartSource::Edges => "E",
            StartSource::Vectors => "V",
        }
    }
}

/// What goes in the parentheses of a start step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StartSelector {
    /// `N<User>(a, b)`
    Ids(Vec<IdArg>),
    /// `N<User>({ email: addr })`
    ByIndex { key: IdArg, value: Box<Expression> },
}

/// An id argument: variable, string literal, or id traversal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IdArg {
    Identifier(String),
    String(String),
    Traversal(Box<IdTraversal>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoolCombinator {
    pub op: BoolOp,
    pub operands: Vec<Expression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoolOp {
    And,
    Or,
}

/// `SearchV<Doc>(vec, k)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchVector {
    pub vector_type: String,
    pub data: VectorData,
    pub limit: SearchLimit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchLimit {
    Integer(i64),
    Identifier(String),
}

/// One `::`-introduced step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub kind: StepKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StepKind {
    Graph(GraphStep),
    /// `WHERE(_::age::GT(18))`
    Where(Box<Expression>),
    /// `|u| { name: u::name }`
    Closure { param: String, object: ObjectStep },
    Object(ObjectStep),
    /// `!{ password, .. }`
    Exclude(ExcludeField),
    Count,
    Id,
    /// `RANGE(0, 10)`
    Range {
        start: Box<Expression>,
        end: Box<Expression>,
    },
    AddE(AddEdge),
    /// Property access: `::name`
    Field(String),
}

/// Graph navigation steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GraphStep {
    OutE(Vec<String>),
    InE(Vec<String>),
    FromN,
    ToN,
    Out(Vec<String>),
    In(Vec<String>),
    ShortestPath {
        types: Vec<String>,
        endpoints: Endpoints,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludeField {
    pub fields: Vec<String>,
    pub spread: bool,
}

/// `{ ... }` projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectStep {
    pub fields: Vec<MappingField>,
    /// Trailing `..`: keep every field not mentioned
    pub spread: bool,
    pub span: Span,
}

/// One entry of an object step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingField {
    pub name: String,
    /// None means shorthand: `{ name }` passes `name` through unchanged
    pub value: Option<Expression>,
    pub span: Span,
}

/// Terminal, non-chainable step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastStep {
    pub kind: LastStepKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LastStepKind {
    /// `::GT(5)`
    BoolOp {
        op: ComparisonOp,
        operand: Box<Expression>,
    },
    /// `::UPDATE({ name: "bob" })`
    Update { fields: Vec<UpdateField> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOp {
    Gt,
    Gte,
    Lt,
    Lte,
    Eq,
    Neq,
}

impl ComparisonOp {
    pub fn from_keyword(text: &str) -> Option<Self> {
        match text {
            "GT" => Some(ComparisonOp::Gt),
            "GTE" => Some(ComparisonOp::Gte),
            "LT" => Some(ComparisonOp::Lt),
            "LTE" => Some(ComparisonOp::Lte),
            "EQ" => Some(ComparisonOp::Eq),
            "NEQ" => Some(ComparisonOp::Neq),
            _ => None,
        }
    }

    /// `EQ`/`NEQ` compare anything; the others need numbers
    pub fn is_ordering(self) -> bool {
        !matches!(self, ComparisonOp::Eq | ComparisonOp::Neq)
    }
}

/// `key: value` inside `UPDATE({ ... })`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateField {
    pub key: String,
    pub value: Expression,
    pub span: Span,
}
