//! Schema definition AST nodes (`N::`, `E::`, `V::`)

use serde::{Deserialize, Serialize};

use crate::{Literal, Span, Type};

/// A schema definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SchemaDef {
    /// `N::User { name: String }`
    Node(NodeDef),
    /// `E::Follows { From: User, To: User }`
    Edge(EdgeDef),
    /// `V::Embedding { content: String }`
    Vector(VectorDef),
}

impl SchemaDef {
    pub fn name(&self) -> &str {
        match self {
            SchemaDef::Node(def) => &def.name,
            SchemaDef::Edge(def) => &def.name,
            SchemaDef::Vector(def) => &def.name,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            SchemaDef::Node(def) => def.span,
            SchemaDef::Edge(def) => def.span,
            SchemaDef::Vector(def) => def.span,
        }
    }
}

/// Node type definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDef {
    pub name: String,
    pub fields: Vec<FieldDef>,
    pub span: Span,
}

/// Edge type definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeDef {
    pub name: String,
    pub from: String,
    pub to: String,
    pub properties: Vec<FieldDef>,
    pub span: Span,
}

/// Vector type definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorDef {
    pub name: String,
    pub fields: Vec<FieldDef>,
    pub span: Span,
}

/// A field in a schema body: `INDEX name: String DEFAULT "anon"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub indexed: bool,
    pub name: String,
    pub ty: Type,
    pub default: Option<DefaultValue>,
    pub span: Span,
}

/// Value after `DEFAULT`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DefaultValue {
    /// `NOW`: filled in with the insertion time
    Now,
    Literal(Literal),
}
