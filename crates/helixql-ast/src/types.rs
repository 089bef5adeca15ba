//! Field and parameter types

use serde::{Deserialize, Serialize};

use crate::FieldDef;

/// A type expression, as written after `name:` in a schema field or query parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Type {
    /// Built-in scalar: `String`, `U32`, `F64`, ...
    Named(PrimitiveType),

    /// `Date`
    Date,

    /// `ID`
    Id,

    /// Array type: `[String]`
    Array(Box<Type>),

    /// Inline object type: `{ street: String, zip: U32 }`
    Object(Vec<FieldDef>),

    /// Any other upper-initial name, resolved against the schema downstream
    Reference(String),
}

/// Built-in scalar type names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
    String,
    Boolean,
    F32,
    F64,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    U128,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 13] = [
        PrimitiveType::String,
        PrimitiveType::Boolean,
        PrimitiveType::F32,
        PrimitiveType::F64,
        PrimitiveType::I8,
        PrimitiveType::I16,
        PrimitiveType::I32,
        PrimitiveType::I64,
        PrimitiveType::U8,
        PrimitiveType::U16,
        PrimitiveType::U32,
        PrimitiveType::U64,
        PrimitiveType::U128,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::String => "String",
            PrimitiveType::Boolean => "Boolean",
            PrimitiveType::F32 => "F32",
            PrimitiveType::F64 => "F64",
            PrimitiveType::I8 => "I8",
            PrimitiveType::I16 => "I16",
            PrimitiveType::I32 => "I32",
            PrimitiveType::I64 => "I64",
            PrimitiveType::U8 => "U8",
            PrimitiveType::U16 => "U16",
            PrimitiveType::U32 => "U32",
            PrimitiveType::U64 => "U64",
            PrimitiveType::U128 => "U128",
        }
    }
}
