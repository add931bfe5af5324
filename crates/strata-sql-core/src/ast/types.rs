//! SQL data type definitions.

use super::Identifier;

/// A type expression, as used by `CAST`, column definitions and `ROW` fields.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DataType {
    /// `ARRAY<element>` or the postfix `element ARRAY` form.
    Array(Box<DataType>),
    /// `MAP<key, value>`.
    Map(Box<DataType>, Box<DataType>),
    /// `ROW(name type, ...)`.
    Row(Vec<RowField>),
    /// A named type with optional parameters, e.g. `VARCHAR(10)`.
    Base {
        /// Type name. Unquoted names are upper-cased.
        name: String,
        /// Parameters between parentheses.
        parameters: Vec<TypeParameter>,
    },
}

impl DataType {
    /// Creates a parameterless base type.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Base {
            name: name.into(),
            parameters: Vec::new(),
        }
    }

    /// Wraps this type into an array type.
    #[must_use]
    pub fn array_of(self) -> Self {
        Self::Array(Box::new(self))
    }
}

/// A named field of a `ROW` type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RowField {
    /// Field name.
    pub name: Identifier,
    /// Field type.
    pub data_type: DataType,
}

/// A parameter of a base type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TypeParameter {
    /// Numeric parameter such as a length or precision.
    Integer(i64),
    /// Nested type parameter.
    Type(DataType),
}

/// Base type names made of several words.
pub(crate) const MULTI_WORD_TYPES: [&str; 3] = [
    "TIME WITH TIME ZONE",
    "TIMESTAMP WITH TIME ZONE",
    "DOUBLE PRECISION",
];
