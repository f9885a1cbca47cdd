// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Metadata types for schema information
//!
//! This module defines the declared column types of a schema and how they map
//! onto the resolver's [`BaseType`]s.

use serde::{Deserialize, Serialize};

use crate::types::{BaseType, ResolvedType};

/// SQL data types as declared in a schema (unified across dialects)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum DataType {
    // Numeric types
    Integer,
    BigInt,
    SmallInt,
    Decimal,
    Float,
    Double,

    // String types
    Varchar(Option<usize>),
    Char(Option<usize>),
    Text,
    Uuid,
    Enum(Vec<String>),

    // Date/Time types
    Date,
    Time,
    DateTime,
    Timestamp,

    // Boolean
    Boolean,

    // Binary types
    Blob,

    // Unknown/Other (with original type name)
    Other(String),
}

impl DataType {
    /// The base type expressions over this column resolve to.
    ///
    /// Returns `None` for types the function layer cannot operate on.
    pub fn base_type(&self) -> Option<BaseType> {
        match self {
            DataType::Integer | DataType::BigInt | DataType::SmallInt => Some(BaseType::Integer),
            DataType::Decimal | DataType::Float | DataType::Double => Some(BaseType::Decimal),
            DataType::Varchar(_)
            | DataType::Char(_)
            | DataType::Text
            | DataType::Uuid
            | DataType::Enum(_) => Some(BaseType::Text),
            DataType::Date | DataType::Time | DataType::DateTime | DataType::Timestamp => {
                Some(BaseType::DateTime)
            }
            DataType::Boolean => Some(BaseType::Boolean),
            DataType::Blob | DataType::Other(_) => None,
        }
    }
}

/// Metadata for a single column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    /// Column name
    pub name: String,
    /// Data type
    pub data_type: DataType,
    /// Whether the column is nullable
    #[serde(default)]
    pub nullable: bool,
}

impl ColumnMetadata {
    /// Create a new, non-nullable column
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: false,
        }
    }

    /// Builder method: set nullable
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Resolved type of a reference to this column
    pub fn resolved_type(&self) -> Option<ResolvedType> {
        self.data_type
            .base_type()
            .map(|base| ResolvedType::new(base).with_nullable(self.nullable))
    }
}

/// Metadata for a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableMetadata {
    /// Table name
    pub name: String,
    /// Column definitions
    #[serde(default)]
    pub columns: Vec<ColumnMetadata>,
}

impl TableMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Builder method: add columns
    pub fn with_columns(mut self, columns: Vec<ColumnMetadata>) -> Self {
        self.columns = columns;
        self
    }

    /// Get column by name
    pub fn get_column(&self, name: &str) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_type_mapping() {
        assert_eq!(DataType::BigInt.base_type(), Some(BaseType::Integer));
        assert_eq!(DataType::Double.base_type(), Some(BaseType::Decimal));
        assert_eq!(DataType::Varchar(Some(20)).base_type(), Some(BaseType::Text));
        assert_eq!(DataType::Timestamp.base_type(), Some(BaseType::DateTime));
        assert_eq!(DataType::Blob.base_type(), None);
    }

    #[test]
    fn test_column_resolved_type() {
        let col = ColumnMetadata::new("alias", DataType::Text).with_nullable(true);
        assert_eq!(col.resolved_type(), Some(ResolvedType::text().nullable()));
    }

    #[test]
    fn test_table_get_column() {
        let table = TableMetadata::new("people").with_columns(vec![
            ColumnMetadata::new("id", DataType::Integer),
            ColumnMetadata::new("name", DataType::Text),
        ]);
        assert!(table.get_column("name").is_some());
        assert!(table.get_column("missing").is_none());
    }
}
