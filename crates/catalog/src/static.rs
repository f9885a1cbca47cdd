// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Static Schema
//!
//! This module provides an in-memory schema built from code or parsed from a
//! JSON/YAML document.
//!
//! ## Document format
//!
//! ```yaml
//! fields:
//!   nickname: { base: text, nullable: true }
//! tables:
//!   - name: people
//!     columns:
//!       - { name: name, data_type: text }
//!       - { name: alias, data_type: text, nullable: true }
//! ```
//!
//! ## Lookup rules
//!
//! - Qualified references (`people.name`) resolve against that table only.
//! - Unqualified references resolve against standalone fields first, then
//!   against the single table declaring a column of that name. A name
//!   declared by several tables is ambiguous and does not resolve.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;
use tracing::debug;

use crate::metadata::{ColumnMetadata, FieldRef, ResolvedType, TableMetadata};
use crate::{CatalogError, CatalogResult, SchemaLookup};

/// Static schema with predefined field types
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticSchema {
    /// Standalone fields, not qualified by any table
    fields: HashMap<String, ResolvedType>,
    /// Column types per table
    tables: HashMap<String, HashMap<String, ResolvedType>>,
}

#[derive(Debug, Deserialize)]
struct SchemaDocument {
    #[serde(default)]
    fields: BTreeMap<String, ResolvedType>,
    #[serde(default)]
    tables: Vec<TableMetadata>,
}

impl StaticSchema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: declare a standalone field
    pub fn with_field(mut self, name: impl Into<String>, ty: ResolvedType) -> Self {
        self.fields.insert(name.into(), ty);
        self
    }

    /// Builder method: declare a table.
    ///
    /// Fails when a column type has no base type or the table already exists.
    pub fn with_table(mut self, table: TableMetadata) -> CatalogResult<Self> {
        if self.tables.contains_key(&table.name) {
            return Err(CatalogError::DuplicateTable(table.name));
        }
        let columns = table
            .columns
            .iter()
            .map(|col| Ok((col.name.clone(), column_type(col)?)))
            .collect::<CatalogResult<HashMap<_, _>>>()?;
        self.tables.insert(table.name, columns);
        Ok(self)
    }

    /// Build a schema from table metadata
    pub fn from_tables(tables: impl IntoIterator<Item = TableMetadata>) -> CatalogResult<Self> {
        tables
            .into_iter()
            .try_fold(Self::new(), |schema, table| schema.with_table(table))
    }

    /// Parse a schema document from JSON
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        let doc: SchemaDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    /// Parse a schema document from YAML
    pub fn from_yaml_str(yaml: &str) -> CatalogResult<Self> {
        let doc: SchemaDocument = serde_yaml::from_str(yaml)?;
        Self::from_document(doc)
    }

    fn from_document(doc: SchemaDocument) -> CatalogResult<Self> {
        let mut schema = Self::from_tables(doc.tables)?;
        schema.fields.extend(doc.fields);
        debug!(
            fields = schema.fields.len(),
            tables = schema.tables.len(),
            "Loaded static schema"
        );
        Ok(schema)
    }

    /// Number of declared tables
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    fn lookup_unqualified(&self, name: &str) -> Option<ResolvedType> {
        if let Some(ty) = self.fields.get(name) {
            return Some(*ty);
        }
        let mut matches = self.tables.values().filter_map(|cols| cols.get(name));
        let first = matches.next()?;
        if matches.next().is_some() {
            debug!(field = name, "Ambiguous unqualified field reference");
            return None;
        }
        Some(*first)
    }
}

fn column_type(col: &ColumnMetadata) -> CatalogResult<ResolvedType> {
    col.resolved_type()
        .ok_or_else(|| CatalogError::UnsupportedType {
            column: col.name.clone(),
            data_type: format!("{:?}", col.data_type),
        })
}

impl SchemaLookup for StaticSchema {
    fn lookup(&self, field: &FieldRef) -> Option<ResolvedType> {
        match &field.table {
            Some(table) => self.tables.get(table)?.get(&field.name).copied(),
            None => self.lookup_unqualified(&field.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::DataType;

    fn people() -> TableMetadata {
        TableMetadata::new("people").with_columns(vec![
            ColumnMetadata::new("name", DataType::Text),
            ColumnMetadata::new("alias", DataType::Text).with_nullable(true),
        ])
    }

    #[test]
    fn test_standalone_field() {
        let schema = StaticSchema::new().with_field("name", ResolvedType::text());
        assert_eq!(
            schema.lookup(&FieldRef::new("name")),
            Some(ResolvedType::text())
        );
        assert_eq!(schema.lookup(&FieldRef::new("missing")), None);
    }

    #[test]
    fn test_qualified_lookup() {
        let schema = StaticSchema::from_tables([people()]).unwrap();
        assert_eq!(
            schema.lookup(&FieldRef::new("alias").with_table("people")),
            Some(ResolvedType::text().nullable())
        );
        assert_eq!(schema.lookup(&FieldRef::new("alias").with_table("pets")), None);
    }

    #[test]
    fn test_unqualified_lookup_ambiguous() {
        let pets = TableMetadata::new("pets")
            .with_columns(vec![ColumnMetadata::new("name", DataType::Varchar(None))]);
        let schema = StaticSchema::from_tables([people(), pets]).unwrap();
        assert_eq!(schema.lookup(&FieldRef::new("name")), None);
        assert_eq!(
            schema.lookup(&FieldRef::new("alias")),
            Some(ResolvedType::text().nullable())
        );
    }

    #[test]
    fn test_unsupported_column_type() {
        let files = TableMetadata::new("files")
            .with_columns(vec![ColumnMetadata::new("content", DataType::Blob)]);
        let err = StaticSchema::from_tables([files]).unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedType { .. }));
    }

    #[test]
    fn test_duplicate_table() {
        let err = StaticSchema::from_tables([people(), people()]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateTable(name) if name == "people"));
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
fields:
  nickname: { base: text, nullable: true }
tables:
  - name: people
    columns:
      - { name: name, data_type: text }
      - { name: age, data_type: integer, nullable: true }
"#;
        let schema = StaticSchema::from_yaml_str(yaml).unwrap();
        assert_eq!(
            schema.lookup(&FieldRef::new("nickname")),
            Some(ResolvedType::text().nullable())
        );
        assert_eq!(
            schema.lookup(&FieldRef::new("age").with_table("people")),
            Some(ResolvedType::integer().nullable())
        );
    }

    #[test]
    fn test_from_json_invalid() {
        let err = StaticSchema::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, CatalogError::SerializationError(_)));
    }
}
