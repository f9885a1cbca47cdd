// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Mock schema implementation for testing
//!
//! Provides an in-memory schema with builder pattern for easy test setup.
//! Every lookup is counted so tests can observe memoization.

use std::collections::HashMap;
use std::sync::Mutex;

use sqlexpr_catalog::{
    ColumnMetadata, DataType, FieldRef, ResolvedType, SchemaLookup, StaticSchema, TableMetadata,
};

/// In-memory mock schema for testing
#[derive(Debug, Default)]
pub struct MockSchema {
    schema: StaticSchema,
    lookups: Mutex<HashMap<String, usize>>,
}

impl MockSchema {
    pub fn new(schema: StaticSchema) -> Self {
        Self {
            schema,
            lookups: Mutex::new(HashMap::new()),
        }
    }

    /// Number of times `field` (qualified name) has been looked up
    pub fn lookup_count(&self, field: &str) -> usize {
        self.lookups
            .lock()
            .map(|counts| counts.get(field).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Total number of lookups
    pub fn total_lookups(&self) -> usize {
        self.lookups
            .lock()
            .map(|counts| counts.values().sum())
            .unwrap_or(0)
    }

    /// The wrapped schema
    pub fn inner(&self) -> &StaticSchema {
        &self.schema
    }
}

impl SchemaLookup for MockSchema {
    fn lookup(&self, field: &FieldRef) -> Option<ResolvedType> {
        if let Ok(mut counts) = self.lookups.lock() {
            *counts.entry(field.qualified()).or_default() += 1;
        }
        self.schema.lookup(field)
    }
}

/// Builder for creating mock schemas with a fluent API
pub struct MockSchemaBuilder {
    schema: StaticSchema,
}

impl Default for MockSchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSchemaBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            schema: StaticSchema::new(),
        }
    }

    /// Add the people schema: `name` (text), `alias` and `goes_by`
    /// (nullable text), plus numeric and timestamp fields
    pub fn with_people_schema(mut self) -> Self {
        self.schema = self
            .schema
            .with_field("name", ResolvedType::text())
            .with_field("alias", ResolvedType::text().nullable())
            .with_field("goes_by", ResolvedType::text().nullable())
            .with_field("age", ResolvedType::integer())
            .with_field("height", ResolvedType::decimal().nullable())
            .with_field("score", ResolvedType::integer().nullable())
            .with_field("joined_at", ResolvedType::datetime())
            .with_field("is_active", ResolvedType::boolean());
        self
    }

    /// Add the `authors` and `books` tables
    pub fn with_library_schema(mut self) -> Self {
        let tables = [
            TableMetadata::new("authors").with_columns(vec![
                ColumnMetadata::new("id", DataType::BigInt),
                ColumnMetadata::new("name", DataType::Varchar(Some(100))),
                ColumnMetadata::new("pen_name", DataType::Varchar(Some(100))).with_nullable(true),
            ]),
            TableMetadata::new("books").with_columns(vec![
                ColumnMetadata::new("id", DataType::BigInt),
                ColumnMetadata::new("title", DataType::Text),
                ColumnMetadata::new("pages", DataType::Integer).with_nullable(true),
                ColumnMetadata::new("price", DataType::Decimal),
            ]),
        ];
        for table in tables {
            self.schema = match self.schema.clone().with_table(table) {
                Ok(schema) => schema,
                Err(err) => panic!("invalid library schema: {err}"),
            };
        }
        self
    }

    /// Add a standalone field
    pub fn with_field(mut self, name: &str, ty: ResolvedType) -> Self {
        self.schema = self.schema.with_field(name, ty);
        self
    }

    pub fn build(self) -> MockSchema {
        MockSchema::new(self.schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_counting() {
        let schema = MockSchemaBuilder::new().with_people_schema().build();
        assert_eq!(schema.lookup(&FieldRef::new("alias")), Some(ResolvedType::text().nullable()));
        schema.lookup(&FieldRef::new("alias"));
        assert_eq!(schema.lookup_count("alias"), 2);
        assert_eq!(schema.total_lookups(), 2);
    }

    #[test]
    fn test_library_schema() {
        let schema = MockSchemaBuilder::new().with_library_schema().build();
        assert_eq!(
            schema.lookup(&FieldRef::new("pen_name").with_table("authors")),
            Some(ResolvedType::text().nullable())
        );
        assert_eq!(schema.lookup(&FieldRef::new("id")), None);
    }
}
