// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sqlexpr - Catalog Layer
//!
//! This crate provides the schema abstraction consumed by the type resolver.
//! It defines the [`SchemaLookup`] trait and the schemas shipped with it:
//!
//! - **Static schemas**: fields and tables declared in code or loaded from JSON/YAML
//! - **Shared schemas**: a process-wide snapshot with copy-on-write replacement
//! - **Closure schemas**: any `Fn(&FieldRef) -> Option<ResolvedType>`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sqlexpr_catalog::{SchemaLookup, StaticSchema};
//! use sqlexpr_ir::{FieldRef, ResolvedType};
//!
//! let schema = StaticSchema::new()
//!     .with_field("name", ResolvedType::text())
//!     .with_field("alias", ResolvedType::text().nullable());
//!
//! assert!(schema.lookup(&FieldRef::new("alias")).unwrap().nullable);
//! ```

pub mod error;
pub mod metadata;
pub mod shared;
pub mod r#static;
pub mod r#trait;

// Re-exports
pub use error::{CatalogError, CatalogResult};
pub use metadata::{BaseType, ColumnMetadata, DataType, FieldRef, ResolvedType, TableMetadata};
pub use r#static::StaticSchema;
pub use r#trait::{FnSchema, SchemaLookup};
pub use shared::SharedSchema;
