// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sqlexpr
//!
//! Typed function expressions compiled to dialect-correct SQL.
//!
//! ## Overview
//!
//! Build an expression tree from the function catalog, resolve the type of
//! every node against a schema, then compile it to SQL text plus ordered
//! bound parameters for one backend:
//!
//! ```text
//! catalog constructors → Expr → TypeResolver → Compiler → CompiledSql
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sqlexpr::{coalesce, Dialect, Engine, Expr, ResolvedType, StaticSchema};
//!
//! let schema = StaticSchema::new()
//!     .with_field("name", ResolvedType::text())
//!     .with_field("alias", ResolvedType::text().nullable());
//!
//! let engine = Engine::standard(Dialect::PostgreSQL)?;
//! let expr = coalesce([Expr::field("alias"), Expr::field("name")])?;
//! let compiled = engine.compile(&expr, &schema)?;
//! assert_eq!(compiled.sql, r#"COALESCE("alias", "name")"#);
//! ```

pub mod config;
pub mod engine;
pub mod error;

pub use config::{ConfigError, EngineConfig, QuirkOverride};
pub use engine::Engine;
pub use error::{Error, Result};

// Re-exports from the member crates
pub use sqlexpr_catalog::{
    CatalogError, ColumnMetadata, DataType, FnSchema, SchemaLookup, SharedSchema, StaticSchema,
    TableMetadata,
};
pub use sqlexpr_compiler::{
    CompileError, CompiledSql, Compiler, DialectError, DialectRegistry, NullPolicy, QuirkDef,
};
pub use sqlexpr_function_registry::{
    FunctionRegistry, FunctionSignature, avg, coalesce, concat, count, count_distinct, greatest,
    least, length, lower, max, min, now, substr, sum, upper, with_output_type,
};
pub use sqlexpr_ir::{
    BaseType, Dialect, Expr, ExprError, ExprKind, FieldRef, FunctionId, NodeId, ResolvedType,
    Value,
};
pub use sqlexpr_semantic::{ResolutionErrors, ResolveError, TypeAnnotations, TypeResolver, resolve};
