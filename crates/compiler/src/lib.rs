// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sqlexpr - Compiler
//!
//! This crate turns resolved expression trees into dialect-correct SQL text
//! plus ordered bound parameters.
//!
//! ## Overview
//!
//! - **Dialect Registry**: per-backend function templates and null policies,
//!   validated once at construction
//! - **Compiler**: post-order walk emitting quoted identifiers, placeholders
//!   and rendered templates
//! - **Compile context**: bound parameters and recursion depth for one call
//!
//! ## Pipeline
//!
//! ```text
//! Expr → TypeResolver → TypeAnnotations → Compiler → CompiledSql
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sqlexpr_compiler::{Compiler, DialectRegistry};
//! use sqlexpr_ir::Dialect;
//!
//! let compiler = Compiler::new(DialectRegistry::standard()?);
//! let types = sqlexpr_semantic::resolve(&expr, &schema)?;
//! let compiled = compiler.compile(&expr, &types, Dialect::SQLite)?;
//! println!("{} {:?}", compiled.sql, compiled.params);
//! ```

pub mod compiler;
pub mod context;
pub mod dialect;
pub mod error;

pub use compiler::{CompiledSql, Compiler};
pub use context::{CompileContext, DEFAULT_MAX_DEPTH};
pub use dialect::template::DEFAULT_SEPARATOR;
pub use dialect::{
    DialectRegistry, DialectRegistryBuilder, NullPolicy, QuirkDef, QuirkEntry, SqlTemplate,
};
pub use error::{CompileError, CompileResult, DialectError, DialectResult};
