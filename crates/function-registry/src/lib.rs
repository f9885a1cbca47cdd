// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Function Catalog
//!
//! This crate provides the fixed set of builtin functions as expression
//! constructors, plus signature metadata for each of them.
//!
//! ## Features
//!
//! - Eager arity validation (`COALESCE(x)` fails with [`ExprError::Arity`])
//! - Static domain checks (`SUBSTR(x, 0)` fails with [`ExprError::Domain`])
//! - Scalar and aggregate constructors
//! - Signature lookup by function identity or name
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sqlexpr_function_registry::{coalesce, length, Expr};
//!
//! let display = coalesce([Expr::field("alias"), Expr::field("name")])?;
//! let size = length(Expr::field("name"))?;
//! ```

pub mod builtin;
pub mod registry;
pub mod signature;

// Re-exports from ir for convenience
pub use sqlexpr_ir::{Arity, Expr, ExprError, ExprKind, ExprResult, FunctionId, ResolvedType, Value};

pub use builtin::aggregate::{avg, count, count_distinct, max, min, sum};
pub use builtin::scalar::{coalesce, concat, greatest, least, length, lower, now, substr, upper};
pub use registry::FunctionRegistry;
pub use signature::{FunctionSignature, FunctionType};

/// Attach an explicit output type to a call or aggregate.
///
/// The override is checked against the inferred type during resolution.
pub fn with_output_type(expr: &Expr, output_type: ResolvedType) -> ExprResult<Expr> {
    expr.with_output_type(output_type)
}
