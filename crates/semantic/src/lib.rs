// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//

//! # sqlexpr - Semantic Analysis
//!
//! This crate infers the output type of expression trees without executing
//! anything:
//!
//! - **Type Resolver**: one post-order pass over a tree, consulting a
//!   [`SchemaLookup`] for field references
//! - **Function rules**: per-function base-type and nullability inference
//! - **Annotations**: resolved types stored beside the tree, keyed by node identity
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sqlexpr_semantic::resolve;
//!
//! let types = resolve(&expr, &schema)?;
//! let root = types.root_type();
//! ```

pub mod annotations;
pub mod error;
pub mod resolver;
mod rules;

// Re-export commonly used types
pub use annotations::TypeAnnotations;
pub use error::{ResolutionErrors, ResolveError, ResolveResult};
pub use resolver::TypeResolver;

use sqlexpr_catalog::SchemaLookup;
use sqlexpr_ir::Expr;

/// Resolve every node of `expr` against `schema`
pub fn resolve<S: SchemaLookup + ?Sized>(
    expr: &Expr,
    schema: &S,
) -> ResolveResult<TypeAnnotations> {
    TypeResolver::new(schema).resolve(expr)
}
