// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sqlexpr - Intermediate Representation
//!
//! This crate provides the expression tree compiled to SQL by `sqlexpr`.
//! The IR is designed to:
//! - Be dialect-agnostic (the same tree compiles for every backend)
//! - Be immutable (analysis results live beside the tree, keyed by [`NodeId`])
//! - Validate arity and statically known argument domains at construction
//! - Carry enough type information for result-type inference

pub mod dialect;
pub mod error;
pub mod expr;
pub mod function;
pub mod metadata;
pub mod types;

// Re-export commonly used types
pub use dialect::{Dialect, PlaceholderStyle, UnknownBackend};
pub use error::{ExprError, ExprResult};
pub use expr::{Aggregate, Call, Expr, ExprKind, FieldRef, Literal, NodeId, Value};
pub use function::{Arity, FunctionId};
pub use metadata::{ColumnMetadata, DataType, TableMetadata};
pub use types::{BaseType, ResolvedType};
