// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Metadata types for schema information
//!
//! This module re-exports metadata types from the `sqlexpr-ir` crate.
//! These types define the tables and columns a schema is built from.

// Re-export all metadata types from the ir crate
pub use sqlexpr_ir::{BaseType, ColumnMetadata, DataType, FieldRef, ResolvedType, TableMetadata};
