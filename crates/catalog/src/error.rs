// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for Catalog operations
//!
//! This module defines the error types raised while building schemas.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for Catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while building a schema
#[derive(Debug, Error, Clone, Serialize)]
pub enum CatalogError {
    /// Column type the function layer cannot operate on
    #[error("Column '{column}' has unsupported type {data_type}")]
    UnsupportedType { column: String, data_type: String },

    /// Same table declared twice
    #[error("Table '{0}' is declared more than once")]
    DuplicateTable(String),

    /// Failed to serialize or deserialize schema data
    #[error("Failed to parse schema data: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for CatalogError {
    fn from(err: serde_yaml::Error) -> Self {
        CatalogError::SerializationError(err.to_string())
    }
}
