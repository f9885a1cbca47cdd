// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Error types for registry construction and compilation
//!
//! [`DialectError`] is raised while a [`DialectRegistry`](crate::DialectRegistry)
//! is being built and never afterwards. [`CompileError`] is raised per
//! compilation; no partial SQL is returned alongside it.

use serde::Serialize;
use sqlexpr_ir::{Dialect, FunctionId, NodeId, UnknownBackend};

/// Result type alias for registry construction
pub type DialectResult<T> = Result<T, DialectError>;

/// Result type alias for compilation
pub type CompileResult<T> = Result<T, CompileError>;

/// Errors raised while building a dialect registry
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq, Serialize)]
pub enum DialectError {
    /// Backend name not recognized
    #[error(transparent)]
    UnknownBackend(#[from] UnknownBackend),

    /// Template pattern is malformed
    #[error("Invalid template '{template}': {message}")]
    InvalidTemplate { template: String, message: String },

    /// Entry is inconsistent with the function it is registered for
    #[error("Invalid entry for {function} on {backend}: {message}")]
    InvalidQuirk {
        function: FunctionId,
        backend: String,
        message: String,
    },
}

impl DialectError {
    pub(crate) fn template(template: &str, message: impl Into<String>) -> Self {
        DialectError::InvalidTemplate {
            template: template.to_string(),
            message: message.into(),
        }
    }
}

/// Errors raised while compiling a resolved tree
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq, Serialize)]
pub enum CompileError {
    /// No entry for the function on the backend, and no default
    #[error("{function} is not supported on {dialect}{}", format_detail(detail))]
    UnsupportedOnBackend {
        function: FunctionId,
        dialect: Dialect,
        detail: Option<String>,
    },

    /// Node has no resolved type
    #[error("Node {node} has not been resolved")]
    Unresolved { node: NodeId },

    /// Tree nested deeper than the configured limit
    #[error("Recursion limit exceeded (depth: {depth}, limit: {limit})")]
    RecursionLimitExceeded { depth: usize, limit: usize },
}

fn format_detail(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(" ({d})")).unwrap_or_default()
}

impl CompileError {
    pub(crate) fn unsupported(function: FunctionId, dialect: Dialect) -> Self {
        CompileError::UnsupportedOnBackend {
            function,
            dialect,
            detail: None,
        }
    }
}
