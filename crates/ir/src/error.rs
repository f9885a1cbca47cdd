// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Errors raised while building expression trees

use serde::Serialize;

use crate::FunctionId;

/// Result type alias for expression construction
pub type ExprResult<T> = Result<T, ExprError>;

/// Errors detected eagerly when an expression node is constructed
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq, Serialize)]
pub enum ExprError {
    /// Wrong number of arguments for a function
    #[error("{function} expects {expected} argument(s), got {found}")]
    Arity {
        function: FunctionId,
        expected: String,
        found: usize,
    },

    /// A statically known argument or value is outside the accepted domain
    #[error("Invalid value for {context}: {message}")]
    Domain { context: String, message: String },
}

impl ExprError {
    pub fn domain(context: impl Into<String>, message: impl Into<String>) -> Self {
        ExprError::Domain {
            context: context.into(),
            message: message.into(),
        }
    }
}
