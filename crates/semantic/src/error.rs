// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # Error types for type resolution
//!
//! Each offending node produces one [`ResolveError`]; a failed pass reports
//! all of them together as [`ResolutionErrors`].

use std::fmt;

use serde::Serialize;
use sqlexpr_ir::{FunctionId, NodeId};
use thiserror::Error;

/// Result type alias for resolution
pub type ResolveResult<T> = Result<T, ResolutionErrors>;

/// Error attached to a single expression node
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
pub enum ResolveError {
    /// Field not present in the schema
    #[error("Unknown field '{field}' at node {node}")]
    UnknownField { node: NodeId, field: String },

    /// Incompatible argument types, or an illegal explicit output type
    #[error("Type mismatch in {function} at node {node}: {message}")]
    TypeMismatch {
        node: NodeId,
        function: FunctionId,
        message: String,
    },
}

impl ResolveError {
    /// The node the error is attached to
    pub fn node(&self) -> NodeId {
        match self {
            ResolveError::UnknownField { node, .. } | ResolveError::TypeMismatch { node, .. } => {
                *node
            }
        }
    }
}

/// All errors collected during one failed resolution pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionErrors(Vec<ResolveError>);

impl ResolutionErrors {
    pub(crate) fn new(errors: Vec<ResolveError>) -> Self {
        debug_assert!(!errors.is_empty());
        Self(errors)
    }

    /// The first error in post-order
    pub fn first(&self) -> &ResolveError {
        &self.0[0]
    }

    pub fn errors(&self) -> &[ResolveError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolveError> {
        self.0.iter()
    }
}

impl fmt::Display for ResolutionErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first())?;
        if self.0.len() > 1 {
            write!(f, " (and {} more)", self.0.len() - 1)?;
        }
        Ok(())
    }
}

impl std::error::Error for ResolutionErrors {}

impl IntoIterator for ResolutionErrors {
    type Item = ResolveError;
    type IntoIter = std::vec::IntoIter<ResolveError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
