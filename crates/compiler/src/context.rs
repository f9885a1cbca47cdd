// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Compile context for tracking state during SQL generation

use sqlexpr_ir::{Dialect, Value};

use crate::error::CompileError;

/// Default maximum nesting depth
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Context for tracking state during one compilation
///
/// The context maintains:
/// - Bound parameters, in emission order
/// - Recursion depth tracking
/// - Dialect information
#[derive(Debug)]
pub struct CompileContext {
    /// Target SQL dialect
    dialect: Dialect,

    /// Parameters bound so far
    params: Vec<Value>,

    /// Current recursion depth
    recursion_depth: usize,

    /// Maximum recursion depth allowed
    max_recursion_depth: usize,
}

impl CompileContext {
    /// Create a new compile context
    pub fn new(dialect: Dialect) -> Self {
        Self::with_max_depth(dialect, DEFAULT_MAX_DEPTH)
    }

    /// Create a new compile context with custom max recursion depth
    pub fn with_max_depth(dialect: Dialect, max_depth: usize) -> Self {
        Self {
            dialect,
            params: Vec::new(),
            recursion_depth: 0,
            max_recursion_depth: max_depth,
        }
    }

    /// Get the target dialect
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Bind a parameter and return its placeholder
    pub fn bind(&mut self, value: Value) -> String {
        self.params.push(value);
        self.dialect.placeholder(self.params.len())
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Take the bound parameters, leaving the context empty
    pub fn into_params(self) -> Vec<Value> {
        self.params
    }

    /// Increment recursion depth and check for overflow
    pub fn enter_recursive_context(&mut self) -> Result<(), CompileError> {
        self.recursion_depth += 1;
        if self.recursion_depth > self.max_recursion_depth {
            Err(CompileError::RecursionLimitExceeded {
                depth: self.recursion_depth,
                limit: self.max_recursion_depth,
            })
        } else {
            Ok(())
        }
    }

    /// Decrement recursion depth when exiting a recursive context
    pub fn exit_recursive_context(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    pub fn depth(&self) -> usize {
        self.recursion_depth
    }
}
