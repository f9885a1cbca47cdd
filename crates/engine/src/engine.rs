// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Engine
//!
//! Resolve-then-compile pipeline over one validated configuration.
//!
//! The engine owns an immutable [`DialectRegistry`] and can be shared between
//! threads; every call resolves and compiles with its own per-call state.

use std::sync::Arc;

use sqlexpr_catalog::SchemaLookup;
use sqlexpr_compiler::{CompileError, CompiledSql, Compiler, DialectRegistry};
use sqlexpr_ir::{Dialect, Expr};
use sqlexpr_semantic::{TypeAnnotations, TypeResolver};
use tracing::{debug, instrument};

use crate::config::EngineConfig;
use crate::error::Result;

/// Expression compiler bound to a default backend
#[derive(Debug, Clone)]
pub struct Engine {
    compiler: Compiler,
    dialect: Dialect,
}

impl Engine {
    /// Validate `config` and build its registry
    #[instrument(skip_all, fields(dialect = %config.dialect))]
    pub fn new(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let dialect = config.target_dialect()?;
        let registry = config.build_registry()?;
        debug!(overrides = config.overrides.len(), "Engine ready");

        Ok(Self {
            compiler: Compiler::from_shared(Arc::new(registry)).with_max_depth(config.max_depth),
            dialect,
        })
    }

    /// Engine with the builtin registry and default limits
    pub fn standard(dialect: Dialect) -> Result<Self> {
        Self::new(&EngineConfig::new(dialect))
    }

    /// Engine over an already-built registry
    pub fn with_registry(registry: DialectRegistry, dialect: Dialect) -> Self {
        Self {
            compiler: Compiler::new(registry),
            dialect,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn registry(&self) -> &DialectRegistry {
        self.compiler.registry()
    }

    pub fn compiler(&self) -> &Compiler {
        &self.compiler
    }

    /// Resolve the type of every node of `expr`
    pub fn resolve<S: SchemaLookup + ?Sized>(
        &self,
        expr: &Expr,
        schema: &S,
    ) -> Result<TypeAnnotations> {
        self.check_depth(expr)?;
        Ok(TypeResolver::new(schema).resolve(expr)?)
    }

    /// Resolve and compile `expr` for the configured backend
    pub fn compile<S: SchemaLookup + ?Sized>(
        &self,
        expr: &Expr,
        schema: &S,
    ) -> Result<CompiledSql> {
        self.compile_for(expr, schema, self.dialect)
    }

    /// Resolve and compile `expr` for `dialect`
    #[instrument(skip_all, fields(dialect = %dialect, root = %expr.id()))]
    pub fn compile_for<S: SchemaLookup + ?Sized>(
        &self,
        expr: &Expr,
        schema: &S,
        dialect: Dialect,
    ) -> Result<CompiledSql> {
        let types = self.resolve(expr, schema)?;
        Ok(self.compiler.compile(expr, &types, dialect)?)
    }

    /// Reject over-deep trees before resolution walks them
    fn check_depth(&self, expr: &Expr) -> Result<()> {
        let depth = expr.depth();
        let limit = self.compiler.max_depth();
        if depth > limit {
            return Err(CompileError::RecursionLimitExceeded { depth, limit }.into());
        }
        Ok(())
    }
}
