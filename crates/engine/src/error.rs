// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Unified error type for the engine

use sqlexpr_catalog::CatalogError;
use sqlexpr_compiler::{CompileError, DialectError};
use sqlexpr_ir::ExprError;
use sqlexpr_semantic::ResolutionErrors;

use crate::config::ConfigError;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Any error raised while building, resolving or compiling an expression
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Arity or domain violation at construction
    #[error(transparent)]
    Expr(#[from] ExprError),

    /// Schema loading failure
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// One or more nodes failed to resolve
    #[error(transparent)]
    Resolution(#[from] ResolutionErrors),

    /// Registry construction failure
    #[error(transparent)]
    Dialect(#[from] DialectError),

    /// Compilation failure
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),
}
