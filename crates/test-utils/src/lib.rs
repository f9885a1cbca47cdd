// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Testing utilities for sqlexpr
//!
//! This crate provides common testing components including:
//! - Mock schema implementations that count lookups
//! - Sample schemas and expression trees
//! - SQL-specific test helpers and assertions

pub mod assertions;
pub mod fixtures;
pub mod mock_schema;

// Re-exports for convenience
pub use assertions::SqlAssertions;
pub use fixtures::ExprFixtures;
pub use mock_schema::{MockSchema, MockSchemaBuilder};

/// Install a `tracing` subscriber honoring `RUST_LOG`, once per process
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
