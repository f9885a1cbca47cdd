// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Dialect-specific function forms
//!
//! Each backend module holds only the entries where the backend departs from
//! the SQL-standard forms in [`shared`].

pub mod quirk;
pub mod registry;
pub mod template;

mod firebird;
mod mysql;
mod postgresql;
mod shared;
mod sqlite;
mod sqlserver;

pub use quirk::{NullPolicy, QuirkDef, QuirkEntry};
pub use registry::{DialectRegistry, DialectRegistryBuilder};
pub use template::SqlTemplate;

use sqlexpr_ir::Dialect;

/// Builtin entries of a backend
pub fn builtin_quirks(dialect: Dialect) -> &'static [QuirkDef<'static>] {
    match dialect {
        Dialect::PostgreSQL => postgresql::QUIRKS,
        Dialect::MySQL => mysql::QUIRKS,
        Dialect::SQLite => sqlite::QUIRKS,
        Dialect::SqlServer => sqlserver::QUIRKS,
        Dialect::Firebird => firebird::QUIRKS,
    }
}

/// SQL-standard entries used when a backend has none of its own
pub fn default_quirks() -> &'static [QuirkDef<'static>] {
    shared::QUIRKS
}
