// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Dialect Support
//!
//! This module defines the backend identities SQL is generated for, together
//! with the properties that are fixed per backend and independent of any
//! particular function:
//!
//! - **Identifier quoting**: `"name"`, `` `name` `` or `[name]`
//! - **Placeholder style**: `$1`, `?` or `@P1`
//!
//! Function-level behavior (templates, null handling) lives in the compiler's
//! dialect registry.
//!
//! ## Dialect Families
//!
//! - **PostgreSQL**: `$n` placeholders, double-quoted identifiers
//! - **MySQL**: `?` placeholders, backtick identifiers
//! - **SQLite**: `?` placeholders, double-quoted identifiers
//! - **SQL Server**: `@Pn` placeholders, bracketed identifiers
//! - **Firebird**: `?` placeholders, double-quoted identifiers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported SQL backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    PostgreSQL,
    MySQL,
    SQLite,
    SqlServer,
    Firebird,
}

impl Dialect {
    pub const ALL: [Dialect; 5] = [
        Dialect::PostgreSQL,
        Dialect::MySQL,
        Dialect::SQLite,
        Dialect::SqlServer,
        Dialect::Firebird,
    ];

    /// Canonical backend name
    pub fn name(self) -> &'static str {
        match self {
            Dialect::PostgreSQL => "postgresql",
            Dialect::MySQL => "mysql",
            Dialect::SQLite => "sqlite",
            Dialect::SqlServer => "sqlserver",
            Dialect::Firebird => "firebird",
        }
    }

    pub fn placeholder_style(self) -> PlaceholderStyle {
        match self {
            Dialect::PostgreSQL => PlaceholderStyle::Dollar,
            Dialect::MySQL | Dialect::SQLite | Dialect::Firebird => PlaceholderStyle::Question,
            Dialect::SqlServer => PlaceholderStyle::AtP,
        }
    }

    /// Generate the placeholder for the given parameter index (1-based)
    pub fn placeholder(self, index: usize) -> String {
        self.placeholder_style().render(index)
    }

    /// Quote a single identifier, escaping embedded quote characters
    pub fn quote_identifier(self, ident: &str) -> String {
        match self {
            Dialect::MySQL => format!("`{}`", ident.replace('`', "``")),
            Dialect::SqlServer => format!("[{}]", ident.replace(']', "]]")),
            Dialect::PostgreSQL | Dialect::SQLite | Dialect::Firebird => {
                format!("\"{}\"", ident.replace('"', "\"\""))
            }
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = UnknownBackend;

    /// Parse a backend name, accepting common aliases
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgresql" | "postgres" | "pg" => Ok(Dialect::PostgreSQL),
            "mysql" | "mariadb" => Ok(Dialect::MySQL),
            "sqlite" | "sqlite3" => Ok(Dialect::SQLite),
            "sqlserver" | "mssql" | "tsql" => Ok(Dialect::SqlServer),
            "firebird" => Ok(Dialect::Firebird),
            _ => Err(UnknownBackend(s.to_string())),
        }
    }
}

/// Error returned when a backend name is not recognized
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq, Serialize)]
#[error("Unknown backend '{0}'")]
pub struct UnknownBackend(pub String);

/// How bound parameters are written into SQL text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaceholderStyle {
    /// `$1`, `$2`, ...
    Dollar,
    /// `?` for every parameter
    Question,
    /// `@P1`, `@P2`, ...
    AtP,
}

impl PlaceholderStyle {
    pub fn render(self, index: usize) -> String {
        match self {
            PlaceholderStyle::Dollar => format!("${index}"),
            PlaceholderStyle::Question => "?".to_string(),
            PlaceholderStyle::AtP => format!("@P{index}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders() {
        assert_eq!(Dialect::PostgreSQL.placeholder(3), "$3");
        assert_eq!(Dialect::MySQL.placeholder(3), "?");
        assert_eq!(Dialect::SqlServer.placeholder(2), "@P2");
    }

    #[test]
    fn test_quote_identifier_escapes() {
        assert_eq!(Dialect::PostgreSQL.quote_identifier("a\"b"), "\"a\"\"b\"");
        assert_eq!(Dialect::MySQL.quote_identifier("name"), "`name`");
        assert_eq!(Dialect::SqlServer.quote_identifier("x]y"), "[x]]y]");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Postgres".parse::<Dialect>(), Ok(Dialect::PostgreSQL));
        assert_eq!("mssql".parse::<Dialect>(), Ok(Dialect::SqlServer));
        assert_eq!(
            "oracle".parse::<Dialect>(),
            Err(UnknownBackend("oracle".to_string()))
        );
    }
}
