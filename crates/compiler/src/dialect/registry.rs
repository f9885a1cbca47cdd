// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Dialect Registry
//!
//! Flat lookup of function entries keyed by `(FunctionId, Dialect)`, plus one
//! SQL-standard default per function.
//!
//! ## Design
//!
//! The registry is assembled once by [`DialectRegistryBuilder`]: shared
//! defaults first, then builtin backend tables, then overrides. Every
//! template is parsed and checked against its function's arity during
//! [`build`](DialectRegistryBuilder::build), and backend names are resolved
//! there too, so an unknown backend or malformed template never reaches a
//! compilation. After construction the registry is immutable.
//!
//! ## Example
//!
//! ```rust,ignore
//! let registry = DialectRegistry::builder()
//!     .with_defaults()
//!     .with_backend("sqlite")
//!     .with_override(Some("sqlite"), QuirkDef::new(FunctionId::Now, "DATETIME('now')"))
//!     .build()?;
//! ```

use std::collections::{BTreeSet, HashMap};

use sqlexpr_ir::{Dialect, FunctionId};
use tracing::{debug, instrument};

use crate::dialect::quirk::{NullPolicy, QuirkDef, QuirkEntry};
use crate::dialect::{builtin_quirks, shared};
use crate::error::DialectResult;

/// Name under which defaults are reported in errors
const DEFAULT_BACKEND: &str = "default";

/// Function entries for every registered backend
#[derive(Debug, Clone, Default)]
pub struct DialectRegistry {
    entries: HashMap<(FunctionId, Dialect), QuirkEntry>,
    defaults: HashMap<FunctionId, QuirkEntry>,
    backends: BTreeSet<Dialect>,
}

impl DialectRegistry {
    pub fn builder<'a>() -> DialectRegistryBuilder<'a> {
        DialectRegistryBuilder::default()
    }

    /// Shared defaults plus every builtin backend table
    pub fn standard() -> DialectResult<Self> {
        Self::builder().with_defaults().with_all_backends().build()
    }

    /// Entry used for `function` on `dialect`: the backend's own entry,
    /// else the default
    pub fn lookup(&self, function: FunctionId, dialect: Dialect) -> Option<&QuirkEntry> {
        self.entries
            .get(&(function, dialect))
            .or_else(|| self.defaults.get(&function))
    }

    /// Backend-specific entry only
    pub fn backend_entry(&self, function: FunctionId, dialect: Dialect) -> Option<&QuirkEntry> {
        self.entries.get(&(function, dialect))
    }

    pub fn default_entry(&self, function: FunctionId) -> Option<&QuirkEntry> {
        self.defaults.get(&function)
    }

    /// Null policy `function` follows on `dialect`
    pub fn null_policy(&self, function: FunctionId, dialect: Dialect) -> Option<NullPolicy> {
        self.lookup(function, dialect).map(QuirkEntry::null_policy)
    }

    pub fn supports(&self, function: FunctionId, dialect: Dialect) -> bool {
        self.lookup(function, dialect).is_some()
    }

    /// Backends with at least one registered entry
    pub fn backends(&self) -> impl Iterator<Item = Dialect> + '_ {
        self.backends.iter().copied()
    }

    /// Number of backend-specific plus default entries
    pub fn len(&self) -> usize {
        self.entries.len() + self.defaults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.defaults.is_empty()
    }
}

/// Builder for [`DialectRegistry`]
///
/// Collects names and definitions; nothing is validated until [`build`](Self::build).
#[derive(Debug, Default)]
pub struct DialectRegistryBuilder<'a> {
    defaults: bool,
    backends: Vec<String>,
    overrides: Vec<(Option<String>, QuirkDef<'a>)>,
}

impl<'a> DialectRegistryBuilder<'a> {
    /// Include the SQL-standard default entries
    pub fn with_defaults(mut self) -> Self {
        self.defaults = true;
        self
    }

    /// Include the builtin table of a backend, by name or alias
    pub fn with_backend(mut self, name: impl Into<String>) -> Self {
        self.backends.push(name.into());
        self
    }

    pub fn with_all_backends(mut self) -> Self {
        self.backends
            .extend(Dialect::ALL.iter().map(|d| d.name().to_string()));
        self
    }

    /// Replace one entry; `None` targets the default entry
    pub fn with_override(mut self, backend: Option<&str>, def: QuirkDef<'a>) -> Self {
        self.overrides.push((backend.map(str::to_string), def));
        self
    }

    #[instrument(skip_all)]
    pub fn build(self) -> DialectResult<DialectRegistry> {
        let mut registry = DialectRegistry::default();

        if self.defaults {
            for def in shared::QUIRKS {
                registry.defaults.insert(def.function, def.build(DEFAULT_BACKEND)?);
            }
        }

        for name in &self.backends {
            let dialect: Dialect = name.parse()?;
            for def in builtin_quirks(dialect) {
                registry
                    .entries
                    .insert((def.function, dialect), def.build(dialect.name())?);
            }
            registry.backends.insert(dialect);
        }

        for (backend, def) in &self.overrides {
            match backend {
                None => {
                    registry.defaults.insert(def.function, def.build(DEFAULT_BACKEND)?);
                }
                Some(name) => {
                    let dialect: Dialect = name.parse()?;
                    registry
                        .entries
                        .insert((def.function, dialect), def.build(dialect.name())?);
                    registry.backends.insert(dialect);
                }
            }
            debug!(
                function = %def.function,
                backend = backend.as_deref().unwrap_or(DEFAULT_BACKEND),
                "Applied override"
            );
        }

        debug!(
            entries = registry.entries.len(),
            defaults = registry.defaults.len(),
            backends = registry.backends.len(),
            "Built dialect registry"
        );
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DialectError;

    #[test]
    fn test_standard_registry_covers_every_function() {
        let registry = DialectRegistry::standard().unwrap();
        for dialect in Dialect::ALL {
            for function in FunctionId::ALL {
                assert!(registry.supports(function, dialect), "{function} on {dialect}");
            }
        }
        assert_eq!(registry.backends().count(), Dialect::ALL.len());
    }

    #[test]
    fn test_backend_entry_then_default() {
        let registry = DialectRegistry::standard().unwrap();
        let length = registry.lookup(FunctionId::Length, Dialect::MySQL).unwrap();
        assert_eq!(length.template().source(), "CHAR_LENGTH({0})");

        let length = registry.lookup(FunctionId::Length, Dialect::PostgreSQL).unwrap();
        assert_eq!(length.template().source(), "LENGTH({0})");
        assert!(registry.backend_entry(FunctionId::Length, Dialect::PostgreSQL).is_none());
    }

    #[test]
    fn test_greatest_null_policies() {
        let registry = DialectRegistry::standard().unwrap();
        assert_eq!(
            registry.null_policy(FunctionId::Greatest, Dialect::PostgreSQL),
            Some(NullPolicy::SkipNulls)
        );
        assert_eq!(
            registry.null_policy(FunctionId::Greatest, Dialect::MySQL),
            Some(NullPolicy::PropagateAnyNull)
        );
        assert_eq!(
            registry.null_policy(FunctionId::Concat, Dialect::SQLite),
            Some(NullPolicy::CoerceNullToEmpty)
        );
    }

    #[test]
    fn test_unknown_backend_rejected_at_build() {
        let err = DialectRegistry::builder()
            .with_defaults()
            .with_backend("oracle")
            .build()
            .unwrap_err();
        assert!(matches!(err, DialectError::UnknownBackend(_)));

        let err = DialectRegistry::builder()
            .with_override(Some("db2"), QuirkDef::new(FunctionId::Now, "CURRENT TIMESTAMP"))
            .build()
            .unwrap_err();
        assert!(matches!(err, DialectError::UnknownBackend(_)));
    }

    #[test]
    fn test_backend_aliases() {
        let registry = DialectRegistry::builder()
            .with_backend("postgres")
            .with_backend("mssql")
            .build()
            .unwrap();
        let backends: Vec<_> = registry.backends().collect();
        assert_eq!(backends, vec![Dialect::PostgreSQL, Dialect::SqlServer]);
    }

    #[test]
    fn test_override_wins_over_builtin() {
        let registry = DialectRegistry::builder()
            .with_defaults()
            .with_override(Some("sqlite"), QuirkDef::new(FunctionId::Now, "DATETIME('now')"))
            .with_all_backends()
            .build()
            .unwrap();
        assert_eq!(
            registry
                .lookup(FunctionId::Now, Dialect::SQLite)
                .unwrap()
                .template()
                .source(),
            "DATETIME('now')"
        );
    }

    #[test]
    fn test_override_default_entry() {
        let registry = DialectRegistry::builder()
            .with_defaults()
            .with_override(None, QuirkDef::new(FunctionId::Length, "CHARACTER_LENGTH({0})"))
            .build()
            .unwrap();
        assert_eq!(
            registry.default_entry(FunctionId::Length).unwrap().template().source(),
            "CHARACTER_LENGTH({0})"
        );
    }

    #[test]
    fn test_invalid_override_rejected() {
        let err = DialectRegistry::builder()
            .with_override(Some("mysql"), QuirkDef::new(FunctionId::Lower, "LOWER({0}"))
            .build()
            .unwrap_err();
        assert!(matches!(err, DialectError::InvalidTemplate { .. }));
    }

    #[test]
    fn test_empty_registry() {
        let registry = DialectRegistry::builder().build().unwrap();
        assert!(registry.is_empty());
        assert!(!registry.supports(FunctionId::Coalesce, Dialect::MySQL));
    }
}
