// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Engine Configuration
//!
//! This module provides configuration management for the engine.
//!
//! ## Configuration Structure
//!
//! The engine configuration includes:
//! - Target backend name (`postgresql`, `mysql`, `sqlite`, `sqlserver`, `firebird`)
//! - Maximum expression nesting depth
//! - Function entry overrides applied on top of the builtin backend tables
//!
//! ## Example
//!
//! ```rust,ignore
//! use sqlexpr::EngineConfig;
//!
//! let config = EngineConfig::from_yaml_str(r#"
//! dialect: sqlite
//! max_depth: 64
//! overrides:
//!   - function: now
//!     backend: sqlite
//!     template: "DATETIME('now')"
//! "#)?;
//! config.validate()?;
//! ```

use serde::{Deserialize, Serialize};
use sqlexpr_compiler::{
    DEFAULT_MAX_DEPTH, DEFAULT_SEPARATOR, DialectError, DialectRegistry, NullPolicy, QuirkDef,
};
use sqlexpr_ir::{Dialect, FunctionId};

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Backend compiled for by default, by name or alias
    pub dialect: String,

    /// Maximum expression nesting depth
    pub max_depth: usize,

    /// Function entries replacing builtin ones
    pub overrides: Vec<QuirkOverride>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::PostgreSQL.name().to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            overrides: Vec::new(),
        }
    }
}

/// One replaced registry entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuirkOverride {
    /// Function name, case-insensitive
    pub function: String,

    /// Backend name; absent replaces the default entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,

    pub template: String,

    /// Separator for `{args}`, `", "` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,

    /// SUBSTR form without a length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_template: Option<String>,

    /// Length used to synthesize SUBSTR without a length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_bound: Option<String>,

    /// Defaults to `coerce_null_to_empty` when a wrapper is given,
    /// otherwise `propagate_any_null`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub null_policy: Option<NullPolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub null_wrapper: Option<String>,
}

impl QuirkOverride {
    pub fn new(function: FunctionId, template: impl Into<String>) -> Self {
        Self {
            function: function.name().to_string(),
            backend: None,
            template: template.into(),
            separator: None,
            rest_template: None,
            length_bound: None,
            null_policy: None,
            null_wrapper: None,
        }
    }

    pub fn for_backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = Some(backend.into());
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    pub fn with_rest_template(mut self, template: impl Into<String>) -> Self {
        self.rest_template = Some(template.into());
        self
    }

    pub fn with_length_bound(mut self, template: impl Into<String>) -> Self {
        self.length_bound = Some(template.into());
        self
    }

    pub fn with_null_policy(mut self, policy: NullPolicy) -> Self {
        self.null_policy = Some(policy);
        self
    }

    pub fn with_null_wrapper(mut self, wrapper: impl Into<String>) -> Self {
        self.null_wrapper = Some(wrapper.into());
        self
    }

    /// Borrow as a registry definition
    pub fn as_def(&self) -> Result<QuirkDef<'_>, ConfigError> {
        let function: FunctionId = self
            .function
            .parse()
            .map_err(|_| ConfigError::UnknownFunction(self.function.clone()))?;
        let null_policy = self.null_policy.unwrap_or(if self.null_wrapper.is_some() {
            NullPolicy::CoerceNullToEmpty
        } else {
            NullPolicy::PropagateAnyNull
        });

        Ok(QuirkDef {
            function,
            template: &self.template,
            separator: self.separator.as_deref().unwrap_or(DEFAULT_SEPARATOR),
            rest_template: self.rest_template.as_deref(),
            length_bound: self.length_bound.as_deref(),
            null_policy,
            null_wrapper: self.null_wrapper.as_deref(),
        })
    }
}

impl EngineConfig {
    /// Create a configuration targeting `dialect`
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect: dialect.name().to_string(),
            ..Default::default()
        }
    }

    pub fn with_dialect(mut self, dialect: impl Into<String>) -> Self {
        self.dialect = dialect.into();
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_override(mut self, quirk: QuirkOverride) -> Self {
        self.overrides.push(quirk);
        self
    }

    /// Parse a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// The configured backend
    pub fn target_dialect(&self) -> Result<Dialect, ConfigError> {
        self.dialect
            .parse()
            .map_err(|e| ConfigError::Dialect(DialectError::UnknownBackend(e)))
    }

    /// Build the registry described by this configuration:
    /// defaults, every builtin backend, then the overrides
    pub fn build_registry(&self) -> Result<DialectRegistry, ConfigError> {
        let defs = self
            .overrides
            .iter()
            .map(|o| Ok((o.backend.as_deref(), o.as_def()?)))
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let builder = DialectRegistry::builder().with_defaults().with_all_backends();
        let builder = defs
            .into_iter()
            .fold(builder, |builder, (backend, def)| builder.with_override(backend, def));
        Ok(builder.build()?)
    }

    /// Validate the configuration
    ///
    /// Checks that:
    /// - The backend name is known
    /// - The depth limit is positive
    /// - Every override names a known function and backend, and its
    ///   templates are well-formed for that function
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.target_dialect()?;
        if self.max_depth == 0 {
            return Err(ConfigError::InvalidMaxDepth(self.max_depth));
        }
        self.build_registry()?;
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Depth limit that admits no expression
    #[error("Invalid max_depth: {0} (must be > 0)")]
    InvalidMaxDepth(usize),

    /// Override names an unknown function
    #[error("Unknown function '{0}' in override")]
    UnknownFunction(String),

    /// Backend or template error
    #[error(transparent)]
    Dialect(#[from] DialectError),

    /// Malformed JSON or YAML document
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.target_dialect(), Ok(Dialect::PostgreSQL));
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_from_json() {
        let config = EngineConfig::from_json_str(
            r#"{
                "dialect": "mssql",
                "overrides": [
                    {"function": "length", "backend": "sqlserver", "template": "DATALENGTH({0})"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(config.target_dialect(), Ok(Dialect::SqlServer));
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);

        let registry = config.build_registry().unwrap();
        let entry = registry.lookup(FunctionId::Length, Dialect::SqlServer).unwrap();
        assert_eq!(entry.template().source(), "DATALENGTH({0})");
    }

    #[test]
    fn test_from_yaml_with_coercion() {
        let config = EngineConfig::from_yaml_str(
            r#"
dialect: postgresql
max_depth: 16
overrides:
  - function: CONCAT
    backend: postgresql
    template: "({args})"
    separator: " || "
    null_wrapper: "COALESCE({0}, '')"
"#,
        )
        .unwrap();
        assert_eq!(config.max_depth, 16);

        let registry = config.build_registry().unwrap();
        assert_eq!(
            registry.null_policy(FunctionId::Concat, Dialect::PostgreSQL),
            Some(NullPolicy::CoerceNullToEmpty)
        );
    }

    #[test]
    fn test_validate_rejects() {
        let err = EngineConfig::default().with_dialect("oracle").validate().unwrap_err();
        assert!(matches!(err, ConfigError::Dialect(DialectError::UnknownBackend(_))));

        let err = EngineConfig::default().with_max_depth(0).validate().unwrap_err();
        assert_eq!(err, ConfigError::InvalidMaxDepth(0));

        let err = EngineConfig::default()
            .with_override(QuirkOverride {
                function: "concat_ws".to_string(),
                ..QuirkOverride::new(FunctionId::Concat, "CONCAT_WS({args})")
            })
            .validate()
            .unwrap_err();
        assert_eq!(err, ConfigError::UnknownFunction("concat_ws".to_string()));

        let err = EngineConfig::default()
            .with_override(QuirkOverride::new(FunctionId::Lower, "LOWER({1})").for_backend("mysql"))
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Dialect(DialectError::InvalidTemplate { .. })));
    }

    #[test]
    fn test_length_bound_override() {
        let config = EngineConfig::from_yaml_str(
            r#"
dialect: sqlserver
overrides:
  - function: substr
    backend: sqlserver
    template: "SUBSTRING({0}, {1}, {2})"
    length_bound: "LEN({0} + 'x')"
"#,
        )
        .unwrap();
        let registry = config.build_registry().unwrap();
        let entry = registry.lookup(FunctionId::Substr, Dialect::SqlServer).unwrap();
        assert_eq!(entry.length_bound().unwrap().source(), "LEN({0} + 'x')");

        let err = EngineConfig::new(Dialect::SqlServer)
            .with_override(
                QuirkOverride::new(FunctionId::Lower, "LOWER({0})")
                    .for_backend("sqlserver")
                    .with_length_bound("DATALENGTH({0})"),
            )
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Dialect(DialectError::InvalidQuirk { .. })));
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(
            EngineConfig::from_json_str("{\"max_depth\": -1}"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_roundtrip_skips_empty_fields() {
        let config = EngineConfig::new(Dialect::SQLite).with_override(
            QuirkOverride::new(FunctionId::Now, "DATETIME('now')").for_backend("sqlite"),
        );
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("null_wrapper"));
        assert_eq!(EngineConfig::from_json_str(&json).unwrap(), config);
    }
}
