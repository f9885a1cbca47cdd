// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Per-function backend behavior

use serde::{Deserialize, Serialize};
use sqlexpr_ir::{Arity, FunctionId};

use crate::dialect::template::{DEFAULT_SEPARATOR, SqlTemplate};
use crate::error::{DialectError, DialectResult};

/// How a function's result depends on NULL arguments on a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullPolicy {
    /// Any NULL argument makes the result NULL
    PropagateAnyNull,
    /// NULL arguments are ignored
    SkipNulls,
    /// Nullable arguments are wrapped so NULL becomes empty text
    CoerceNullToEmpty,
}

/// Unparsed registry entry
///
/// Builtin backend tables are written as `const` arrays of definitions and
/// parsed once, when the registry is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuirkDef<'a> {
    pub function: FunctionId,
    pub template: &'a str,
    pub separator: &'a str,
    pub rest_template: Option<&'a str>,
    pub length_bound: Option<&'a str>,
    pub null_policy: NullPolicy,
    pub null_wrapper: Option<&'a str>,
}

impl<'a> QuirkDef<'a> {
    pub const fn new(function: FunctionId, template: &'a str) -> Self {
        Self {
            function,
            template,
            separator: DEFAULT_SEPARATOR,
            rest_template: None,
            length_bound: None,
            null_policy: NullPolicy::PropagateAnyNull,
            null_wrapper: None,
        }
    }

    pub const fn separator(mut self, separator: &'a str) -> Self {
        self.separator = separator;
        self
    }

    /// Form used by SUBSTR when no length is given
    pub const fn rest_template(mut self, template: &'a str) -> Self {
        self.rest_template = Some(template);
        self
    }

    /// Upper bound on the character count of `{0}`, never negative.
    ///
    /// Used as the length when SUBSTR without a length is synthesized on a
    /// backend with no rest-of-string form. Defaults to the backend's LENGTH.
    pub const fn length_bound(mut self, template: &'a str) -> Self {
        self.length_bound = Some(template);
        self
    }

    pub const fn null_policy(mut self, policy: NullPolicy) -> Self {
        self.null_policy = policy;
        self
    }

    /// Coerce NULL arguments to empty text with `wrapper`
    pub const fn coerce_nulls(mut self, wrapper: &'a str) -> Self {
        self.null_policy = NullPolicy::CoerceNullToEmpty;
        self.null_wrapper = Some(wrapper);
        self
    }

    /// Parse and validate against the function's arity
    pub fn build(&self, backend: &str) -> DialectResult<QuirkEntry> {
        let invalid = |message: String| DialectError::InvalidQuirk {
            function: self.function,
            backend: backend.to_string(),
            message,
        };

        let template = SqlTemplate::with_separator(self.template, self.separator)?;
        let rest_template = self.rest_template.map(SqlTemplate::parse).transpose()?;
        let length_bound = self.length_bound.map(SqlTemplate::parse).transpose()?;
        let null_wrapper = self.null_wrapper.map(SqlTemplate::parse).transpose()?;

        match self.function.arity() {
            Arity::Exactly(n) => template.check_arg_count(n)?,
            Arity::AtLeast(_) if !template.is_variadic() => {
                return Err(invalid(format!(
                    "variadic function requires {{args}}, found '{template}'"
                )));
            }
            Arity::AtLeast(_) => {}
            Arity::Range(min, max) => {
                template.check_arg_count(max)?;
                if let Some(rest) = &rest_template {
                    rest.check_arg_count(min)?;
                }
            }
        }

        let has_optional_arg = matches!(self.function.arity(), Arity::Range(..));
        if rest_template.is_some() && !has_optional_arg {
            return Err(invalid(
                "only functions with an optional argument take a rest template".into(),
            ));
        }
        if let Some(bound) = &length_bound {
            if !has_optional_arg {
                return Err(invalid(
                    "only functions with an optional argument take a length bound".into(),
                ));
            }
            bound.check_arg_count(1)?;
        }

        if self.function.is_aggregate() != template.has_distinct() {
            return Err(invalid(if self.function.is_aggregate() {
                format!("aggregate template '{template}' lacks {{distinct}}")
            } else {
                format!("scalar template '{template}' cannot use {{distinct}}")
            }));
        }

        match (self.null_policy, &null_wrapper) {
            (NullPolicy::CoerceNullToEmpty, None) => {
                return Err(invalid("null coercion requires a wrapper template".into()));
            }
            (NullPolicy::CoerceNullToEmpty, Some(_)) if self.function != FunctionId::Concat => {
                return Err(invalid("null coercion applies to CONCAT only".into()));
            }
            (NullPolicy::CoerceNullToEmpty, Some(wrapper)) => wrapper.check_arg_count(1)?,
            (_, Some(_)) => {
                return Err(invalid("wrapper template without null coercion".into()));
            }
            (_, None) => {}
        }

        Ok(QuirkEntry {
            template,
            rest_template,
            length_bound,
            null_policy: self.null_policy,
            null_wrapper,
        })
    }
}

/// Validated registry entry for one function on one backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuirkEntry {
    template: SqlTemplate,
    rest_template: Option<SqlTemplate>,
    length_bound: Option<SqlTemplate>,
    null_policy: NullPolicy,
    null_wrapper: Option<SqlTemplate>,
}

impl QuirkEntry {
    /// Full-arity form
    pub fn template(&self) -> &SqlTemplate {
        &self.template
    }

    /// Form without the optional trailing argument, if the backend has one
    pub fn rest_template(&self) -> Option<&SqlTemplate> {
        self.rest_template.as_ref()
    }

    /// Length used when synthesizing the form without the optional argument
    pub fn length_bound(&self) -> Option<&SqlTemplate> {
        self.length_bound.as_ref()
    }

    pub fn null_policy(&self) -> NullPolicy {
        self.null_policy
    }

    /// Wrapper applied to nullable arguments under [`NullPolicy::CoerceNullToEmpty`]
    pub fn null_wrapper(&self) -> Option<&SqlTemplate> {
        self.null_wrapper.as_ref()
    }
}
