// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! SQL-specific test helpers and custom assertions

use sqlexpr_ir::{BaseType, ResolvedType, Value};

/// Custom assertion helpers for SQL testing
pub struct SqlAssertions;

impl SqlAssertions {
    /// Assert that two SQL fragments are equal modulo whitespace runs
    pub fn assert_sql_eq(actual: &str, expected: &str) {
        assert_eq!(
            Self::normalize(actual),
            Self::normalize(expected),
            "SQL mismatch:\n  actual:   {}\n  expected: {}",
            actual,
            expected
        );
    }

    /// Assert that a SQL fragment contains `needle`
    pub fn assert_sql_contains(sql: &str, needle: &str) {
        assert!(
            Self::normalize(sql).contains(&Self::normalize(needle)),
            "Expected SQL to contain '{}', found '{}'",
            needle,
            sql
        );
    }

    /// Assert that a SQL fragment carries no inlined string literal
    pub fn assert_no_inline_strings(sql: &str, params: &[Value]) {
        for param in params {
            if let Value::String(s) = param {
                assert!(
                    s.is_empty() || !sql.contains(s.as_str()),
                    "Parameter '{}' leaked into SQL text: {}",
                    s,
                    sql
                );
            }
        }
    }

    /// Assert the number of `?` placeholders
    pub fn assert_question_marks(sql: &str, count: usize) {
        assert_eq!(
            sql.matches('?').count(),
            count,
            "Placeholder count mismatch in: {}",
            sql
        );
    }

    /// Assert that the `$n` placeholders appear as `$1..=$count` in order
    pub fn assert_numbered_placeholders(sql: &str, prefix: &str, count: usize) {
        let mut rest = sql;
        for index in 1..=count {
            let marker = format!("{prefix}{index}");
            let pos = rest
                .find(&marker)
                .unwrap_or_else(|| panic!("Missing placeholder {} in: {}", marker, sql));
            rest = &rest[pos + marker.len()..];
        }
        assert!(
            !rest.contains(&format!("{prefix}{}", count + 1)),
            "Unexpected extra placeholder in: {}",
            sql
        );
    }

    /// Assert that a resolved type has the given base and nullability
    pub fn assert_resolved_type(ty: Option<ResolvedType>, base: BaseType, nullable: bool) {
        let ty = ty.unwrap_or_else(|| panic!("Expected a resolved type, found none"));
        assert_eq!(ty.base, base, "Base type mismatch for {}", ty);
        assert_eq!(ty.nullable, nullable, "Nullability mismatch for {}", ty);
    }

    fn normalize(sql: &str) -> String {
        sql.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}
