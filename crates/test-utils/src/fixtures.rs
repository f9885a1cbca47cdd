// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Test fixtures and sample expression trees
//!
//! Trees are built against the people schema of
//! [`MockSchemaBuilder::with_people_schema`](crate::MockSchemaBuilder::with_people_schema).

use sqlexpr_ir::{Expr, FunctionId};

/// Sample expression trees for testing
pub struct ExprFixtures;

impl ExprFixtures {
    // ===== Fallback chains =====

    /// `COALESCE(alias, goes_by, 'Unknown')`
    pub fn display_name() -> Expr {
        Self::call(
            FunctionId::Coalesce,
            vec![
                Expr::field("alias"),
                Expr::field("goes_by"),
                Expr::text("Unknown"),
            ],
        )
    }

    /// `COALESCE(alias, goes_by)`; every argument nullable
    pub fn nullable_fallback() -> Expr {
        Self::call(
            FunctionId::Coalesce,
            vec![Expr::field("alias"), Expr::field("goes_by")],
        )
    }

    // ===== Concatenation =====

    /// `CONCAT(name, ' (', alias, ')')`
    pub fn name_with_alias() -> Expr {
        Self::call(
            FunctionId::Concat,
            vec![
                Expr::field("name"),
                Expr::text(" ("),
                Expr::field("alias"),
                Expr::text(")"),
            ],
        )
    }

    // ===== String functions =====

    /// `UPPER(SUBSTR(name, 1, 3))`
    pub fn name_prefix() -> Expr {
        let substr = Self::call(
            FunctionId::Substr,
            vec![Expr::field("name"), Expr::integer(1), Expr::integer(3)],
        );
        Self::call(FunctionId::Upper, vec![substr])
    }

    /// `SUBSTR(name, 2)`
    pub fn name_tail() -> Expr {
        Self::call(FunctionId::Substr, vec![Expr::field("name"), Expr::integer(2)])
    }

    /// `LENGTH(LOWER(alias))`
    pub fn alias_length() -> Expr {
        let lower = Self::call(FunctionId::Lower, vec![Expr::field("alias")]);
        Self::call(FunctionId::Length, vec![lower])
    }

    // ===== Comparisons =====

    /// `GREATEST(age, score, 18)`
    pub fn greatest_score() -> Expr {
        Self::call(
            FunctionId::Greatest,
            vec![Expr::field("age"), Expr::field("score"), Expr::integer(18)],
        )
    }

    /// `LEAST(height, 2.5)`; integer and decimal unify to decimal
    pub fn least_height() -> Expr {
        Self::call(
            FunctionId::Least,
            vec![Expr::field("height"), Expr::decimal(2.5)],
        )
    }

    /// `GREATEST(name, age)`; text and integer do not unify
    pub fn mismatched_greatest() -> Expr {
        Self::call(
            FunctionId::Greatest,
            vec![Expr::field("name"), Expr::field("age")],
        )
    }

    // ===== Temporal =====

    /// `COALESCE(joined_at, NOW())`
    pub fn joined_or_now() -> Expr {
        let now = Self::call(FunctionId::Now, vec![]);
        Self::call(FunctionId::Coalesce, vec![Expr::field("joined_at"), now])
    }

    /// A chain of `depth` nested `LOWER` calls around `name`
    pub fn nested_lower(depth: usize) -> Expr {
        (0..depth).fold(Expr::field("name"), |inner, _| {
            Self::call(FunctionId::Lower, vec![inner])
        })
    }

    fn call(function: FunctionId, args: Vec<Expr>) -> Expr {
        match Expr::call(function, args) {
            Ok(expr) => expr,
            Err(err) => panic!("invalid fixture {function}: {err}"),
        }
    }
}
