// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Aggregate function constructors
//!
//! Aggregates compose with the same rules as scalar calls; they differ only
//! in being evaluated over a group of rows.

use crate::{Expr, ExprResult, FunctionId, FunctionSignature};

pub fn count(arg: Expr) -> ExprResult<Expr> {
    Expr::aggregate(FunctionId::Count, arg, false)
}

pub fn count_distinct(arg: Expr) -> ExprResult<Expr> {
    Expr::aggregate(FunctionId::Count, arg, true)
}

pub fn sum(arg: Expr) -> ExprResult<Expr> {
    Expr::aggregate(FunctionId::Sum, arg, false)
}

pub fn avg(arg: Expr) -> ExprResult<Expr> {
    Expr::aggregate(FunctionId::Avg, arg, false)
}

pub fn min(arg: Expr) -> ExprResult<Expr> {
    Expr::aggregate(FunctionId::Min, arg, false)
}

pub fn max(arg: Expr) -> ExprResult<Expr> {
    Expr::aggregate(FunctionId::Max, arg, false)
}

/// Any aggregate, optionally over distinct values only
pub fn aggregate(function: FunctionId, arg: Expr, distinct: bool) -> ExprResult<Expr> {
    Expr::aggregate(function, arg, distinct)
}

pub(crate) fn signatures() -> Vec<FunctionSignature> {
    vec![
        FunctionSignature::new(FunctionId::Count)
            .with_parameters(&["expression"])
            .with_description("Count the number of non-null values"),
        FunctionSignature::new(FunctionId::Sum)
            .with_parameters(&["number"])
            .with_description("Sum of values"),
        FunctionSignature::new(FunctionId::Avg)
            .with_parameters(&["number"])
            .with_description("Average of values"),
        FunctionSignature::new(FunctionId::Min)
            .with_parameters(&["expression"])
            .with_description("Minimum value"),
        FunctionSignature::new(FunctionId::Max)
            .with_parameters(&["expression"])
            .with_description("Maximum value"),
    ]
}
