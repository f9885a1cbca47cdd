// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! SQL-standard forms shared by every backend
//!
//! These entries are used whenever a backend table has no entry of its own.

use sqlexpr_ir::FunctionId;

use crate::dialect::quirk::{NullPolicy, QuirkDef};

pub const QUIRKS: &[QuirkDef<'static>] = &[
    QuirkDef::new(FunctionId::Coalesce, "COALESCE({args})").null_policy(NullPolicy::SkipNulls),
    QuirkDef::new(FunctionId::Concat, "CONCAT({args})").null_policy(NullPolicy::SkipNulls),
    QuirkDef::new(FunctionId::Greatest, "GREATEST({args})"),
    QuirkDef::new(FunctionId::Least, "LEAST({args})"),
    QuirkDef::new(FunctionId::Length, "LENGTH({0})"),
    QuirkDef::new(FunctionId::Lower, "LOWER({0})"),
    QuirkDef::new(FunctionId::Upper, "UPPER({0})"),
    QuirkDef::new(FunctionId::Substr, "SUBSTRING({0}, {1}, {2})")
        .rest_template("SUBSTRING({0}, {1})"),
    QuirkDef::new(FunctionId::Now, "CURRENT_TIMESTAMP"),
    QuirkDef::new(FunctionId::Count, "COUNT({distinct}{0})").null_policy(NullPolicy::SkipNulls),
    QuirkDef::new(FunctionId::Sum, "SUM({distinct}{0})").null_policy(NullPolicy::SkipNulls),
    QuirkDef::new(FunctionId::Avg, "AVG({distinct}{0})").null_policy(NullPolicy::SkipNulls),
    QuirkDef::new(FunctionId::Min, "MIN({distinct}{0})").null_policy(NullPolicy::SkipNulls),
    QuirkDef::new(FunctionId::Max, "MAX({distinct}{0})").null_policy(NullPolicy::SkipNulls),
];
