// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Firebird function forms
//!
//! Firebird has no comma-separated `SUBSTRING`; it uses `FROM`/`FOR`.
//! `||` propagates NULL, and `MAXVALUE`/`MINVALUE` stand in for
//! GREATEST/LEAST.

use sqlexpr_ir::FunctionId;

use crate::dialect::quirk::{NullPolicy, QuirkDef};

pub const QUIRKS: &[QuirkDef<'static>] = &[
    QuirkDef::new(FunctionId::Concat, "({args})")
        .separator(" || ")
        .coerce_nulls("COALESCE({0}, '')"),
    QuirkDef::new(FunctionId::Greatest, "MAXVALUE({args})"),
    QuirkDef::new(FunctionId::Least, "MINVALUE({args})"),
    QuirkDef::new(FunctionId::Length, "CHAR_LENGTH({0})"),
    QuirkDef::new(FunctionId::Substr, "SUBSTRING({0} FROM {1} FOR {2})")
        .rest_template("SUBSTRING({0} FROM {1})"),
    QuirkDef::new(FunctionId::Avg, "AVG({distinct}CAST({0} AS DOUBLE PRECISION))")
        .null_policy(NullPolicy::SkipNulls),
];
