// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! SQL Server function forms
//!
//! `SUBSTRING` always takes a length; the compiler synthesizes the
//! "rest of string" form with `DATALENGTH`, since `LEN` ignores trailing
//! blanks. `AVG` over integers truncates, so the argument is cast first.

use sqlexpr_ir::FunctionId;

use crate::dialect::quirk::{NullPolicy, QuirkDef};

pub const QUIRKS: &[QuirkDef<'static>] = &[
    QuirkDef::new(FunctionId::Concat, "CONCAT({args})").null_policy(NullPolicy::SkipNulls),
    QuirkDef::new(FunctionId::Greatest, "GREATEST({args})").null_policy(NullPolicy::SkipNulls),
    QuirkDef::new(FunctionId::Least, "LEAST({args})").null_policy(NullPolicy::SkipNulls),
    QuirkDef::new(FunctionId::Length, "LEN({0})"),
    QuirkDef::new(FunctionId::Substr, "SUBSTRING({0}, {1}, {2})").length_bound("DATALENGTH({0})"),
    QuirkDef::new(FunctionId::Now, "SYSDATETIME()"),
    QuirkDef::new(FunctionId::Avg, "AVG({distinct}CAST({0} AS DECIMAL(38, 10)))")
        .null_policy(NullPolicy::SkipNulls),
];
