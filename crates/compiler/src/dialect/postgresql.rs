// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! PostgreSQL function forms
//!
//! - `CONCAT` ignores NULL arguments
//! - `GREATEST`/`LEAST` ignore NULL arguments
//! - `NOW()` is fixed per transaction, so the statement timestamp is used

use sqlexpr_ir::FunctionId;

use crate::dialect::quirk::{NullPolicy, QuirkDef};

pub const QUIRKS: &[QuirkDef<'static>] = &[
    QuirkDef::new(FunctionId::Concat, "CONCAT({args})").null_policy(NullPolicy::SkipNulls),
    QuirkDef::new(FunctionId::Greatest, "GREATEST({args})").null_policy(NullPolicy::SkipNulls),
    QuirkDef::new(FunctionId::Least, "LEAST({args})").null_policy(NullPolicy::SkipNulls),
    QuirkDef::new(FunctionId::Now, "STATEMENT_TIMESTAMP()"),
];
