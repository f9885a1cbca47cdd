// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! MySQL function forms
//!
//! MySQL's `CONCAT` returns NULL if any argument is NULL, while `CONCAT_WS`
//! skips NULL arguments. `LENGTH` counts bytes, so character length uses
//! `CHAR_LENGTH`.

use sqlexpr_ir::FunctionId;

use crate::dialect::quirk::{NullPolicy, QuirkDef};

pub const QUIRKS: &[QuirkDef<'static>] = &[
    QuirkDef::new(FunctionId::Concat, "CONCAT_WS('', {args})").null_policy(NullPolicy::SkipNulls),
    QuirkDef::new(FunctionId::Greatest, "GREATEST({args})"),
    QuirkDef::new(FunctionId::Least, "LEAST({args})"),
    QuirkDef::new(FunctionId::Length, "CHAR_LENGTH({0})"),
    QuirkDef::new(FunctionId::Now, "CURRENT_TIMESTAMP(6)"),
];
