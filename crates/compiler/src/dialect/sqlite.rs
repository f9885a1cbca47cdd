// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! SQLite function forms
//!
//! SQLite concatenates with `||`, which yields NULL for any NULL operand, so
//! nullable operands are coerced to empty text. Multi-argument `MAX`/`MIN`
//! are the scalar GREATEST/LEAST.

use sqlexpr_ir::FunctionId;

use crate::dialect::quirk::QuirkDef;

pub const QUIRKS: &[QuirkDef<'static>] = &[
    QuirkDef::new(FunctionId::Concat, "({args})")
        .separator(" || ")
        .coerce_nulls("COALESCE({0}, '')"),
    QuirkDef::new(FunctionId::Greatest, "MAX({args})"),
    QuirkDef::new(FunctionId::Least, "MIN({args})"),
    QuirkDef::new(FunctionId::Substr, "SUBSTR({0}, {1}, {2})").rest_template("SUBSTR({0}, {1})"),
    QuirkDef::new(FunctionId::Now, "STRFTIME('%Y-%m-%d %H:%M:%f', 'NOW')"),
];
