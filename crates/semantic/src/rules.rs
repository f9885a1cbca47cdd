// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! Per-function result-type rules
//!
//! | function | base | nullable |
//! |---|---|---|
//! | COALESCE | first argument base | every argument nullable |
//! | CONCAT | text | never |
//! | GREATEST, LEAST | unified argument base | any argument nullable |
//! | LENGTH | integer | argument nullable |
//! | LOWER, UPPER, SUBSTR | text | argument nullable |
//! | NOW | datetime | never |
//! | COUNT | integer | never |
//! | SUM | argument base | always |
//! | AVG | decimal | always |
//! | MIN, MAX | argument base | always |
//!
//! GREATEST/LEAST use the strict "any NULL propagates" policy at the type
//! level. Backends that skip NULLs produce a subset of these outcomes.

use sqlexpr_ir::{BaseType, FunctionId, ResolvedType};

/// Why a rule rejected its argument types
pub(crate) type RuleViolation = String;

/// Infer the result type of `function` applied to `args`
pub(crate) fn infer(
    function: FunctionId,
    args: &[ResolvedType],
) -> Result<ResolvedType, RuleViolation> {
    match function {
        FunctionId::Coalesce => {
            unify_all(args)?;
            let first = args
                .first()
                .ok_or_else(|| "expected at least one argument".to_string())?;
            Ok(ResolvedType::new(first.base).with_nullable(args.iter().all(|a| a.nullable)))
        }
        FunctionId::Concat => {
            for (i, arg) in args.iter().enumerate() {
                expect_text(i, arg)?;
            }
            Ok(ResolvedType::text())
        }
        FunctionId::Greatest | FunctionId::Least => {
            let base = unify_all(args)?;
            Ok(ResolvedType::new(base).with_nullable(any_nullable(args)))
        }
        FunctionId::Length => {
            let arg = single(args)?;
            expect_text(0, arg)?;
            Ok(ResolvedType::integer().with_nullable(arg.nullable))
        }
        FunctionId::Lower | FunctionId::Upper => {
            let arg = single(args)?;
            expect_text(0, arg)?;
            Ok(ResolvedType::text().with_nullable(arg.nullable))
        }
        FunctionId::Substr => {
            let (text, rest) = args
                .split_first()
                .ok_or_else(|| "missing text argument".to_string())?;
            expect_text(0, text)?;
            for (i, arg) in rest.iter().enumerate() {
                if arg.base != BaseType::Integer {
                    return Err(format!(
                        "argument {} must be integer, found {}",
                        i + 2,
                        arg.base
                    ));
                }
            }
            Ok(ResolvedType::text().with_nullable(any_nullable(args)))
        }
        FunctionId::Now => Ok(ResolvedType::datetime()),
        FunctionId::Count => {
            single(args)?;
            Ok(ResolvedType::integer())
        }
        FunctionId::Sum | FunctionId::Avg => {
            let arg = single(args)?;
            if !arg.base.is_numeric() {
                return Err(format!("argument 1 must be numeric, found {}", arg.base));
            }
            let base = if function == FunctionId::Avg {
                BaseType::Decimal
            } else {
                arg.base
            };
            // empty groups yield NULL
            Ok(ResolvedType::new(base).nullable())
        }
        FunctionId::Min | FunctionId::Max => {
            let arg = single(args)?;
            Ok(ResolvedType::new(arg.base).nullable())
        }
    }
}

/// Check a caller-declared output type against the inferred one.
///
/// The declaration may widen nullability but not narrow it. Its base must
/// equal the inferred base or widen it from integer to decimal.
pub(crate) fn check_override(
    inferred: ResolvedType,
    declared: ResolvedType,
) -> Result<ResolvedType, RuleViolation> {
    if declared.admits(&inferred) {
        Ok(declared)
    } else {
        Err(format!(
            "declared output type {declared} does not admit inferred type {inferred}"
        ))
    }
}

fn unify_all(args: &[ResolvedType]) -> Result<BaseType, RuleViolation> {
    let (first, rest) = args
        .split_first()
        .ok_or_else(|| "expected at least one argument".to_string())?;
    rest.iter()
        .enumerate()
        .try_fold(first.base, |acc, (i, arg)| {
            acc.unify(arg.base).ok_or_else(|| {
                format!(
                    "argument {} has type {}, incompatible with {}",
                    i + 2,
                    arg.base,
                    acc
                )
            })
        })
}

fn any_nullable(args: &[ResolvedType]) -> bool {
    args.iter().any(|a| a.nullable)
}

fn single(args: &[ResolvedType]) -> Result<&ResolvedType, RuleViolation> {
    match args {
        [arg] => Ok(arg),
        _ => Err(format!("expected 1 argument, found {}", args.len())),
    }
}

fn expect_text(index: usize, arg: &ResolvedType) -> Result<(), RuleViolation> {
    if arg.base.is_text() {
        Ok(())
    } else {
        Err(format!(
            "argument {} must be text, found {}",
            index + 1,
            arg.base
        ))
    }
}
