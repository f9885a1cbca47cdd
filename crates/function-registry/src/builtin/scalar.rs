// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Scalar function constructors
//!
//! ```rust,ignore
//! use sqlexpr_function_registry::builtin::scalar::{coalesce, upper};
//! use sqlexpr_ir::Expr;
//!
//! let display = coalesce([Expr::field("alias"), upper(Expr::field("name"))?])?;
//! ```

use crate::{Expr, ExprResult, FunctionId, FunctionSignature};

/// `COALESCE(a, b, ...)`: the first non-null argument
pub fn coalesce(args: impl IntoIterator<Item = Expr>) -> ExprResult<Expr> {
    Expr::call(FunctionId::Coalesce, args.into_iter().collect())
}

/// `CONCAT(a, b, ...)`: text concatenation that treats NULL as empty text
pub fn concat(args: impl IntoIterator<Item = Expr>) -> ExprResult<Expr> {
    Expr::call(FunctionId::Concat, args.into_iter().collect())
}

/// `GREATEST(a, b, ...)`
pub fn greatest(args: impl IntoIterator<Item = Expr>) -> ExprResult<Expr> {
    Expr::call(FunctionId::Greatest, args.into_iter().collect())
}

/// `LEAST(a, b, ...)`
pub fn least(args: impl IntoIterator<Item = Expr>) -> ExprResult<Expr> {
    Expr::call(FunctionId::Least, args.into_iter().collect())
}

/// `LENGTH(a)`: number of characters
pub fn length(arg: Expr) -> ExprResult<Expr> {
    Expr::call(FunctionId::Length, vec![arg])
}

pub fn lower(arg: Expr) -> ExprResult<Expr> {
    Expr::call(FunctionId::Lower, vec![arg])
}

pub fn upper(arg: Expr) -> ExprResult<Expr> {
    Expr::call(FunctionId::Upper, vec![arg])
}

/// `SUBSTR(arg, pos[, length])` with 1-based `pos`.
///
/// Literal positions must be integers >= 1 and literal lengths integers >= 0;
/// anything else fails with [`crate::ExprError::Domain`]. Non-literal positions are
/// left to the backend.
pub fn substr(arg: Expr, pos: Expr, length: Option<Expr>) -> ExprResult<Expr> {
    let mut args = vec![arg, pos];
    args.extend(length);
    Expr::call(FunctionId::Substr, args)
}

/// `NOW()`: the current timestamp
pub fn now() -> ExprResult<Expr> {
    Expr::call(FunctionId::Now, Vec::new())
}

pub(crate) fn signatures() -> Vec<FunctionSignature> {
    vec![
        FunctionSignature::new(FunctionId::Coalesce)
            .with_parameters(&["expression", "expression", "..."])
            .with_description("Return first non-null value")
            .with_example("COALESCE(alias, goes_by, name)"),
        FunctionSignature::new(FunctionId::Concat)
            .with_parameters(&["text", "text", "..."])
            .with_description("Concatenate strings, treating NULL as empty text"),
        FunctionSignature::new(FunctionId::Greatest)
            .with_parameters(&["expression", "expression", "..."])
            .with_description("Return largest value"),
        FunctionSignature::new(FunctionId::Least)
            .with_parameters(&["expression", "expression", "..."])
            .with_description("Return smallest value"),
        FunctionSignature::new(FunctionId::Length)
            .with_parameters(&["text"])
            .with_description("Number of characters"),
        FunctionSignature::new(FunctionId::Lower)
            .with_parameters(&["text"])
            .with_description("Convert to lowercase"),
        FunctionSignature::new(FunctionId::Upper)
            .with_parameters(&["text"])
            .with_description("Convert to uppercase"),
        FunctionSignature::new(FunctionId::Substr)
            .with_parameters(&["text", "position", "length?"])
            .with_description("Extract substring starting at a 1-based position")
            .with_example("SUBSTR(name, 1, 5)"),
        FunctionSignature::new(FunctionId::Now).with_description("Current timestamp"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExprError;

    #[test]
    fn test_coalesce_requires_two_arguments() {
        let err = coalesce([Expr::field("a")]).unwrap_err();
        assert!(matches!(
            err,
            ExprError::Arity {
                function: FunctionId::Coalesce,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_concat_three_arguments() {
        let expr = concat([Expr::field("a"), Expr::field("b"), Expr::field("c")]).unwrap();
        assert_eq!(expr.children().len(), 3);
    }

    #[test]
    fn test_greatest_and_least_arity() {
        assert!(greatest([Expr::field("a")]).is_err());
        assert!(least(Vec::new()).is_err());
        assert!(least([Expr::field("a"), Expr::integer(3)]).is_ok());
    }

    #[test]
    fn test_substr_position_domain() {
        let zero = substr(Expr::field("name"), Expr::integer(0), None).unwrap_err();
        assert!(matches!(zero, ExprError::Domain { .. }));
        assert!(substr(Expr::field("name"), Expr::integer(-3), None).is_err());
        assert!(substr(Expr::field("name"), Expr::integer(1), None).is_ok());
    }

    #[test]
    fn test_substr_non_integer_position() {
        assert!(substr(Expr::field("name"), Expr::decimal(1.5), None).is_err());
        assert!(substr(Expr::field("name"), Expr::text("1"), None).is_err());
    }

    #[test]
    fn test_substr_dynamic_position_unchecked() {
        let expr = substr(Expr::field("name"), Expr::field("start"), None).unwrap();
        assert_eq!(expr.children().len(), 2);
    }

    #[test]
    fn test_substr_length() {
        assert!(substr(Expr::field("name"), Expr::integer(1), Some(Expr::integer(5))).is_ok());
        assert!(substr(Expr::field("name"), Expr::integer(1), Some(Expr::integer(0))).is_ok());
        assert!(substr(Expr::field("name"), Expr::integer(1), Some(Expr::integer(-1))).is_err());
    }

    #[test]
    fn test_now_has_no_arguments() {
        assert!(now().unwrap().children().is_empty());
    }
}
