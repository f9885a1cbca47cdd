// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Function identity
//!
//! Functions are identified by a closed enum rather than by name. Adding a
//! function means adding a variant here, a constructor in the function
//! registry, a resolver rule and dialect registry entries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ExprError;

/// Identity of a builtin function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionId {
    // Scalar functions
    Coalesce,
    Concat,
    Greatest,
    Least,
    Length,
    Lower,
    Upper,
    Substr,
    Now,

    // Aggregate functions
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl FunctionId {
    /// All builtin functions, scalar first
    pub const ALL: [FunctionId; 14] = [
        FunctionId::Coalesce,
        FunctionId::Concat,
        FunctionId::Greatest,
        FunctionId::Least,
        FunctionId::Length,
        FunctionId::Lower,
        FunctionId::Upper,
        FunctionId::Substr,
        FunctionId::Now,
        FunctionId::Count,
        FunctionId::Sum,
        FunctionId::Avg,
        FunctionId::Min,
        FunctionId::Max,
    ];

    /// Canonical SQL name
    pub fn name(self) -> &'static str {
        match self {
            FunctionId::Coalesce => "COALESCE",
            FunctionId::Concat => "CONCAT",
            FunctionId::Greatest => "GREATEST",
            FunctionId::Least => "LEAST",
            FunctionId::Length => "LENGTH",
            FunctionId::Lower => "LOWER",
            FunctionId::Upper => "UPPER",
            FunctionId::Substr => "SUBSTR",
            FunctionId::Now => "NOW",
            FunctionId::Count => "COUNT",
            FunctionId::Sum => "SUM",
            FunctionId::Avg => "AVG",
            FunctionId::Min => "MIN",
            FunctionId::Max => "MAX",
        }
    }

    /// Whether the function is evaluated over a group of rows
    pub fn is_aggregate(self) -> bool {
        matches!(
            self,
            FunctionId::Count
                | FunctionId::Sum
                | FunctionId::Avg
                | FunctionId::Min
                | FunctionId::Max
        )
    }

    /// Accepted argument count
    pub fn arity(self) -> Arity {
        match self {
            FunctionId::Coalesce
            | FunctionId::Concat
            | FunctionId::Greatest
            | FunctionId::Least => Arity::AtLeast(2),
            FunctionId::Length | FunctionId::Lower | FunctionId::Upper => Arity::Exactly(1),
            // expression, position, optional length
            FunctionId::Substr => Arity::Range(2, 3),
            FunctionId::Now => Arity::Exactly(0),
            FunctionId::Count
            | FunctionId::Sum
            | FunctionId::Avg
            | FunctionId::Min
            | FunctionId::Max => Arity::Exactly(1),
        }
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FunctionId {
    type Err = ExprError;

    /// Parse a function name (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FunctionId::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ExprError::domain("function name", format!("unknown function '{s}'")))
    }
}

/// Argument count constraint of a function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
    /// Inclusive range
    Range(usize, usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
            Arity::Range(lo, hi) => (lo..=hi).contains(&count),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "exactly {n}"),
            Arity::AtLeast(n) => write!(f, "at least {n}"),
            Arity::Range(lo, hi) => write!(f, "{lo} to {hi}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_accepts() {
        assert!(!FunctionId::Coalesce.arity().accepts(1));
        assert!(FunctionId::Coalesce.arity().accepts(5));
        assert!(FunctionId::Substr.arity().accepts(2));
        assert!(FunctionId::Substr.arity().accepts(3));
        assert!(!FunctionId::Substr.arity().accepts(4));
        assert!(FunctionId::Now.arity().accepts(0));
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!("concat".parse::<FunctionId>().unwrap(), FunctionId::Concat);
        assert_eq!("Greatest".parse::<FunctionId>().unwrap(), FunctionId::Greatest);
        assert!("concat_ws".parse::<FunctionId>().is_err());
    }

    #[test]
    fn test_aggregate_classification() {
        assert!(FunctionId::Count.is_aggregate());
        assert!(!FunctionId::Coalesce.is_aggregate());
    }
}
