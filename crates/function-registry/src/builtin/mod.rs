// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Builtin function constructors and signatures
//!
//! Constructors validate arity and statically known argument domains eagerly
//! and return immutable [`Expr`](crate::Expr) nodes.

pub mod aggregate;
pub mod scalar;

use crate::FunctionSignature;

/// Signatures of every builtin function
pub fn all_signatures() -> Vec<FunctionSignature> {
    let mut signatures = scalar::signatures();
    signatures.extend(aggregate::signatures());
    signatures
}
