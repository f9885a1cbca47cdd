// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # Type Resolver
//!
//! Infers the output type of every node of an expression tree in one
//! post-order pass:
//!
//! 1. Field references are looked up in the schema
//! 2. Literals keep their declared type
//! 3. Calls resolve their arguments, then apply the function's rule
//! 4. An explicit output type, if any, is checked against the inferred type
//!
//! Results are memoized per [`NodeId`] for the duration of the pass, so a
//! subtree shared by several parents is resolved once. A node whose argument
//! failed is skipped rather than reported again. The pass fails atomically:
//! either every node is annotated or all collected errors are returned.

use std::collections::{HashMap, HashSet};

use sqlexpr_catalog::SchemaLookup;
use sqlexpr_ir::{Call, Expr, ExprKind, NodeId, ResolvedType};
use tracing::{debug, instrument};

use crate::annotations::TypeAnnotations;
use crate::error::{ResolutionErrors, ResolveError, ResolveResult};
use crate::rules;

/// Result-type inference over a schema
pub struct TypeResolver<'a, S: SchemaLookup + ?Sized> {
    schema: &'a S,
}

impl<'a, S: SchemaLookup + ?Sized> TypeResolver<'a, S> {
    pub fn new(schema: &'a S) -> Self {
        Self { schema }
    }

    /// Resolve every node of `expr`
    #[instrument(skip_all, fields(root = %expr.id()))]
    pub fn resolve(&self, expr: &Expr) -> ResolveResult<TypeAnnotations> {
        let mut pass = Pass {
            schema: self.schema,
            types: HashMap::new(),
            failed: HashSet::new(),
            errors: Vec::new(),
        };
        pass.visit(expr);

        if pass.errors.is_empty() {
            debug!(nodes = pass.types.len(), "Resolved expression tree");
            Ok(TypeAnnotations::new(pass.types, expr.id()))
        } else {
            debug!(errors = pass.errors.len(), "Resolution failed");
            Err(ResolutionErrors::new(pass.errors))
        }
    }
}

/// State of one resolution pass; the memo never outlives it
struct Pass<'a, S: SchemaLookup + ?Sized> {
    schema: &'a S,
    types: HashMap<NodeId, ResolvedType>,
    failed: HashSet<NodeId>,
    errors: Vec<ResolveError>,
}

impl<S: SchemaLookup + ?Sized> Pass<'_, S> {
    fn visit(&mut self, expr: &Expr) -> Option<ResolvedType> {
        let id = expr.id();
        if let Some(ty) = self.types.get(&id) {
            return Some(*ty);
        }
        if self.failed.contains(&id) {
            return None;
        }

        let resolved = match expr.kind() {
            ExprKind::Field(field) => match self.schema.lookup(field) {
                Some(ty) => Ok(ty),
                None => Err(Some(ResolveError::UnknownField {
                    node: id,
                    field: field.qualified(),
                })),
            },
            ExprKind::Literal(lit) => Ok(lit.data_type),
            ExprKind::Call(call) => self.visit_call(id, call),
            ExprKind::Aggregate(agg) => self.visit_call(id, &agg.call),
        };

        match resolved {
            Ok(ty) => {
                self.types.insert(id, ty);
                Some(ty)
            }
            Err(err) => {
                self.failed.insert(id);
                self.errors.extend(err);
                None
            }
        }
    }

    /// `Err(None)` means an argument failed and was already reported
    fn visit_call(
        &mut self,
        id: NodeId,
        call: &Call,
    ) -> Result<ResolvedType, Option<ResolveError>> {
        // visit every argument so that all failures are collected
        let args: Vec<Option<ResolvedType>> =
            call.args.iter().map(|arg| self.visit(arg)).collect();
        let args: Vec<ResolvedType> = args
            .into_iter()
            .collect::<Option<_>>()
            .ok_or(None::<ResolveError>)?;

        let mismatch = |message: String| {
            Some(ResolveError::TypeMismatch {
                node: id,
                function: call.function,
                message,
            })
        };

        let inferred = rules::infer(call.function, &args).map_err(mismatch)?;
        match call.output_type {
            Some(declared) => rules::check_override(inferred, declared).map_err(mismatch),
            None => Ok(inferred),
        }
    }
}
