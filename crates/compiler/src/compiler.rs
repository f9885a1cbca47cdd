// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Compiler
//!
//! Turns a resolved expression tree into SQL text plus ordered parameters.
//!
//! Every node is compiled after its children:
//!
//! - Field references become quoted, optionally qualified identifiers
//! - Literals become placeholders and their values are bound, never inlined
//! - Calls and aggregates are rendered through the registry entry of their
//!   function on the target backend, falling back to the default entry
//!
//! Parameters are bound in the order their placeholders appear in the text.
//! When an argument must be emitted twice, it is compiled twice, so its
//! parameters are bound twice.

use std::sync::Arc;

use serde::Serialize;
use sqlexpr_ir::{Call, Dialect, Expr, ExprKind, FieldRef, FunctionId, Value};
use sqlexpr_semantic::TypeAnnotations;
use tracing::{debug, instrument};

use crate::context::{CompileContext, DEFAULT_MAX_DEPTH};
use crate::dialect::{DialectRegistry, NullPolicy, QuirkEntry};
use crate::error::{CompileError, CompileResult};

/// SQL text with its bound parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledSql {
    pub sql: String,
    pub params: Vec<Value>,
}

impl CompiledSql {
    pub fn param_count(&self) -> usize {
        self.params.len()
    }
}

/// Compiles resolved trees against a [`DialectRegistry`]
#[derive(Debug, Clone)]
pub struct Compiler {
    registry: Arc<DialectRegistry>,
    max_depth: usize,
}

impl Compiler {
    pub fn new(registry: DialectRegistry) -> Self {
        Self::from_shared(Arc::new(registry))
    }

    /// Compiler over a registry shared with other compilers
    pub fn from_shared(registry: Arc<DialectRegistry>) -> Self {
        Self {
            registry,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit the nesting depth of compiled trees
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn registry(&self) -> &DialectRegistry {
        &self.registry
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Compile `expr` for `dialect`.
    ///
    /// `types` must annotate every node of `expr`; use the annotations the
    /// resolver produced for this tree.
    #[instrument(skip_all, fields(dialect = %dialect, root = %expr.id()))]
    pub fn compile(
        &self,
        expr: &Expr,
        types: &TypeAnnotations,
        dialect: Dialect,
    ) -> CompileResult<CompiledSql> {
        let mut ctx = CompileContext::with_max_depth(dialect, self.max_depth);
        let sql = self.visit(&mut ctx, expr, types)?;
        debug!(params = ctx.params().len(), "Compiled expression");
        Ok(CompiledSql {
            sql,
            params: ctx.into_params(),
        })
    }

    fn visit(
        &self,
        ctx: &mut CompileContext,
        expr: &Expr,
        types: &TypeAnnotations,
    ) -> CompileResult<String> {
        ctx.enter_recursive_context()?;
        let sql = self.visit_node(ctx, expr, types)?;
        ctx.exit_recursive_context();
        Ok(sql)
    }

    fn visit_node(
        &self,
        ctx: &mut CompileContext,
        expr: &Expr,
        types: &TypeAnnotations,
    ) -> CompileResult<String> {
        if !types.contains(expr.id()) {
            return Err(CompileError::Unresolved { node: expr.id() });
        }

        match expr.kind() {
            ExprKind::Field(field) => Ok(quote_field(ctx.dialect(), field)),
            ExprKind::Literal(lit) => Ok(ctx.bind(lit.value.clone())),
            ExprKind::Call(call) => self.visit_call(ctx, call, false, types),
            ExprKind::Aggregate(agg) => self.visit_call(ctx, &agg.call, agg.distinct, types),
        }
    }

    fn visit_call(
        &self,
        ctx: &mut CompileContext,
        call: &Call,
        distinct: bool,
        types: &TypeAnnotations,
    ) -> CompileResult<String> {
        let dialect = ctx.dialect();
        let entry = self
            .registry
            .lookup(call.function, dialect)
            .ok_or_else(|| CompileError::unsupported(call.function, dialect))?;

        if call.function == FunctionId::Substr {
            if let [text, position] = call.args.as_slice() {
                return match entry.rest_template() {
                    Some(rest) => {
                        let args = self.visit_args(ctx, &call.args, types)?;
                        Ok(rest.render(&args, false))
                    }
                    None => self.synthesize_rest_of_string(ctx, entry, text, position, types),
                };
            }
        }

        let mut args = self.visit_args(ctx, &call.args, types)?;

        if entry.null_policy() == NullPolicy::CoerceNullToEmpty {
            if let Some(wrapper) = entry.null_wrapper() {
                for (sql, arg) in args.iter_mut().zip(&call.args) {
                    if types.type_of(arg).is_some_and(|ty| ty.nullable) {
                        *sql = wrapper.render(std::slice::from_ref(sql), false);
                    }
                }
            }
        }

        Ok(entry.template().render(&args, distinct))
    }

    fn visit_args(
        &self,
        ctx: &mut CompileContext,
        args: &[Expr],
        types: &TypeAnnotations,
    ) -> CompileResult<Vec<String>> {
        args.iter().map(|arg| self.visit(ctx, arg, types)).collect()
    }

    /// `SUBSTR(x, pos)` on a backend without a "rest of string" form:
    /// take a window as long as an upper bound on the length of `x`.
    ///
    /// The bound never goes negative, so a position past the end yields
    /// empty text as the native forms do.
    fn synthesize_rest_of_string(
        &self,
        ctx: &mut CompileContext,
        entry: &QuirkEntry,
        text: &Expr,
        position: &Expr,
        types: &TypeAnnotations,
    ) -> CompileResult<String> {
        let dialect = ctx.dialect();
        let bound = match entry.length_bound() {
            Some(bound) => bound,
            None => self
                .registry
                .lookup(FunctionId::Length, dialect)
                .map(QuirkEntry::template)
                .ok_or_else(|| CompileError::UnsupportedOnBackend {
                    function: FunctionId::Substr,
                    dialect,
                    detail: Some("no rest-of-string form and no LENGTH entry".to_string()),
                })?,
        };

        // text order: x, pos, then x again inside the bound
        let text_sql = self.visit(ctx, text, types)?;
        let position_sql = self.visit(ctx, position, types)?;
        let text_again = self.visit(ctx, text, types)?;

        debug!(%dialect, "Synthesized rest-of-string SUBSTR");
        Ok(entry.template().render(
            &[text_sql, position_sql, bound.render(&[text_again], false)],
            false,
        ))
    }
}

fn quote_field(dialect: Dialect, field: &FieldRef) -> String {
    match &field.table {
        Some(table) => format!(
            "{}.{}",
            dialect.quote_identifier(table),
            dialect.quote_identifier(&field.name)
        ),
        None => dialect.quote_identifier(&field.name),
    }
}
