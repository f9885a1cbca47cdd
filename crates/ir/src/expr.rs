// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Expressions
//!
//! This module represents function expressions in the IR.
//!
//! ## Design
//!
//! An [`Expr`] is one of:
//!
//! - **Field references**: `table.column` or unqualified `column`
//! - **Literal values**: a [`Value`] with its declared [`ResolvedType`]
//! - **Function calls**: a scalar function applied to argument expressions
//! - **Aggregates**: a function call evaluated over a group of rows
//!
//! Expressions are values. Children are supplied only when a node is built,
//! so trees are acyclic by construction, and no node is mutated afterwards.
//! Every node carries a [`NodeId`] assigned at construction; cloning keeps the
//! id, rebuilding a node (for example to attach an explicit output type)
//! allocates a new one. Analysis passes key their results by [`NodeId`]
//! instead of writing into the tree.
//!
//! ## Expression Hierarchy
//!
//! ```text
//! Call {
//!   function: Coalesce,
//!   args: [
//!     Field("alias"),
//!     Call { function: Upper, args: [Field("name")] },
//!   ],
//! }
//! ```
//!
//! Represents: `COALESCE(alias, UPPER(name))`

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::{ExprError, ExprResult};
use crate::function::FunctionId;
use crate::types::{BaseType, ResolvedType};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of an expression node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An immutable expression node
#[derive(Debug, Clone, Serialize)]
pub struct Expr {
    id: NodeId,
    kind: Arc<ExprKind>,
}

/// The variant carried by an [`Expr`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExprKind {
    /// Field reference (e.g., `table.column` or just `column`)
    Field(FieldRef),

    /// Literal value with its declared type
    Literal(Literal),

    /// Scalar function call (e.g., `COALESCE(a, b)`)
    Call(Call),

    /// Aggregate function call (e.g., `COUNT(DISTINCT a)`)
    Aggregate(Aggregate),
}

/// Field reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldRef {
    /// Optional table/alias name
    pub table: Option<String>,
    /// Field name
    pub name: String,
}

impl FieldRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            table: None,
            name: name.into(),
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn qualified(&self) -> String {
        match &self.table {
            Some(table) => format!("{}.{}", table, self.name),
            None => self.name.clone(),
        }
    }
}

/// Native parameter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether this value can be stored under the given base type
    pub fn fits(&self, base: BaseType) -> bool {
        match self {
            Value::Null => true,
            Value::Boolean(_) => base == BaseType::Boolean,
            Value::Integer(_) => base.is_numeric(),
            Value::Float(_) => base == BaseType::Decimal,
            // DateTime literals travel as ISO-8601 strings
            Value::String(_) => matches!(base, BaseType::Text | BaseType::DateTime),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// Literal value with declared type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Literal {
    pub value: Value,
    pub data_type: ResolvedType,
}

/// Function application
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Call {
    pub function: FunctionId,
    pub args: Vec<Expr>,
    /// Caller-supplied output type, checked against the inferred one
    pub output_type: Option<ResolvedType>,
}

/// Aggregate function application
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregate {
    pub call: Call,
    pub distinct: bool,
}

impl Expr {
    fn from_kind(kind: ExprKind) -> Self {
        Self {
            id: NodeId::next(),
            kind: Arc::new(kind),
        }
    }

    /// Unqualified field reference
    pub fn field(name: impl Into<String>) -> Self {
        Self::from_kind(ExprKind::Field(FieldRef::new(name)))
    }

    /// Table-qualified field reference
    pub fn qualified_field(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self::from_kind(ExprKind::Field(FieldRef::new(name).with_table(table)))
    }

    /// Literal with an explicitly declared type.
    ///
    /// Fails with [`ExprError::Domain`] when the value does not fit the
    /// declared base type, or is NULL under a non-nullable declaration.
    pub fn literal(value: impl Into<Value>, data_type: ResolvedType) -> ExprResult<Self> {
        let value = value.into();
        if value.is_null() && !data_type.nullable {
            return Err(ExprError::domain(
                "literal",
                format!("NULL cannot be declared as {data_type}"),
            ));
        }
        if !value.fits(data_type.base) {
            return Err(ExprError::domain(
                "literal",
                format!("{value:?} does not fit {}", data_type.base),
            ));
        }
        Ok(Self::from_kind(ExprKind::Literal(Literal { value, data_type })))
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::typed_literal(Value::String(value.into()), ResolvedType::text())
    }

    pub fn integer(value: i64) -> Self {
        Self::typed_literal(Value::Integer(value), ResolvedType::integer())
    }

    pub fn decimal(value: f64) -> Self {
        Self::typed_literal(Value::Float(value), ResolvedType::decimal())
    }

    pub fn boolean(value: bool) -> Self {
        Self::typed_literal(Value::Boolean(value), ResolvedType::boolean())
    }

    /// Typed NULL literal
    pub fn null(base: BaseType) -> Self {
        Self::typed_literal(Value::Null, ResolvedType::new(base).nullable())
    }

    fn typed_literal(value: Value, data_type: ResolvedType) -> Self {
        Self::from_kind(ExprKind::Literal(Literal { value, data_type }))
    }

    /// Scalar function call with arity validation.
    ///
    /// SUBSTR literal positions must be integers >= 1 and literal lengths
    /// integers >= 0; anything else fails with [`ExprError::Domain`].
    pub fn call(function: FunctionId, args: Vec<Expr>) -> ExprResult<Self> {
        if function.is_aggregate() {
            return Err(ExprError::domain(
                function.name(),
                "aggregate functions must be built with Expr::aggregate",
            ));
        }
        check_arity(function, args.len())?;
        if function == FunctionId::Substr {
            check_substr_domain(&args)?;
        }
        Ok(Self::from_kind(ExprKind::Call(Call {
            function,
            args,
            output_type: None,
        })))
    }

    /// Aggregate function call with arity validation
    pub fn aggregate(function: FunctionId, arg: Expr, distinct: bool) -> ExprResult<Self> {
        if !function.is_aggregate() {
            return Err(ExprError::domain(
                function.name(),
                "scalar functions must be built with Expr::call",
            ));
        }
        Ok(Self::from_kind(ExprKind::Aggregate(Aggregate {
            call: Call {
                function,
                args: vec![arg],
                output_type: None,
            },
            distinct,
        })))
    }

    /// Rebuild a call or aggregate with an explicit output type.
    ///
    /// The returned node has a fresh identity. Only function applications
    /// carry an output type.
    pub fn with_output_type(&self, output_type: ResolvedType) -> ExprResult<Self> {
        let kind = match self.kind.as_ref() {
            ExprKind::Call(call) => ExprKind::Call(Call {
                output_type: Some(output_type),
                ..call.clone()
            }),
            ExprKind::Aggregate(agg) => ExprKind::Aggregate(Aggregate {
                call: Call {
                    output_type: Some(output_type),
                    ..agg.call.clone()
                },
                distinct: agg.distinct,
            }),
            ExprKind::Field(_) | ExprKind::Literal(_) => {
                return Err(ExprError::domain(
                    "output type",
                    "only function calls accept an explicit output type",
                ));
            }
        };
        Ok(Self::from_kind(kind))
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> &ExprKind {
        &self.kind
    }

    /// The function application carried by a call or aggregate node
    pub fn as_call(&self) -> Option<&Call> {
        match self.kind.as_ref() {
            ExprKind::Call(call) => Some(call),
            ExprKind::Aggregate(agg) => Some(&agg.call),
            ExprKind::Field(_) | ExprKind::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self.kind.as_ref() {
            ExprKind::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// Direct children in argument order
    pub fn children(&self) -> &[Expr] {
        self.as_call().map_or(&[], |call| call.args.as_slice())
    }

    /// Height of the tree rooted at this node (a leaf has depth 1)
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(Expr::depth).max().unwrap_or(0)
    }

    /// Number of nodes in the tree, counting shared subtrees once per use
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Expr::node_count).sum::<usize>()
    }
}

/// Structural equality; node identity is ignored
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.kind, &other.kind) || self.kind == other.kind
    }
}

impl From<FieldRef> for Expr {
    fn from(field: FieldRef) -> Self {
        Self::from_kind(ExprKind::Field(field))
    }
}

fn check_arity(function: FunctionId, found: usize) -> ExprResult<()> {
    let arity = function.arity();
    if arity.accepts(found) {
        Ok(())
    } else {
        Err(ExprError::Arity {
            function,
            expected: arity.to_string(),
            found,
        })
    }
}

/// Non-literal positions and lengths are left to the backend
fn check_substr_domain(args: &[Expr]) -> ExprResult<()> {
    if let Some(pos) = args.get(1) {
        check_integer_literal(pos, "SUBSTR position", 1)?;
    }
    if let Some(length) = args.get(2) {
        check_integer_literal(length, "SUBSTR length", 0)?;
    }
    Ok(())
}

fn check_integer_literal(expr: &Expr, context: &str, min: i64) -> ExprResult<()> {
    let Some(literal) = expr.as_literal() else {
        return Ok(());
    };
    match &literal.value {
        Value::Null => Ok(()),
        Value::Integer(n) if *n >= min => Ok(()),
        Value::Integer(n) => Err(ExprError::domain(
            context,
            format!("{n} is out of range (must be >= {min})"),
        )),
        other => Err(ExprError::domain(
            context,
            format!("{other:?} is not an integer"),
        )),
    }
}
