// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Schema lookup trait
//!
//! The type resolver consumes schema information only through this trait.

use std::sync::Arc;

use crate::metadata::{FieldRef, ResolvedType};

/// Schema abstraction consumed by the type resolver
///
/// Given a field reference, returns its declared type, or `None` when the
/// field is not part of the schema. Implementations must be deterministic
/// for the duration of one resolution pass.
///
/// # Examples
///
/// ```rust,ignore
/// use sqlexpr_catalog::{SchemaLookup, StaticSchema};
/// use sqlexpr_ir::{FieldRef, ResolvedType};
///
/// let schema = StaticSchema::new().with_field("name", ResolvedType::text());
/// assert_eq!(schema.lookup(&FieldRef::new("name")), Some(ResolvedType::text()));
/// ```
pub trait SchemaLookup: Send + Sync {
    /// Resolve the declared type of a field
    fn lookup(&self, field: &FieldRef) -> Option<ResolvedType>;
}

impl<T: SchemaLookup + ?Sized> SchemaLookup for &T {
    fn lookup(&self, field: &FieldRef) -> Option<ResolvedType> {
        (**self).lookup(field)
    }
}

impl<T: SchemaLookup + ?Sized> SchemaLookup for Arc<T> {
    fn lookup(&self, field: &FieldRef) -> Option<ResolvedType> {
        (**self).lookup(field)
    }
}

/// Schema backed by a closure
///
/// ```rust,ignore
/// let schema = FnSchema::new(|field: &FieldRef| match field.name.as_str() {
///     "id" => Some(ResolvedType::integer()),
///     _ => None,
/// });
/// ```
pub struct FnSchema<F>(F);

impl<F> FnSchema<F>
where
    F: Fn(&FieldRef) -> Option<ResolvedType> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> SchemaLookup for FnSchema<F>
where
    F: Fn(&FieldRef) -> Option<ResolvedType> + Send + Sync,
{
    fn lookup(&self, field: &FieldRef) -> Option<ResolvedType> {
        (self.0)(field)
    }
}
