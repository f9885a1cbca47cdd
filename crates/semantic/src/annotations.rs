// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! Resolved types keyed by node identity

use std::collections::HashMap;

use sqlexpr_ir::{Expr, NodeId, ResolvedType};

/// Output of a successful resolution pass
///
/// Holds a resolved type for every node of the tree it was produced from.
/// Only [`TypeResolver`](crate::TypeResolver) creates non-empty annotations,
/// so holding one is evidence that the tree is well-typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeAnnotations {
    types: HashMap<NodeId, ResolvedType>,
    root: Option<NodeId>,
}

impl TypeAnnotations {
    pub(crate) fn new(types: HashMap<NodeId, ResolvedType>, root: NodeId) -> Self {
        Self {
            types,
            root: Some(root),
        }
    }

    /// Resolved type of a node
    pub fn get(&self, node: NodeId) -> Option<ResolvedType> {
        self.types.get(&node).copied()
    }

    /// Resolved type of an expression node
    pub fn type_of(&self, expr: &Expr) -> Option<ResolvedType> {
        self.get(expr.id())
    }

    /// Resolved type of the root the annotations were produced for
    pub fn root_type(&self) -> Option<ResolvedType> {
        self.root.and_then(|root| self.get(root))
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.types.contains_key(&node)
    }

    /// Number of distinct annotated nodes
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, ResolvedType)> + '_ {
        self.types.iter().map(|(id, ty)| (*id, *ty))
    }
}
