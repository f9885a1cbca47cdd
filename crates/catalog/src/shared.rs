// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Shared Schema
//!
//! A process-wide schema cache. Readers take lock-free snapshots; the single
//! writer publishes a complete new schema which replaces the previous one
//! atomically (copy-on-write snapshot swap). A resolution pass that needs
//! a stable view for its whole duration should resolve against
//! [`SharedSchema::snapshot`] rather than the shared handle itself.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::debug;

use crate::metadata::{FieldRef, ResolvedType};
use crate::{SchemaLookup, StaticSchema};

/// Read-mostly schema shared across threads
#[derive(Debug)]
pub struct SharedSchema {
    current: ArcSwap<StaticSchema>,
}

impl SharedSchema {
    pub fn new(schema: StaticSchema) -> Self {
        Self {
            current: ArcSwap::from_pointee(schema),
        }
    }

    /// Current schema version
    pub fn snapshot(&self) -> Arc<StaticSchema> {
        self.current.load_full()
    }

    /// Publish a new schema, returning the one it replaces
    pub fn replace(&self, schema: StaticSchema) -> Arc<StaticSchema> {
        debug!(tables = schema.table_count(), "Publishing schema snapshot");
        self.current.swap(Arc::new(schema))
    }

    /// Derive a new schema from the current one and publish it
    pub fn update<F>(&self, f: F)
    where
        F: Fn(&StaticSchema) -> StaticSchema,
    {
        self.current.rcu(|current| f(current));
    }
}

impl Default for SharedSchema {
    fn default() -> Self {
        Self::new(StaticSchema::default())
    }
}

impl SchemaLookup for SharedSchema {
    fn lookup(&self, field: &FieldRef) -> Option<ResolvedType> {
        self.current.load().lookup(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_snapshot_is_stable_across_replace() {
        let shared = SharedSchema::new(StaticSchema::new().with_field("a", ResolvedType::text()));
        let before = shared.snapshot();

        shared.replace(StaticSchema::new().with_field("a", ResolvedType::integer()));

        assert_eq!(
            before.lookup(&FieldRef::new("a")),
            Some(ResolvedType::text())
        );
        assert_eq!(
            shared.lookup(&FieldRef::new("a")),
            Some(ResolvedType::integer())
        );
    }

    #[test]
    fn test_update() {
        let shared = SharedSchema::default();
        shared.update(|s| s.clone().with_field("b", ResolvedType::boolean()));
        assert_eq!(
            shared.lookup(&FieldRef::new("b")),
            Some(ResolvedType::boolean())
        );
    }

    #[test]
    fn test_concurrent_readers() {
        let shared = Arc::new(SharedSchema::new(
            StaticSchema::new().with_field("name", ResolvedType::text()),
        ));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || shared.lookup(&FieldRef::new("name")))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Some(ResolvedType::text()));
        }
    }
}
