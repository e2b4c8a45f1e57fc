// Copyright 2025 the Polyhole Authors
// SPDX-License-Identifier: Apache-2.0

//! Immutable selection set for tracking which shapes are selected or
//! highlighted.
//!
//! `Selection` wraps an `Arc<BTreeSet<EntityId>>` so the renderer can hold a
//! cheap snapshot while tools keep editing. Mutations produce a new set. The
//! `BTreeSet` gives deterministic iteration order, so deleting a multi-shape
//! selection always removes shapes in the same order.

use crate::model::{EntityId, ShapeSource};
use std::collections::BTreeSet;
use std::sync::Arc;

/// A set of selected shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    inner: Arc<BTreeSet<EntityId>>,
}

impl Selection {
    /// Create a new empty selection
    pub fn new() -> Self {
        Self {
            inner: Arc::new(BTreeSet::new()),
        }
    }

    /// A selection holding exactly one shape
    pub fn single(id: EntityId) -> Self {
        Self {
            inner: Arc::new(BTreeSet::from([id])),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.inner.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityId> {
        self.inner.iter()
    }

    pub fn insert(&mut self, id: EntityId) {
        if !self.inner.contains(&id) {
            Arc::make_mut(&mut self.inner).insert(id);
        }
    }

    pub fn remove(&mut self, id: &EntityId) {
        if self.inner.contains(id) {
            Arc::make_mut(&mut self.inner).remove(id);
        }
    }

    pub fn clear(&mut self) {
        if !self.inner.is_empty() {
            self.inner = Arc::new(BTreeSet::new());
        }
    }

    /// Drop ids whose shapes no longer exist in `source`
    pub fn retain_existing(&mut self, source: &ShapeSource) {
        if self.inner.iter().any(|id| !source.contains(*id)) {
            Arc::make_mut(&mut self.inner).retain(|id| source.contains(*id));
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}
