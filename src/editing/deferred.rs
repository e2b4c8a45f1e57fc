// Copyright 2025 the Polyhole Authors
// SPDX-License-Identifier: Apache-2.0

//! Work postponed until the current dispatch has finished.
//!
//! A finished hole sketch must stay in the source for the rest of the event
//! turn that produced it, because the renderer may still be reading it. The
//! hole tool schedules its removal here; the host flushes the queue once the
//! turn (and its render pass) is over. Tasks run in scheduling order.

use crate::model::{EntityId, ShapeSource};

/// A postponed mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Remove a transient shape from the source
    RemoveShape(EntityId),
}

/// FIFO of postponed mutations
#[derive(Debug, Clone, Default)]
pub struct DeferredQueue {
    pending: Vec<Deferred>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, task: Deferred) {
        tracing::trace!("deferred: schedule {:?}", task);
        self.pending.push(task);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn contains(&self, task: &Deferred) -> bool {
        self.pending.contains(task)
    }

    /// Run every pending task against `source`, returning how many ran
    pub fn flush(&mut self, source: &mut ShapeSource) -> usize {
        let tasks = std::mem::take(&mut self.pending);
        let count = tasks.len();
        for task in tasks {
            match task {
                Deferred::RemoveShape(id) => {
                    if source.remove(id).is_none() {
                        tracing::debug!("deferred: {} already removed", id);
                    }
                }
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Polygon, Ring};
    use kurbo::Point;

    #[test]
    fn removal_waits_for_flush() {
        let mut source = ShapeSource::new();
        let id = source.add(Polygon::new(Ring::closed([
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ])));

        let mut queue = DeferredQueue::new();
        queue.schedule(Deferred::RemoveShape(id));
        assert!(source.contains(id));
        assert_eq!(queue.len(), 1);

        assert_eq!(queue.flush(&mut source), 1);
        assert!(!source.contains(id));
        assert!(queue.is_empty());
    }

    #[test]
    fn flushing_a_missing_shape_is_harmless() {
        let mut source = ShapeSource::new();
        let mut queue = DeferredQueue::new();
        queue.schedule(Deferred::RemoveShape(EntityId::next()));
        assert_eq!(queue.flush(&mut source), 1);
        assert_eq!(queue.flush(&mut source), 0);
    }
}
