// Copyright 2025 the Polyhole Authors
// SPDX-License-Identifier: Apache-2.0

//! Edit session - the state every tool works on
//!
//! Tools receive `&mut EditSession` in their pointer callbacks. The session
//! owns the shared shape collection, the click selection, the hover
//! highlight, and the queue of work that must wait until the current event
//! turn has finished.

use super::deferred::DeferredQueue;
use super::selection::Selection;
use crate::config::Config;
use crate::model::ShapeSource;

#[derive(Debug, Clone, Default)]
pub struct EditSession {
    /// The shared shape collection
    pub source: ShapeSource,

    /// Shapes picked by a select click
    pub selection: Selection,

    /// Shape under the pointer while hover highlighting is attached
    pub highlight: Selection,

    /// Mutations postponed until the host ends the turn
    pub deferred: DeferredQueue,

    /// Tolerances and rules for the tools
    pub config: Config,
}

impl EditSession {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Run postponed work, then drop selection entries for shapes that no
    /// longer exist. Returns how many deferred tasks ran.
    pub fn end_turn(&mut self) -> usize {
        let ran = self.deferred.flush(&mut self.source);
        self.prune_selections();
        ran
    }

    /// Drop selection and highlight entries for removed shapes
    pub fn prune_selections(&mut self) {
        self.selection.retain_existing(&self.source);
        self.highlight.retain_existing(&self.source);
    }
}
