// Copyright 2025 the Polyhole Authors
// SPDX-License-Identifier: Apache-2.0

//! Shape picking: click-to-delete and hover highlighting
//!
//! Both behaviors hit test the same way: the topmost shape whose filled area
//! (holes excluded) contains the pointer. A click selection is consumed by
//! deleting the selected shapes; a hover selection only drives the highlight
//! the renderer draws.

use crate::editing::{EditSession, MouseDelegate, MouseEvent, Selection};
use crate::tools::{Tool, ToolId};

/// Which pointer event picks a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectCondition {
    /// A click selects, and the selection is deleted
    Click,
    /// The pointer position selects, for highlighting
    Hover,
}

/// The select tool
#[derive(Debug, Clone)]
pub struct SelectTool {
    condition: SelectCondition,
}

impl SelectTool {
    pub fn new(condition: SelectCondition) -> Self {
        Self { condition }
    }

    /// Click-to-delete
    pub fn click() -> Self {
        Self::new(SelectCondition::Click)
    }

    /// Hover highlight
    pub fn hover() -> Self {
        Self::new(SelectCondition::Hover)
    }

    pub fn condition(&self) -> SelectCondition {
        self.condition
    }

    /// Remove every selected shape from the source
    fn delete_selection(session: &mut EditSession) -> usize {
        let selected: Vec<_> = session.selection.iter().copied().collect();
        let removed = selected
            .into_iter()
            .filter(|id| session.source.remove(*id).is_some())
            .count();
        session.selection.clear();
        session.prune_selections();
        removed
    }
}

// ===== Tool Implementation =====

impl Tool for SelectTool {
    fn id(&self) -> ToolId {
        match self.condition {
            SelectCondition::Click => ToolId::SelectClick,
            SelectCondition::Hover => ToolId::SelectHover,
        }
    }

    fn detach(&mut self, session: &mut EditSession) {
        match self.condition {
            SelectCondition::Click => session.selection.clear(),
            SelectCondition::Hover => session.highlight.clear(),
        }
    }
}

// ===== MouseDelegate Implementation =====

impl MouseDelegate for SelectTool {
    type Data = EditSession;

    fn mouse_moved(&mut self, event: MouseEvent, data: &mut EditSession) {
        if self.condition != SelectCondition::Hover {
            return;
        }
        let highlight = match data.source.shape_at(event.pos) {
            Some(id) => Selection::single(id),
            None => Selection::new(),
        };
        if highlight != data.highlight {
            tracing::trace!("Select: highlight {:?}", highlight);
            data.highlight = highlight;
        }
    }

    fn left_click(&mut self, event: MouseEvent, data: &mut EditSession) {
        if self.condition != SelectCondition::Click {
            return;
        }
        let Some(id) = data.source.shape_at(event.pos) else {
            data.selection.clear();
            return;
        };
        data.selection = Selection::single(id);
        let removed = Self::delete_selection(data);
        tracing::info!("Select: deleted {} ({} removed)", id, removed);
    }
}
