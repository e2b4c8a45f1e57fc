// Copyright 2025 the Polyhole Authors
// SPDX-License-Identifier: Apache-2.0

//! Mode controller
//!
//! Exactly one editing mode is active at a time. Each mode maps to the set
//! of tools that must be attached to the input surface; `activate` is the
//! single entry point that moves from the current set to the next one.

use crate::editing::{EditSession, Key, Mouse, MouseEvent};
use crate::model::geometry::{extents_intersect, point_extent};
use crate::tools::draw::Sketch;
use crate::tools::{ToolId, ToolSet};
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use std::fmt;

// ===== Modes and Triggers =====

/// The active editing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    #[default]
    Idle,
    DrawOuter,
    DrawHole,
    Modify,
    SelectDelete,
    HoverHighlight,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Idle => "idle",
            Mode::DrawOuter => "draw-outer",
            Mode::DrawHole => "draw-hole",
            Mode::Modify => "modify",
            Mode::SelectDelete => "select-delete",
            Mode::HoverHighlight => "hover-highlight",
        };
        f.write_str(name)
    }
}

/// A UI control that changes mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Trigger {
    Draw,
    Hole,
    Stop,
    Modify,
    DeleteClick,
    DeleteHover,
    /// Stop editing and remove every shape
    Clear,
}

impl Trigger {
    /// The mode this control requests
    pub fn mode(self) -> Mode {
        match self {
            Trigger::Draw => Mode::DrawOuter,
            Trigger::Hole => Mode::DrawHole,
            Trigger::Stop | Trigger::Clear => Mode::Idle,
            Trigger::Modify => Mode::Modify,
            Trigger::DeleteClick => Mode::SelectDelete,
            Trigger::DeleteHover => Mode::HoverHighlight,
        }
    }
}

// ===== Transition Table =====

/// Tools attached while `mode` is active, in dispatch order
pub fn behaviors(mode: Mode) -> &'static [ToolId] {
    match mode {
        Mode::Idle => &[],
        Mode::DrawOuter => &[ToolId::Draw],
        Mode::DrawHole => &[ToolId::HoleDraw],
        Mode::Modify => &[ToolId::Modify],
        Mode::SelectDelete => &[ToolId::SelectClick, ToolId::SelectHover],
        Mode::HoverHighlight => &[ToolId::SelectHover],
    }
}

/// The mode that results from requesting `requested` while in `current`.
///
/// Hovering the delete control must not disarm click-to-delete, so a hover
/// request leaves `SelectDelete` in place.
pub fn resolve(current: Mode, requested: Mode) -> Mode {
    match (current, requested) {
        (Mode::SelectDelete, Mode::HoverHighlight) => Mode::SelectDelete,
        (_, requested) => requested,
    }
}

// ===== Controller =====

/// The attached input surface: its tools and pointer state
#[derive(Debug, Clone)]
struct InputSurface {
    tools: ToolSet,
    mouse: Mouse,
    extent: Rect,
}

/// Owns the active mode and the tools it attaches
#[derive(Debug, Clone, Default)]
pub struct ModeController {
    mode: Mode,
    surface: Option<InputSurface>,
}

impl ModeController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The active mode, or the pending one before a surface is attached
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    /// Extent of the attached input surface
    pub fn extent(&self) -> Option<Rect> {
        self.surface.as_ref().map(|surface| surface.extent)
    }

    /// Attached tools, in dispatch order
    pub fn attached(&self) -> Vec<ToolId> {
        self.surface
            .as_ref()
            .map(|surface| surface.tools.ids().collect())
            .unwrap_or_default()
    }

    /// The drawing in progress, if a draw tool has one
    pub fn sketch(&self) -> Option<&Sketch> {
        self.surface.as_ref()?.tools.sketch()
    }

    /// Switch to `requested`, returning the mode that is now active
    pub fn activate(&mut self, requested: Mode, session: &mut EditSession) -> Mode {
        let mode = resolve(self.mode, requested);
        let previous = std::mem::replace(&mut self.mode, mode);

        let Some(surface) = self.surface.as_mut() else {
            tracing::debug!("Mode: no input surface yet, {} is pending", mode);
            return mode;
        };

        let wanted = behaviors(mode);
        let stale: Vec<ToolId> = surface
            .tools
            .ids()
            .filter(|id| !wanted.contains(id))
            .collect();
        for id in stale {
            surface.tools.detach(id, session);
            tracing::debug!("Mode: detached {:?}", id);
        }
        for &id in wanted {
            if surface.tools.attach(id) {
                tracing::debug!("Mode: attached {:?}", id);
            }
        }

        if previous != mode {
            surface.mouse.reset();
            tracing::info!("Mode: {} -> {}", previous, mode);
        }
        mode
    }

    /// Stop editing
    pub fn clear(&mut self, session: &mut EditSession) -> Mode {
        self.activate(Mode::Idle, session)
    }

    /// Stop editing and remove every shape
    pub fn clear_all(&mut self, session: &mut EditSession) -> Mode {
        let mode = self.clear(session);
        let removed = session.source.clear();
        session.prune_selections();
        tracing::info!("Mode: cleared {} shapes", removed);
        mode
    }

    /// Attach the input surface covering `extent` and apply the pending mode
    pub fn attach_surface(&mut self, extent: Rect, session: &mut EditSession) {
        match self.surface.as_mut() {
            Some(surface) => surface.extent = extent,
            None => {
                self.surface = Some(InputSurface {
                    tools: ToolSet::new(),
                    mouse: Mouse::with_drag_threshold(session.config.drag_threshold),
                    extent,
                });
            }
        }
        tracing::debug!("Mode: input surface {:?}", extent);
        self.activate(self.mode, session);
    }

    // ===== Input Dispatch =====

    /// Presses outside the surface are ignored
    pub fn pointer_down(&mut self, event: MouseEvent, session: &mut EditSession) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        if !extents_intersect(point_extent(event.pos), surface.extent) {
            tracing::trace!("Mode: press outside surface at {:?}", event.pos);
            return;
        }
        surface.mouse.mouse_down(event, &mut surface.tools, session);
    }

    pub fn pointer_moved(&mut self, event: MouseEvent, session: &mut EditSession) {
        if let Some(surface) = self.surface.as_mut() {
            surface.mouse.mouse_moved(event, &mut surface.tools, session);
        }
    }

    pub fn pointer_up(&mut self, event: MouseEvent, session: &mut EditSession) {
        if let Some(surface) = self.surface.as_mut() {
            surface.mouse.mouse_up(event, &mut surface.tools, session);
        }
    }

    /// Abandon the press or drag in progress
    pub fn pointer_cancel(&mut self, session: &mut EditSession) {
        if let Some(surface) = self.surface.as_mut() {
            surface.mouse.cancel(&mut surface.tools, session);
        }
    }

    pub fn key_down(&mut self, key: Key, session: &mut EditSession) -> bool {
        self.surface
            .as_mut()
            .is_some_and(|surface| surface.tools.key_down(key, session))
    }
}
