// Copyright 2025 the Polyhole Authors
// SPDX-License-Identifier: Apache-2.0

//! Tool system for shape editing
//!
//! Each editing behavior is a tool. The mode controller decides which tools
//! are attached to the input surface; attached tools receive pointer and key
//! events through a `ToolSet`, detached ones receive nothing.

use crate::editing::{Drag, EditSession, Key, MouseDelegate, MouseEvent};

// ===== Tool Identifier =====

/// Tool identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ToolId {
    /// Draw new standalone shapes
    Draw,
    /// Draw holes into existing shapes
    HoleDraw,
    /// Move, insert, and delete vertices
    Modify,
    /// Click a shape to delete it
    SelectClick,
    /// Highlight the shape under the pointer
    SelectHover,
}

impl ToolId {
    /// Whether this tool changes shape geometry while attached
    pub fn mutates_geometry(self) -> bool {
        matches!(self, ToolId::Draw | ToolId::HoleDraw | ToolId::Modify)
    }
}

// ===== Tool Trait =====

/// An editing behavior
pub trait Tool: MouseDelegate<Data = EditSession> {
    /// Get the tool identifier
    fn id(&self) -> ToolId;

    /// Handle a key press; returns whether the key was used
    fn key_down(&mut self, _key: Key, _session: &mut EditSession) -> bool {
        false
    }

    /// The drawing in progress, for tools that draw
    fn sketch(&self) -> Option<&draw::Sketch> {
        None
    }

    /// Called when the tool is detached; must leave no gesture behind
    fn detach(&mut self, session: &mut EditSession) {
        self.cancel(session);
    }
}

// ===== ToolBox Enum =====

/// Enum wrapping all tool types
#[derive(Debug, Clone)]
pub enum ToolBox {
    Draw(draw::DrawTool<draw::KeepShape>),
    HoleDraw(hole::HoleTool),
    Modify(modify::ModifyTool),
    Select(select::SelectTool),
}

impl ToolBox {
    /// Create a tool by ID
    pub fn for_id(id: ToolId) -> Self {
        match id {
            ToolId::Draw => ToolBox::Draw(draw::DrawTool::outer()),
            ToolId::HoleDraw => ToolBox::HoleDraw(hole::HoleTool::hole()),
            ToolId::Modify => ToolBox::Modify(modify::ModifyTool::default()),
            ToolId::SelectClick => ToolBox::Select(select::SelectTool::click()),
            ToolId::SelectHover => ToolBox::Select(select::SelectTool::hover()),
        }
    }

    fn tool(&self) -> &dyn Tool {
        match self {
            ToolBox::Draw(tool) => tool,
            ToolBox::HoleDraw(tool) => tool,
            ToolBox::Modify(tool) => tool,
            ToolBox::Select(tool) => tool,
        }
    }

    fn tool_mut(&mut self) -> &mut dyn Tool {
        match self {
            ToolBox::Draw(tool) => tool,
            ToolBox::HoleDraw(tool) => tool,
            ToolBox::Modify(tool) => tool,
            ToolBox::Select(tool) => tool,
        }
    }

    /// Get the tool ID
    pub fn id(&self) -> ToolId {
        self.tool().id()
    }

    pub fn sketch(&self) -> Option<&draw::Sketch> {
        self.tool().sketch()
    }

    pub fn key_down(&mut self, key: Key, session: &mut EditSession) -> bool {
        self.tool_mut().key_down(key, session)
    }

    pub fn detach(&mut self, session: &mut EditSession) {
        self.tool_mut().detach(session);
    }
}

// ===== MouseDelegate Implementation =====

impl MouseDelegate for ToolBox {
    type Data = EditSession;

    fn mouse_moved(&mut self, event: MouseEvent, data: &mut EditSession) {
        self.tool_mut().mouse_moved(event, data);
    }

    fn left_down(&mut self, event: MouseEvent, data: &mut EditSession) {
        self.tool_mut().left_down(event, data);
    }

    fn left_up(&mut self, event: MouseEvent, data: &mut EditSession) {
        self.tool_mut().left_up(event, data);
    }

    fn left_click(&mut self, event: MouseEvent, data: &mut EditSession) {
        self.tool_mut().left_click(event, data);
    }

    fn left_drag_began(&mut self, event: MouseEvent, drag: Drag, data: &mut EditSession) {
        self.tool_mut().left_drag_began(event, drag, data);
    }

    fn left_drag_changed(&mut self, event: MouseEvent, drag: Drag, data: &mut EditSession) {
        self.tool_mut().left_drag_changed(event, drag, data);
    }

    fn left_drag_ended(&mut self, event: MouseEvent, drag: Drag, data: &mut EditSession) {
        self.tool_mut().left_drag_ended(event, drag, data);
    }

    fn cancel(&mut self, data: &mut EditSession) {
        self.tool_mut().cancel(data);
    }
}

// ===== ToolSet =====

/// The tools currently attached to the input surface, in `ToolId` order
#[derive(Debug, Clone, Default)]
pub struct ToolSet {
    tools: Vec<ToolBox>,
}

impl ToolSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attached tool ids in dispatch order
    pub fn ids(&self) -> impl Iterator<Item = ToolId> + '_ {
        self.tools.iter().map(ToolBox::id)
    }

    pub fn contains(&self, id: ToolId) -> bool {
        self.tools.iter().any(|tool| tool.id() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Attach a fresh tool for `id`; no-op if one is attached already
    pub fn attach(&mut self, id: ToolId) -> bool {
        if self.contains(id) {
            return false;
        }
        let index = self.tools.partition_point(|tool| tool.id() < id);
        self.tools.insert(index, ToolBox::for_id(id));
        true
    }

    /// Detach the tool for `id`, letting it wind down its gesture first
    pub fn detach(&mut self, id: ToolId, session: &mut EditSession) -> bool {
        let Some(index) = self.tools.iter().position(|tool| tool.id() == id) else {
            return false;
        };
        let mut tool = self.tools.remove(index);
        tool.detach(session);
        true
    }

    /// Offer a key to each tool until one uses it
    pub fn key_down(&mut self, key: Key, session: &mut EditSession) -> bool {
        self.tools.iter_mut().any(|tool| tool.key_down(key, session))
    }

    /// The drawing in progress on any attached tool
    pub fn sketch(&self) -> Option<&draw::Sketch> {
        self.tools.iter().find_map(ToolBox::sketch)
    }
}

/// Every attached tool sees every pointer callback
impl MouseDelegate for ToolSet {
    type Data = EditSession;

    fn mouse_moved(&mut self, event: MouseEvent, data: &mut EditSession) {
        for tool in &mut self.tools {
            tool.mouse_moved(event, data);
        }
    }

    fn left_down(&mut self, event: MouseEvent, data: &mut EditSession) {
        for tool in &mut self.tools {
            tool.left_down(event, data);
        }
    }

    fn left_up(&mut self, event: MouseEvent, data: &mut EditSession) {
        for tool in &mut self.tools {
            tool.left_up(event, data);
        }
    }

    fn left_click(&mut self, event: MouseEvent, data: &mut EditSession) {
        for tool in &mut self.tools {
            tool.left_click(event, data);
        }
    }

    fn left_drag_began(&mut self, event: MouseEvent, drag: Drag, data: &mut EditSession) {
        for tool in &mut self.tools {
            tool.left_drag_began(event, drag, data);
        }
    }

    fn left_drag_changed(&mut self, event: MouseEvent, drag: Drag, data: &mut EditSession) {
        for tool in &mut self.tools {
            tool.left_drag_changed(event, drag, data);
        }
    }

    fn left_drag_ended(&mut self, event: MouseEvent, drag: Drag, data: &mut EditSession) {
        for tool in &mut self.tools {
            tool.left_drag_ended(event, drag, data);
        }
    }

    fn cancel(&mut self, data: &mut EditSession) {
        for tool in &mut self.tools {
            tool.cancel(data);
        }
    }
}

// ===== Tool Modules =====

pub mod draw;
pub mod hole;
pub mod modify;
pub mod select;
