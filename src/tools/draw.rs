// Copyright 2025 the Polyhole Authors
// SPDX-License-Identifier: Apache-2.0

//! The polygon drawing tool
//!
//! Click to place vertices; the ring follows the pointer between clicks.
//! The drawing finishes when the user clicks on the first or last placed
//! vertex, double clicks, or presses Enter. Backspace retracts the last
//! vertex and Escape aborts.
//!
//! The tool itself only manages the sketch. What a drawing *means* is
//! decided by its `DrawListener`: a plain outer drawing just keeps the new
//! shape, while the hole listener (see `hole.rs`) turns the sketch into a
//! live interior ring of another shape.

use crate::editing::{Drag, EditSession, Key, MouseDelegate, MouseEvent};
use crate::model::geometry::point_extent;
use crate::model::{EntityId, Polygon, Ring};
use crate::tools::{Tool, ToolId};
use kurbo::{Point, Rect};

// ===== Sketch =====

/// What a drawing gesture produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    /// A new standalone shape
    Outer,
    /// An interior ring cut into an existing shape
    Hole,
}

/// The in-progress drawing of one gesture
#[derive(Debug, Clone, PartialEq)]
pub struct Sketch {
    pub id: EntityId,
    pub kind: DrawKind,
    vertices: Vec<Point>,
    cursor: Point,
}

impl Sketch {
    fn new(kind: DrawKind, start: Point) -> Self {
        Self {
            id: EntityId::next(),
            kind,
            vertices: vec![start],
            cursor: start,
        }
    }

    /// Vertices placed so far
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Live pointer position trailing the placed vertices
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// The ring as currently displayed: placed vertices, then the cursor
    pub fn ring(&self) -> Ring {
        Ring::closed(self.vertices.iter().copied().chain([self.cursor]))
    }

    /// The ring without the trailing cursor
    pub fn finished_ring(&self) -> Ring {
        Ring::closed(self.vertices.iter().copied())
    }

    /// Extent of the first vertex, used to find what the gesture starts on
    pub fn start_extent(&self) -> Rect {
        point_extent(self.vertices[0])
    }

    fn place(&mut self, pt: Point) {
        self.vertices.push(pt);
        self.cursor = pt;
    }

    /// Remove the last vertex; `false` when nothing would remain
    fn retract(&mut self) -> bool {
        if self.vertices.len() <= 1 {
            return false;
        }
        self.vertices.pop();
        true
    }
}

// ===== Listener =====

/// Whether a gesture may continue after a listener callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawVerdict {
    Continue,
    Abort,
}

/// Reacts to the phases of a drawing gesture
#[allow(unused_variables)]
pub trait DrawListener {
    /// The first vertex was placed
    fn draw_start(&mut self, sketch: &Sketch, session: &mut EditSession) -> DrawVerdict {
        DrawVerdict::Continue
    }

    /// The sketch's coordinates changed; `ring` is its current ring
    fn sketch_changed(&mut self, ring: &Ring, session: &mut EditSession) -> DrawVerdict {
        DrawVerdict::Continue
    }

    /// The finished sketch was added to the source as `feature`
    fn draw_end(&mut self, sketch: &Sketch, feature: EntityId, session: &mut EditSession) {}

    /// The gesture was abandoned before finishing
    fn draw_abort(&mut self, sketch: &Sketch, session: &mut EditSession) {}
}

/// Listener for plain outer drawings: the finished shape simply stays
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepShape;

impl DrawListener for KeepShape {}

// ===== DrawTool =====

/// Polygon drawing tool, parameterized by what the drawing is for
#[derive(Debug, Clone)]
pub struct DrawTool<L> {
    kind: DrawKind,
    listener: L,
    sketch: Option<Sketch>,
}

impl DrawTool<KeepShape> {
    /// A tool drawing standalone shapes
    pub fn outer() -> Self {
        Self::new(DrawKind::Outer, KeepShape)
    }
}

impl<L: DrawListener> DrawTool<L> {
    pub fn new(kind: DrawKind, listener: L) -> Self {
        Self {
            kind,
            listener,
            sketch: None,
        }
    }

    /// The drawing in progress, if any
    pub fn sketch(&self) -> Option<&Sketch> {
        self.sketch.as_ref()
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Begin a gesture at `pos`, unless the listener refuses it
    fn start(&mut self, pos: Point, session: &mut EditSession) {
        let sketch = Sketch::new(self.kind, pos);
        match self.listener.draw_start(&sketch, session) {
            DrawVerdict::Continue => {
                tracing::debug!("Draw {:?}: started {} at {:?}", self.kind, sketch.id, pos);
                self.sketch = Some(sketch);
            }
            DrawVerdict::Abort => {
                tracing::debug!("Draw {:?}: start at {:?} refused", self.kind, pos);
            }
        }
    }

    /// Tell the listener the sketch changed, aborting if it objects
    fn notify_changed(&mut self, session: &mut EditSession) {
        let Some(sketch) = &self.sketch else {
            return;
        };
        let ring = sketch.ring();
        if self.listener.sketch_changed(&ring, session) == DrawVerdict::Abort {
            self.abort(session);
        }
    }

    /// Whether a click at `event` should close the ring
    fn is_finish_click(&self, sketch: &Sketch, event: &MouseEvent, tolerance: f64) -> bool {
        if event.count >= 2 {
            return true;
        }
        let near = |pt: &Point| pt.distance(event.pos) <= tolerance;
        sketch.vertices.first().is_some_and(near) || sketch.vertices.last().is_some_and(near)
    }

    /// Complete the gesture if enough vertices are placed.
    ///
    /// Returns whether the drawing finished.
    pub fn finish(&mut self, session: &mut EditSession) -> bool {
        let min_vertices = session.config.min_ring_vertices;
        let Some(sketch) = self.sketch.take_if(|s| s.vertices.len() >= min_vertices) else {
            return false;
        };

        let ring = sketch.finished_ring();
        if self.listener.sketch_changed(&ring, session) == DrawVerdict::Abort {
            self.listener.draw_abort(&sketch, session);
            return false;
        }

        let feature = session.source.add(Polygon::new(ring));
        tracing::debug!(
            "Draw {:?}: finished {} as {} ({} vertices)",
            self.kind,
            sketch.id,
            feature,
            sketch.vertices.len()
        );
        self.listener.draw_end(&sketch, feature, session);
        true
    }

    /// Abandon the gesture without adding anything
    pub fn abort(&mut self, session: &mut EditSession) {
        if let Some(sketch) = self.sketch.take() {
            tracing::debug!("Draw {:?}: aborted {}", self.kind, sketch.id);
            self.listener.draw_abort(&sketch, session);
        }
    }

    /// Retract the last vertex, aborting when none would remain
    pub fn remove_last_point(&mut self, session: &mut EditSession) {
        let Some(sketch) = &mut self.sketch else {
            return;
        };
        if sketch.retract() {
            self.notify_changed(session);
        } else {
            self.abort(session);
        }
    }
}

// ===== Tool Implementation =====

impl<L: DrawListener> Tool for DrawTool<L> {
    fn id(&self) -> ToolId {
        match self.kind {
            DrawKind::Outer => ToolId::Draw,
            DrawKind::Hole => ToolId::HoleDraw,
        }
    }

    fn key_down(&mut self, key: Key, session: &mut EditSession) -> bool {
        if self.sketch.is_none() {
            return false;
        }
        match key {
            Key::Enter => {
                self.finish(session);
            }
            Key::Escape => self.abort(session),
            Key::Backspace => self.remove_last_point(session),
        }
        true
    }

    fn sketch(&self) -> Option<&Sketch> {
        self.sketch.as_ref()
    }
}

// ===== MouseDelegate Implementation =====

impl<L: DrawListener> MouseDelegate for DrawTool<L> {
    type Data = EditSession;

    fn mouse_moved(&mut self, event: MouseEvent, data: &mut EditSession) {
        let Some(sketch) = &mut self.sketch else {
            return;
        };
        if sketch.cursor == event.pos {
            return;
        }
        sketch.cursor = event.pos;
        self.notify_changed(data);
    }

    fn left_click(&mut self, event: MouseEvent, data: &mut EditSession) {
        let Some(sketch) = &self.sketch else {
            self.start(event.pos, data);
            return;
        };

        if self.is_finish_click(sketch, &event, data.config.snap_tolerance) {
            // Too few vertices: closing is not possible yet, and placing a
            // vertex on top of an existing one would only add a duplicate
            self.finish(data);
            return;
        }

        if let Some(sketch) = &mut self.sketch {
            sketch.place(event.pos);
        }
        self.notify_changed(data);
    }

    fn left_drag_changed(&mut self, event: MouseEvent, _drag: Drag, data: &mut EditSession) {
        // Keep the rubber band under the pointer while the button is held
        self.mouse_moved(event, data);
    }

    fn cancel(&mut self, data: &mut EditSession) {
        self.abort(data);
    }
}
