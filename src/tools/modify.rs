// Copyright 2025 the Polyhole Authors
// SPDX-License-Identifier: Apache-2.0

//! The modify tool for reshaping existing shapes
//!
//! Press near a vertex of any ring (outer or hole) and drag to move it.
//! Pressing near an edge and dragging inserts a new vertex there first.
//! Alt-click on a vertex deletes it, as long as its ring keeps three.

use crate::editing::{Drag, EditSession, MouseDelegate, MouseEvent};
use crate::model::{EntityId, Polygon};
use crate::tools::{Tool, ToolId};
use kurbo::Point;

/// A vertex addressed inside the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexRef {
    pub shape: EntityId,
    pub ring: usize,
    pub vertex: usize,
}

/// What a press landed on
#[derive(Debug, Clone, Copy, PartialEq)]
enum Grab {
    Vertex(VertexRef),
    /// An edge; `after` is the index of the edge's start vertex
    Edge {
        shape: EntityId,
        ring: usize,
        after: usize,
        at: Point,
    },
}

#[derive(Debug, Clone, Default)]
enum GestureState {
    #[default]
    Ready,
    /// Pressed on something, not yet dragging
    Pressed(Grab),
    /// Moving a vertex; keeps the geometry from before the drag
    Dragging { vertex: VertexRef, original: Polygon },
}

/// The modify tool
#[derive(Debug, Clone, Default)]
pub struct ModifyTool {
    gesture: GestureState,
}

impl ModifyTool {
    /// The vertex currently being dragged
    pub fn active_vertex(&self) -> Option<VertexRef> {
        match &self.gesture {
            GestureState::Dragging { vertex, .. } => Some(*vertex),
            _ => None,
        }
    }

    /// Find the vertex, or failing that the edge, under `pos`.
    ///
    /// Shapes are searched topmost first; vertices anywhere win over edges.
    fn grab_at(pos: Point, session: &EditSession) -> Option<Grab> {
        let tolerance = session.config.vertex_tolerance;
        let shapes: Vec<_> = session.source.iter().rev().collect();

        let vertex = shapes.iter().find_map(|shape| {
            shape
                .geometry
                .rings()
                .iter()
                .enumerate()
                .filter_map(|(ring, r)| {
                    r.nearest_vertex(pos, tolerance)
                        .map(|(vertex, dist)| (ring, vertex, dist))
                })
                .min_by(|a, b| a.2.total_cmp(&b.2))
                .map(|(ring, vertex, _)| VertexRef {
                    shape: shape.id,
                    ring,
                    vertex,
                })
        });
        if let Some(vertex) = vertex {
            return Some(Grab::Vertex(vertex));
        }

        shapes.iter().find_map(|shape| {
            shape
                .geometry
                .rings()
                .iter()
                .enumerate()
                .filter_map(|(ring, r)| {
                    r.nearest_segment(pos)
                        .filter(|(_, _, dist)| *dist <= tolerance)
                        .map(|(after, at, dist)| (ring, after, at, dist))
                })
                .min_by(|a, b| a.3.total_cmp(&b.3))
                .map(|(ring, after, at, _)| Grab::Edge {
                    shape: shape.id,
                    ring,
                    after,
                    at,
                })
        })
    }

    /// Turn a grab into a draggable vertex, inserting one for edges
    fn begin_drag(grab: Grab, session: &mut EditSession) -> Option<(VertexRef, Polygon)> {
        let (shape, ring) = match grab {
            Grab::Vertex(v) => (v.shape, v.ring),
            Grab::Edge { shape, ring, .. } => (shape, ring),
        };
        let original = session.source.get(shape)?.geometry.clone();
        let vertex = match grab {
            Grab::Vertex(v) => v,
            Grab::Edge { after, at, .. } => {
                session.source.update_geometry(shape, |geometry| {
                    if let Some(r) = geometry.rings_mut().get_mut(ring) {
                        r.insert_vertex(after, at);
                    }
                })?;
                tracing::debug!("Modify: inserted vertex on {} ring {}", shape, ring);
                VertexRef {
                    shape,
                    ring,
                    vertex: after + 1,
                }
            }
        };
        Some((vertex, original))
    }

    fn move_vertex(vertex: VertexRef, to: Point, session: &mut EditSession) -> bool {
        session
            .source
            .update_geometry(vertex.shape, |geometry| {
                if let Some(ring) = geometry.rings_mut().get_mut(vertex.ring) {
                    ring.set_vertex(vertex.vertex, to);
                }
            })
            .is_some()
    }

    fn delete_vertex(vertex: VertexRef, session: &mut EditSession) -> bool {
        session
            .source
            .update_geometry(vertex.shape, |geometry| {
                geometry
                    .rings_mut()
                    .get_mut(vertex.ring)
                    .is_some_and(|ring| ring.remove_vertex(vertex.vertex))
            })
            .unwrap_or(false)
    }
}

// ===== Tool Implementation =====

impl Tool for ModifyTool {
    fn id(&self) -> ToolId {
        ToolId::Modify
    }
}

// ===== MouseDelegate Implementation =====

impl MouseDelegate for ModifyTool {
    type Data = EditSession;

    fn left_down(&mut self, event: MouseEvent, data: &mut EditSession) {
        self.gesture = match Self::grab_at(event.pos, data) {
            Some(grab) => GestureState::Pressed(grab),
            None => GestureState::Ready,
        };
    }

    fn left_click(&mut self, event: MouseEvent, data: &mut EditSession) {
        let gesture = std::mem::take(&mut self.gesture);
        if let GestureState::Pressed(Grab::Vertex(vertex)) = gesture
            && event.mods.alt_only()
        {
            if Self::delete_vertex(vertex, data) {
                tracing::debug!("Modify: deleted vertex {:?}", vertex);
            } else {
                tracing::debug!("Modify: ring too small to delete {:?}", vertex);
            }
        }
    }

    fn left_drag_began(&mut self, event: MouseEvent, _drag: Drag, data: &mut EditSession) {
        let GestureState::Pressed(grab) = std::mem::take(&mut self.gesture) else {
            return;
        };
        let Some((vertex, original)) = Self::begin_drag(grab, data) else {
            return;
        };
        Self::move_vertex(vertex, event.pos, data);
        self.gesture = GestureState::Dragging { vertex, original };
    }

    fn left_drag_changed(&mut self, event: MouseEvent, _drag: Drag, data: &mut EditSession) {
        if let GestureState::Dragging { vertex, .. } = self.gesture
            && !Self::move_vertex(vertex, event.pos, data)
        {
            tracing::warn!("Modify: shape {} vanished during drag", vertex.shape);
            self.gesture = GestureState::Ready;
        }
    }

    fn left_drag_ended(&mut self, event: MouseEvent, _drag: Drag, data: &mut EditSession) {
        if let GestureState::Dragging { vertex, .. } = std::mem::take(&mut self.gesture) {
            Self::move_vertex(vertex, event.pos, data);
            tracing::debug!("Modify: moved {:?} to {:?}", vertex, event.pos);
        }
    }

    fn left_up(&mut self, _event: MouseEvent, _data: &mut EditSession) {
        if !matches!(self.gesture, GestureState::Pressed(_)) {
            self.gesture = GestureState::Ready;
        }
    }

    fn cancel(&mut self, data: &mut EditSession) {
        if let GestureState::Dragging { vertex, original } = std::mem::take(&mut self.gesture) {
            data.source.set_geometry(vertex.shape, original);
            tracing::debug!("Modify: drag on {} cancelled", vertex.shape);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::{Modifiers, Mouse, MouseButton};
    use crate::model::Ring;

    fn square(min: f64, max: f64) -> Ring {
        Ring::closed([
            Point::new(min, min),
            Point::new(max, min),
            Point::new(max, max),
            Point::new(min, max),
        ])
    }

    fn left(x: f64, y: f64) -> MouseEvent {
        MouseEvent::new(Point::new(x, y), Some(MouseButton::Left))
    }

    fn drag(
        mouse: &mut Mouse,
        tool: &mut ModifyTool,
        session: &mut EditSession,
        from: (f64, f64),
        to: (f64, f64),
    ) {
        mouse.mouse_down(left(from.0, from.1), tool, session);
        mouse.mouse_moved(left(to.0, to.1), tool, session);
        mouse.mouse_up(left(to.0, to.1), tool, session);
    }

    #[test]
    fn drag_vertex_moves_it() {
        let mut session = EditSession::default();
        let id = session.source.add(Polygon::new(square(0.0, 100.0)));
        let mut tool = ModifyTool::default();
        let mut mouse = Mouse::new();

        drag(&mut mouse, &mut tool, &mut session, (101.0, 99.0), (150.0, 150.0));

        let outer = session.source.get(id).unwrap().geometry.outer().unwrap().clone();
        assert_eq!(outer.points()[2], Point::new(150.0, 150.0));
        assert_eq!(outer.vertex_count(), 4);
    }

    #[test]
    fn drag_first_vertex_keeps_ring_closed() {
        let mut session = EditSession::default();
        let id = session.source.add(Polygon::new(square(0.0, 100.0)));
        let mut tool = ModifyTool::default();
        let mut mouse = Mouse::new();

        drag(&mut mouse, &mut tool, &mut session, (1.0, 1.0), (-20.0, -20.0));

        let outer = session.source.get(id).unwrap().geometry.outer().unwrap().clone();
        assert_eq!(outer.points()[0], Point::new(-20.0, -20.0));
        assert_eq!(outer.points()[4], Point::new(-20.0, -20.0));
    }

    #[test]
    fn drag_edge_inserts_vertex() {
        let mut session = EditSession::default();
        let id = session.source.add(Polygon::new(square(0.0, 100.0)));
        let mut tool = ModifyTool::default();
        let mut mouse = Mouse::new();

        drag(&mut mouse, &mut tool, &mut session, (50.0, 2.0), (50.0, -30.0));

        let outer = session.source.get(id).unwrap().geometry.outer().unwrap().clone();
        assert_eq!(outer.vertex_count(), 5);
        assert_eq!(outer.points()[1], Point::new(50.0, -30.0));
    }

    #[test]
    fn click_on_edge_does_not_insert() {
        let mut session = EditSession::default();
        let id = session.source.add(Polygon::new(square(0.0, 100.0)));
        let mut tool = ModifyTool::default();
        let mut mouse = Mouse::new();

        mouse.mouse_down(left(50.0, 2.0), &mut tool, &mut session);
        mouse.mouse_up(left(50.0, 2.0), &mut tool, &mut session);

        let geometry = &session.source.get(id).unwrap().geometry;
        assert_eq!(geometry.outer().unwrap().vertex_count(), 4);
    }

    #[test]
    fn hole_vertices_are_editable() {
        let mut session = EditSession::default();
        let id = session
            .source
            .add(Polygon::from_rings(vec![square(0.0, 100.0), square(40.0, 60.0)]));
        let mut tool = ModifyTool::default();
        let mut mouse = Mouse::new();

        drag(&mut mouse, &mut tool, &mut session, (60.0, 60.0), (70.0, 70.0));

        let geometry = &session.source.get(id).unwrap().geometry;
        assert_eq!(geometry.interiors()[0].points()[2], Point::new(70.0, 70.0));
        assert_eq!(geometry.outer(), Some(&square(0.0, 100.0)));
    }

    #[test]
    fn alt_click_deletes_vertex() {
        let mut session = EditSession::default();
        let pentagon = Ring::closed([
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(120.0, 50.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ]);
        let id = session.source.add(Polygon::new(pentagon));
        let mut tool = ModifyTool::default();
        let mut mouse = Mouse::new();
        let alt = Modifiers {
            alt: true,
            ..Modifiers::default()
        };
        let ev = MouseEvent::with_modifiers(Point::new(120.0, 50.0), Some(MouseButton::Left), alt);

        mouse.mouse_down(ev, &mut tool, &mut session);
        mouse.mouse_up(ev, &mut tool, &mut session);

        let outer = session.source.get(id).unwrap().geometry.outer().unwrap().clone();
        assert_eq!(outer.vertex_count(), 4);
        assert!(!outer.points().contains(&Point::new(120.0, 50.0)));
    }

    #[test]
    fn cancel_restores_original() {
        let mut session = EditSession::default();
        let id = session.source.add(Polygon::new(square(0.0, 100.0)));
        let mut tool = ModifyTool::default();
        let mut mouse = Mouse::new();

        mouse.mouse_down(left(100.0, 100.0), &mut tool, &mut session);
        mouse.mouse_moved(left(130.0, 130.0), &mut tool, &mut session);
        assert!(tool.active_vertex().is_some());
        mouse.cancel(&mut tool, &mut session);

        assert_eq!(
            session.source.get(id).unwrap().geometry,
            Polygon::new(square(0.0, 100.0))
        );
    }
}
