// Copyright 2025 the Polyhole Authors
// SPDX-License-Identifier: Apache-2.0

//! The shared shape collection.
//!
//! `ShapeSource` is what every tool mutates and what the renderer reads. It
//! keeps shapes in insertion order, which doubles as paint order: the last
//! shape is topmost for hit testing. Every mutation bumps `revision` so the
//! renderer can tell when to repaint without diffing.

use super::entity_id::EntityId;
use super::geometry::{Polygon, extents_intersect};
use kurbo::{BezPath, Point, Rect};
use serde::Serialize;

/// A polygon feature in the collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    pub id: EntityId,
    pub geometry: Polygon,
}

impl Shape {
    /// Create a shape with a fresh id
    pub fn new(geometry: Polygon) -> Self {
        Self {
            id: EntityId::next(),
            geometry,
        }
    }

    pub fn extent(&self) -> Option<Rect> {
        self.geometry.extent()
    }

    /// Outline for the renderer, holes included
    pub fn to_bezpath(&self) -> BezPath {
        self.geometry.to_bezpath()
    }
}

/// Ordered, shared collection of shapes
#[derive(Debug, Clone, Default)]
pub struct ShapeSource {
    shapes: Vec<Shape>,
    revision: u64,
}

impl ShapeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new shape built from `geometry`, returning its id
    pub fn add(&mut self, geometry: Polygon) -> EntityId {
        let shape = Shape::new(geometry);
        let id = shape.id;
        self.insert(shape);
        id
    }

    /// Insert an existing shape on top of the others
    pub fn insert(&mut self, shape: Shape) {
        tracing::trace!("source: add {}", shape.id);
        self.shapes.push(shape);
        self.touch();
    }

    /// Remove a shape by id
    pub fn remove(&mut self, id: EntityId) -> Option<Shape> {
        let index = self.shapes.iter().position(|s| s.id == id)?;
        tracing::trace!("source: remove {}", id);
        let shape = self.shapes.remove(index);
        self.touch();
        Some(shape)
    }

    /// Remove every shape, returning how many were removed
    pub fn clear(&mut self) -> usize {
        let count = self.shapes.len();
        self.shapes.clear();
        self.touch();
        count
    }

    pub fn get(&self, id: EntityId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Replace a shape's geometry. Returns `false` if the shape is gone.
    pub fn set_geometry(&mut self, id: EntityId, geometry: Polygon) -> bool {
        let Some(shape) = self.shapes.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        shape.geometry = geometry;
        self.touch();
        true
    }

    /// Mutate a shape's geometry in place
    pub fn update_geometry<R>(
        &mut self,
        id: EntityId,
        f: impl FnOnce(&mut Polygon) -> R,
    ) -> Option<R> {
        let shape = self.shapes.iter_mut().find(|s| s.id == id)?;
        let result = f(&mut shape.geometry);
        self.touch();
        Some(result)
    }

    /// Iterate shapes bottom to top
    pub fn iter(&self) -> std::slice::Iter<'_, Shape> {
        self.shapes.iter()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Shapes whose extent intersects `extent`, in insertion order
    pub fn intersecting_extent(&self, extent: Rect) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().filter(move |shape| {
            shape
                .extent()
                .is_some_and(|own| extents_intersect(own, extent))
        })
    }

    /// Topmost shape whose filled area contains `pt` (holes excluded)
    pub fn shape_at(&self, pt: Point) -> Option<EntityId> {
        self.shapes
            .iter()
            .rev()
            .find(|shape| shape.geometry.contains(pt))
            .map(|shape| shape.id)
    }

    /// Mutation counter for the renderer
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Ring;

    fn square(min: f64, max: f64) -> Polygon {
        Polygon::new(Ring::closed([
            Point::new(min, min),
            Point::new(max, min),
            Point::new(max, max),
            Point::new(min, max),
        ]))
    }

    #[test]
    fn add_remove_and_revision() {
        let mut source = ShapeSource::new();
        let r0 = source.revision();
        let id = source.add(square(0.0, 10.0));
        assert_eq!(source.len(), 1);
        assert!(source.revision() > r0);

        let removed = source.remove(id).unwrap();
        assert_eq!(removed.id, id);
        assert!(source.is_empty());
        assert!(source.remove(id).is_none());
    }

    #[test]
    fn intersecting_extent_in_insertion_order() {
        let mut source = ShapeSource::new();
        let big = source.add(square(0.0, 100.0));
        let _far = source.add(square(200.0, 300.0));
        let small = source.add(square(10.0, 20.0));

        let hits: Vec<EntityId> = source
            .intersecting_extent(Rect::new(15.0, 15.0, 15.0, 15.0))
            .map(|s| s.id)
            .collect();
        assert_eq!(hits, vec![big, small]);
    }

    #[test]
    fn shape_at_prefers_topmost() {
        let mut source = ShapeSource::new();
        let _bottom = source.add(square(0.0, 10.0));
        let top = source.add(square(5.0, 15.0));
        assert_eq!(source.shape_at(Point::new(7.0, 7.0)), Some(top));
        assert_eq!(source.shape_at(Point::new(50.0, 50.0)), None);
    }

    #[test]
    fn set_geometry_on_missing_shape_is_rejected() {
        let mut source = ShapeSource::new();
        let id = source.add(square(0.0, 1.0));
        source.remove(id);
        let before = source.revision();
        assert!(!source.set_geometry(id, square(0.0, 2.0)));
        assert_eq!(source.revision(), before);
    }

    #[test]
    fn clear_reports_count() {
        let mut source = ShapeSource::new();
        source.add(square(0.0, 1.0));
        source.add(square(2.0, 3.0));
        assert_eq!(source.clear(), 2);
        assert!(source.is_empty());
    }
}
