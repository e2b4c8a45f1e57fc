// Copyright 2025 the Polyhole Authors
// SPDX-License-Identifier: Apache-2.0

//! Ring and polygon geometry in image pixel space.
//!
//! A `Ring` is always stored closed: the first point is repeated at the end,
//! matching the coordinate layout the renderer expects. A `Polygon` is a list
//! of rings where ring 0 is the outer boundary and every later ring is an
//! interior ring (a hole). Hole containment is not validated here.

use kurbo::{BezPath, Line, ParamCurve, ParamCurveNearest, Point, Rect, Shape};
use serde::Serialize;

/// Accuracy passed to kurbo's nearest-point queries. Segments are straight
/// lines, so the value only matters for the trait signature.
const NEAREST_ACCURACY: f64 = 1e-9;

// ============================================================================
// RING
// ============================================================================

/// An ordered, closed sequence of points bounding a region
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(into = "Vec<[f64; 2]>")]
pub struct Ring {
    points: Vec<Point>,
}

impl Ring {
    /// Build a ring from a point list, closing it if needed.
    ///
    /// An empty input gives an empty ring.
    pub fn closed(points: impl IntoIterator<Item = Point>) -> Self {
        let mut points: Vec<Point> = points.into_iter().collect();
        if let (Some(&first), Some(&last)) = (points.first(), points.last())
            && (points.len() == 1 || first != last)
        {
            points.push(first);
        }
        Self { points }
    }

    /// All points including the closing duplicate
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Distinct vertices (the closing duplicate is left out)
    pub fn vertices(&self) -> &[Point] {
        match self.points.len() {
            0 => &[],
            n => &self.points[..n - 1],
        }
    }

    /// Number of distinct vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices().len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Axis-aligned bounding box, `None` for an empty ring
    pub fn extent(&self) -> Option<Rect> {
        let (first, rest) = self.points.split_first()?;
        Some(
            rest.iter()
                .fold(Rect::from_points(*first, *first), |rect, pt| {
                    rect.union_pt(*pt)
                }),
        )
    }

    /// Signed area (positive for counter-clockwise in a y-up frame)
    pub fn signed_area(&self) -> f64 {
        if self.vertex_count() < 3 {
            return 0.0;
        }
        self.to_bezpath().area()
    }

    /// Unsigned enclosed area
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Point-in-ring test (non-zero winding)
    pub fn contains(&self, pt: Point) -> bool {
        self.vertex_count() >= 3 && self.to_bezpath().winding(pt) != 0
    }

    /// Convert to a closed `BezPath` for rendering and hit testing
    pub fn to_bezpath(&self) -> BezPath {
        let mut path = BezPath::new();
        append_ring(&mut path, self);
        path
    }

    /// Iterate the ring's edges as lines
    pub fn segments(&self) -> impl Iterator<Item = Line> + '_ {
        self.points.windows(2).map(|w| Line::new(w[0], w[1]))
    }

    /// Find the vertex closest to `pt` within `tolerance`.
    ///
    /// Returns the vertex index and its distance.
    pub fn nearest_vertex(&self, pt: Point, tolerance: f64) -> Option<(usize, f64)> {
        self.vertices()
            .iter()
            .enumerate()
            .map(|(i, v)| (i, v.distance(pt)))
            .filter(|(_, dist)| *dist <= tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Find the edge closest to `pt`.
    ///
    /// Returns the index of the edge's start vertex, the nearest point on the
    /// edge, and the distance to it.
    pub fn nearest_segment(&self, pt: Point) -> Option<(usize, Point, f64)> {
        self.segments()
            .enumerate()
            .map(|(i, line)| {
                let nearest = line.nearest(pt, NEAREST_ACCURACY);
                (i, line.eval(nearest.t), nearest.distance_sq.sqrt())
            })
            .min_by(|a, b| a.2.total_cmp(&b.2))
    }

    /// Move vertex `index`, keeping the ring closed
    pub fn set_vertex(&mut self, index: usize, pt: Point) {
        let count = self.vertex_count();
        if index >= count {
            return;
        }
        self.points[index] = pt;
        if index == 0 {
            self.points[count] = pt;
        }
    }

    /// Insert a new vertex after vertex `after`
    pub fn insert_vertex(&mut self, after: usize, pt: Point) {
        if after >= self.vertex_count() {
            return;
        }
        self.points.insert(after + 1, pt);
    }

    /// Remove vertex `index` if the ring keeps at least three vertices.
    ///
    /// Returns whether a vertex was removed.
    pub fn remove_vertex(&mut self, index: usize) -> bool {
        let count = self.vertex_count();
        if count <= 3 || index >= count {
            return false;
        }
        self.points.remove(index);
        if index == 0 {
            // The closing point still holds the old first vertex
            let first = self.points[0];
            if let Some(last) = self.points.last_mut() {
                *last = first;
            }
        }
        true
    }
}

impl From<Ring> for Vec<[f64; 2]> {
    fn from(ring: Ring) -> Self {
        ring.points.iter().map(|p| [p.x, p.y]).collect()
    }
}

fn append_ring(path: &mut BezPath, ring: &Ring) {
    let mut vertices = ring.vertices().iter();
    let Some(first) = vertices.next() else {
        return;
    };
    path.move_to(*first);
    for pt in vertices {
        path.line_to(*pt);
    }
    path.close_path();
}

// ============================================================================
// POLYGON
// ============================================================================

/// A polygon: one outer ring followed by zero or more interior rings
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Polygon {
    rings: Vec<Ring>,
}

impl Polygon {
    /// A polygon with only an outer ring
    pub fn new(outer: Ring) -> Self {
        Self { rings: vec![outer] }
    }

    /// A polygon from rings, ring 0 being the outer ring
    pub fn from_rings(rings: Vec<Ring>) -> Self {
        Self { rings }
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn rings_mut(&mut self) -> &mut [Ring] {
        &mut self.rings
    }

    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    pub fn outer(&self) -> Option<&Ring> {
        self.rings.first()
    }

    /// Interior rings (holes)
    pub fn interiors(&self) -> &[Ring] {
        self.rings.get(1..).unwrap_or(&[])
    }

    /// Append a ring as the new last interior ring
    pub fn push_ring(&mut self, ring: Ring) {
        self.rings.push(ring);
    }

    /// A copy keeping only the first `count` rings
    pub fn truncated(&self, count: usize) -> Self {
        let count = count.min(self.rings.len());
        Self {
            rings: self.rings[..count].to_vec(),
        }
    }

    /// Extent of the outer ring
    pub fn extent(&self) -> Option<Rect> {
        self.outer().and_then(Ring::extent)
    }

    /// Area enclosed by the outer ring, holes ignored
    pub fn outer_area(&self) -> f64 {
        self.outer().map_or(0.0, Ring::area)
    }

    /// Inside the outer ring and outside every interior ring
    pub fn contains(&self, pt: Point) -> bool {
        self.outer().is_some_and(|outer| outer.contains(pt))
            && !self.interiors().iter().any(|hole| hole.contains(pt))
    }

    /// All rings as one path, to be filled even-odd
    pub fn to_bezpath(&self) -> BezPath {
        let mut path = BezPath::new();
        for ring in &self.rings {
            append_ring(&mut path, ring);
        }
        path
    }
}

/// The extent of a single point, used for gesture start lookups
pub fn point_extent(pt: Point) -> Rect {
    Rect::from_points(pt, pt)
}

/// Closed-interval extent intersection.
///
/// `kurbo::Rect::intersect` treats touching edges as an empty overlap, while
/// an extent query must also match degenerate (point) extents on a border.
pub fn extents_intersect(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}
