// Copyright 2025 the Polyhole Authors
// SPDX-License-Identifier: Apache-2.0

//! Live hole cutting.
//!
//! `HoleFusion` is the `DrawListener` behind the hole tool. It turns an
//! in-progress drawing into an interior ring of an existing shape while the
//! user is still drawing:
//!
//! - **Armed** (draw start): find the shapes whose extent intersects the
//!   first vertex and pick one as the target. If there is none the gesture
//!   is refused and nothing is touched.
//! - **Live** (every coordinate change): rebuild the target from the rings
//!   it had when the gesture started plus the current sketch ring. The
//!   rebuild never patches the previous result, so shrinking or degenerate
//!   sketches always produce a complete polygon.
//! - **Completed** (draw end): the draw tool has added the finished sketch
//!   to the source as a feature; it only exists to be discarded, so its
//!   removal is scheduled for the end of the turn. The target reference is
//!   dropped.
//!
//! The target reference lives in this listener and only for one gesture.

use crate::config::HoleTargetRule;
use crate::editing::{Deferred, EditSession};
use crate::model::{EntityId, Polygon, Ring, Shape};
use crate::tools::draw::{DrawKind, DrawListener, DrawTool, DrawVerdict, Sketch};

/// The shape receiving the hole of the current gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoleTarget {
    pub id: EntityId,
    /// Ring count of the target when the gesture started; every ring past
    /// this index belongs to the current gesture
    pub base_rings: usize,
}

/// Listener fusing a hole drawing into its target shape
#[derive(Debug, Clone, Default)]
pub struct HoleFusion {
    target: Option<HoleTarget>,
}

impl HoleFusion {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current gesture's target, if a gesture is live
    pub fn target(&self) -> Option<HoleTarget> {
        self.target
    }
}

/// A drawing tool whose drawings become holes
pub type HoleTool = DrawTool<HoleFusion>;

impl HoleTool {
    pub fn hole() -> Self {
        DrawTool::new(DrawKind::Hole, HoleFusion::new())
    }
}

/// Rebuild a target from its first `base_rings` rings plus `hole`.
///
/// Pure: the same inputs always give the same polygon.
pub fn rebuild(target: &Polygon, base_rings: usize, hole: &Ring) -> Polygon {
    let mut geometry = target.truncated(base_rings);
    geometry.push_ring(hole.clone());
    geometry
}

/// Choose the hole target among `candidates` (in insertion order).
///
/// `SmallestArea` prefers the shape with the smallest outer ring, keeping
/// the earliest one on ties; `FirstFound` takes the earliest.
pub fn pick_target<'a>(
    candidates: impl IntoIterator<Item = &'a Shape>,
    rule: HoleTargetRule,
) -> Option<&'a Shape> {
    let mut candidates = candidates.into_iter();
    match rule {
        HoleTargetRule::FirstFound => candidates.next(),
        HoleTargetRule::SmallestArea => candidates.min_by(|a, b| {
            a.geometry
                .outer_area()
                .total_cmp(&b.geometry.outer_area())
        }),
    }
}

impl DrawListener for HoleFusion {
    fn draw_start(&mut self, sketch: &Sketch, session: &mut EditSession) -> DrawVerdict {
        let extent = sketch.start_extent();
        // Finished hole sketches waiting for removal are not real shapes
        let candidates = session
            .source
            .intersecting_extent(extent)
            .filter(|shape| !session.deferred.contains(&Deferred::RemoveShape(shape.id)));

        let Some(shape) = pick_target(candidates, session.config.hole_target) else {
            tracing::debug!("Hole: no shape under {:?}, aborting", extent.origin());
            self.target = None;
            return DrawVerdict::Abort;
        };

        let target = HoleTarget {
            id: shape.id,
            base_rings: shape.geometry.ring_count(),
        };
        tracing::debug!(
            "Hole: armed on {} with {} existing rings",
            target.id,
            target.base_rings
        );
        self.target = Some(target);
        DrawVerdict::Continue
    }

    fn sketch_changed(&mut self, ring: &Ring, session: &mut EditSession) -> DrawVerdict {
        let Some(target) = self.target else {
            return DrawVerdict::Continue;
        };
        let Some(shape) = session.source.get(target.id) else {
            tracing::warn!("Hole: target {} disappeared mid-gesture", target.id);
            self.target = None;
            return DrawVerdict::Abort;
        };

        let geometry = rebuild(&shape.geometry, target.base_rings, ring);
        session.source.set_geometry(target.id, geometry);
        DrawVerdict::Continue
    }

    fn draw_end(&mut self, sketch: &Sketch, feature: EntityId, session: &mut EditSession) {
        session.deferred.schedule(Deferred::RemoveShape(feature));
        if let Some(target) = self.target.take() {
            tracing::info!(
                "Hole: cut {} into {} ({} vertices)",
                sketch.id,
                target.id,
                sketch.vertices().len()
            );
        }
    }

    fn draw_abort(&mut self, _sketch: &Sketch, session: &mut EditSession) {
        let Some(target) = self.target.take() else {
            return;
        };
        // Drop the ring this gesture contributed, keep everything before it
        let restored = session
            .source
            .get(target.id)
            .map(|shape| shape.geometry.truncated(target.base_rings));
        if let Some(geometry) = restored {
            session.source.set_geometry(target.id, geometry);
            tracing::debug!("Hole: gesture on {} abandoned, ring removed", target.id);
        }
    }
}
