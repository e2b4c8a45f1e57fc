// Copyright 2025 the Polyhole Authors
// SPDX-License-Identifier: Apache-2.0

//! Shape data model

pub mod entity_id;
pub mod geometry;
pub mod source;

pub use entity_id::EntityId;
pub use geometry::{Polygon, Ring};
pub use source::{Shape, ShapeSource};
