// Copyright 2025 the Polyhole Authors
// SPDX-License-Identifier: Apache-2.0

//! Default settings and interaction constants.
//!
//! These are the values used when no config file overrides them. Runtime
//! overrides live in `config.rs`; everything is in image pixel units.

// ============================================================================
// DRAW SETTINGS
// ============================================================================
/// Clicking within this distance of the first vertex closes the polygon
const SNAP_TOLERANCE: f64 = 12.0;

/// Minimum number of placed vertices before a drawing can finish
const MIN_RING_VERTICES: usize = 3;

// ============================================================================
// POINTER SETTINGS
// ============================================================================
/// Pointer travel (pixels) before a press turns into a drag
const DRAG_THRESHOLD: f64 = 3.0;

// ============================================================================
// MODIFY SETTINGS
// ============================================================================
/// Grab radius for vertices and edges while modifying
const VERTEX_TOLERANCE: f64 = 10.0;

// ============================================================================
// LOGGING
// ============================================================================
/// Default `tracing` directive, extended by `RUST_LOG`
const LOG_FILTER: &str = "polyhole=info";

/// Config file looked up in the working directory when none is given
const CONFIG_FILE_NAME: &str = "polyhole.toml";

/// Surface size for replay scripts that name neither an image nor a size
const DEFAULT_SURFACE_SIZE: u32 = 1024;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Polygon drawing defaults
pub mod draw {
    /// Close-on-first-vertex distance
    pub const SNAP_TOLERANCE: f64 = super::SNAP_TOLERANCE;

    /// Minimum placed vertices for a finished ring
    pub const MIN_RING_VERTICES: usize = super::MIN_RING_VERTICES;
}

/// Pointer state machine defaults
pub mod pointer {
    pub const DRAG_THRESHOLD: f64 = super::DRAG_THRESHOLD;
}

/// Modify tool defaults
pub mod modify {
    pub const VERTEX_TOLERANCE: f64 = super::VERTEX_TOLERANCE;
}

/// Logging and startup defaults
pub mod app {
    pub const LOG_FILTER: &str = super::LOG_FILTER;
    pub const CONFIG_FILE_NAME: &str = super::CONFIG_FILE_NAME;
    pub const DEFAULT_SURFACE_SIZE: u32 = super::DEFAULT_SURFACE_SIZE;
}
