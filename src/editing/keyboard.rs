// Copyright 2025 the Polyhole Authors
// SPDX-License-Identifier: Apache-2.0

//! Keys the drawing tools respond to

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    /// Finish the current drawing
    Enter,
    /// Abort the current drawing
    Escape,
    /// Retract the last placed vertex
    Backspace,
}
