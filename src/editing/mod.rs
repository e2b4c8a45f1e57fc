// Copyright 2025 the Polyhole Authors
// SPDX-License-Identifier: Apache-2.0

//! Editing model and interaction

pub mod background_image;
pub mod deferred;
pub mod keyboard;
pub mod mouse;
pub mod selection;
pub mod session;

pub use background_image::BackgroundImage;
pub use deferred::{Deferred, DeferredQueue};
pub use keyboard::Key;
pub use mouse::{Drag, Modifiers, Mouse, MouseButton, MouseDelegate, MouseEvent};
pub use selection::Selection;
pub use session::EditSession;
