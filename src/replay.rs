// Copyright 2025 the Polyhole Authors
// SPDX-License-Identifier: Apache-2.0

//! Headless replay of editing sessions.
//!
//! A script is a JSON document naming the background and a list of input
//! steps. Each step is fed to an `Editor` as one event turn, so deferred
//! work is flushed after every step the same way a host flushes it after
//! each render pass.
//!
//! ```json
//! {
//!   "width": 200, "height": 200,
//!   "steps": [
//!     { "trigger": "draw" },
//!     { "click": { "at": [0, 0] } },
//!     { "move": { "at": [40, 0] } },
//!     { "key": "enter" },
//!     "tick"
//!   ]
//! }
//! ```

use crate::config::Config;
use crate::editing::{BackgroundImage, Key, Modifiers, MouseButton, MouseEvent};
use crate::editor::Editor;
use crate::error::{self, Result};
use crate::mode::{Mode, Trigger};
use crate::model::Shape;
use crate::settings;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A replay script
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Background image, relative to the script's directory
    #[serde(default)]
    pub image: Option<PathBuf>,
    /// Surface width when no image is given
    #[serde(default)]
    pub width: Option<u32>,
    /// Surface height when no image is given
    #[serde(default)]
    pub height: Option<u32>,
    pub steps: Vec<Step>,
}

/// One input event
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Trigger(Trigger),
    /// Press and release without moving
    Click(Pointer),
    Down(Pointer),
    Move(Pointer),
    Up(Pointer),
    Key(Key),
    /// An event turn with no input
    Tick,
}

/// Pointer position and modifiers of a step
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pointer {
    pub at: [f64; 2],
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub shift: bool,
    /// Click count; 2 for a double click
    #[serde(default = "single_click")]
    pub count: u8,
}

fn single_click() -> u8 {
    1
}

impl Pointer {
    fn event(&self, button: Option<MouseButton>) -> MouseEvent {
        let mods = Modifiers {
            alt: self.alt,
            shift: self.shift,
            ..Modifiers::default()
        };
        MouseEvent::with_modifiers(Point::new(self.at[0], self.at[1]), button, mods)
            .with_count(self.count)
    }
}

/// What a replay prints: the final mode and every shape
#[derive(Debug, Serialize)]
pub struct Outcome<'a> {
    pub mode: Mode,
    pub shapes: Vec<&'a Shape>,
}

impl<'a> Outcome<'a> {
    pub fn of(editor: &'a Editor) -> Self {
        Self {
            mode: editor.mode(),
            shapes: editor.source().iter().collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Script {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a script file; a relative image path is resolved against the
    /// script's directory
    pub fn load(path: &Path) -> Result<Self> {
        let text = error::read_to_string(path)?;
        let mut script = Self::from_json(&text)?;
        if let Some(image) = script.image.take() {
            let base = path.parent().unwrap_or_else(|| Path::new(""));
            script.image = Some(base.join(image));
        }
        tracing::info!(
            "Loaded script {} ({} steps)",
            path.display(),
            script.steps.len()
        );
        Ok(script)
    }

    /// The background the script runs over
    pub fn background(&self) -> Result<BackgroundImage> {
        if let Some(path) = &self.image {
            return BackgroundImage::load(path);
        }
        let size = settings::app::DEFAULT_SURFACE_SIZE;
        Ok(BackgroundImage::with_size(
            self.width.unwrap_or(size),
            self.height.unwrap_or(size),
        ))
    }

    /// Run every step against a fresh editor
    pub fn run(&self, config: Config) -> Result<Editor> {
        let mut editor = Editor::new(config);
        editor.set_background(self.background()?);
        for (index, step) in self.steps.iter().enumerate() {
            tracing::trace!("Replay: step {} {:?}", index, step);
            apply(&mut editor, step);
            editor.end_turn();
        }
        Ok(editor)
    }
}

/// Feed one step to the editor
pub fn apply(editor: &mut Editor, step: &Step) {
    let left = Some(MouseButton::Left);
    match step {
        Step::Trigger(trigger) => {
            editor.trigger(*trigger);
        }
        Step::Click(pointer) => {
            editor.pointer_down(pointer.event(left));
            editor.pointer_up(pointer.event(left));
        }
        Step::Down(pointer) => editor.pointer_down(pointer.event(left)),
        Step::Move(pointer) => editor.pointer_moved(pointer.event(None)),
        Step::Up(pointer) => editor.pointer_up(pointer.event(left)),
        Step::Key(key) => {
            if !editor.key_down(*key) {
                tracing::debug!("Replay: {:?} unused", key);
            }
        }
        Step::Tick => {}
    }
}
