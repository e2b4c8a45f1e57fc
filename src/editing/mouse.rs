// Copyright 2025 the Polyhole Authors
// SPDX-License-Identifier: Apache-2.0

//! Pointer state machine.
//!
//! `Mouse` turns raw press/move/release events into higher level callbacks:
//! a press and release without much travel is a click, anything else is a
//! drag with began/changed/ended phases. Tools implement `MouseDelegate` and
//! only override the callbacks they care about.

use crate::settings;
use kurbo::Point;

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Keyboard modifiers held during a pointer event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Alt and nothing else
    pub fn alt_only(&self) -> bool {
        self.alt && !self.shift && !self.ctrl && !self.meta
    }

    pub fn none(&self) -> bool {
        !(self.shift || self.ctrl || self.alt || self.meta)
    }
}

/// A pointer event in image pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    pub pos: Point,
    pub button: Option<MouseButton>,
    pub mods: Modifiers,
    /// Click count reported by the host (2 for a double click)
    pub count: u8,
}

impl MouseEvent {
    pub fn new(pos: Point, button: Option<MouseButton>) -> Self {
        Self::with_modifiers(pos, button, Modifiers::default())
    }

    pub fn with_modifiers(pos: Point, button: Option<MouseButton>, mods: Modifiers) -> Self {
        Self {
            pos,
            button,
            mods,
            count: 1,
        }
    }

    pub fn with_count(mut self, count: u8) -> Self {
        self.count = count;
        self
    }
}

/// Positions of an ongoing drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    pub start: Point,
    pub prev: Point,
    pub current: Point,
}

/// Receiver of the callbacks produced by `Mouse`
#[allow(unused_variables)]
pub trait MouseDelegate {
    type Data;

    fn mouse_moved(&mut self, event: MouseEvent, data: &mut Self::Data) {}

    fn left_down(&mut self, event: MouseEvent, data: &mut Self::Data) {}

    fn left_up(&mut self, event: MouseEvent, data: &mut Self::Data) {}

    fn left_click(&mut self, event: MouseEvent, data: &mut Self::Data) {}

    fn left_drag_began(&mut self, event: MouseEvent, drag: Drag, data: &mut Self::Data) {}

    fn left_drag_changed(&mut self, event: MouseEvent, drag: Drag, data: &mut Self::Data) {}

    fn left_drag_ended(&mut self, event: MouseEvent, drag: Drag, data: &mut Self::Data) {}

    fn cancel(&mut self, data: &mut Self::Data) {}
}

#[derive(Debug, Clone, Copy)]
enum MouseState {
    Up,
    Down(MouseEvent),
    Drag { start: MouseEvent, last: MouseEvent },
}

/// Pointer state machine
#[derive(Debug, Clone)]
pub struct Mouse {
    state: MouseState,
    drag_threshold: f64,
}

impl Default for Mouse {
    fn default() -> Self {
        Self::new()
    }
}

impl Mouse {
    pub fn new() -> Self {
        Self::with_drag_threshold(settings::pointer::DRAG_THRESHOLD)
    }

    pub fn with_drag_threshold(drag_threshold: f64) -> Self {
        Self {
            state: MouseState::Up,
            drag_threshold,
        }
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, MouseState::Drag { .. })
    }

    pub fn mouse_down<D: MouseDelegate + ?Sized>(
        &mut self,
        event: MouseEvent,
        delegate: &mut D,
        data: &mut D::Data,
    ) {
        if event.button != Some(MouseButton::Left) {
            return;
        }
        if !matches!(self.state, MouseState::Up) {
            // A press without a release (focus loss); drop the old gesture
            delegate.cancel(data);
        }
        self.state = MouseState::Down(event);
        delegate.left_down(event, data);
    }

    pub fn mouse_moved<D: MouseDelegate + ?Sized>(
        &mut self,
        event: MouseEvent,
        delegate: &mut D,
        data: &mut D::Data,
    ) {
        match self.state {
            MouseState::Up => delegate.mouse_moved(event, data),
            MouseState::Down(down) => {
                if down.pos.distance(event.pos) > self.drag_threshold {
                    let drag = Drag {
                        start: down.pos,
                        prev: down.pos,
                        current: event.pos,
                    };
                    self.state = MouseState::Drag {
                        start: down,
                        last: event,
                    };
                    delegate.left_drag_began(event, drag, data);
                }
            }
            MouseState::Drag { start, last } => {
                let drag = Drag {
                    start: start.pos,
                    prev: last.pos,
                    current: event.pos,
                };
                self.state = MouseState::Drag { start, last: event };
                delegate.left_drag_changed(event, drag, data);
            }
        }
    }

    pub fn mouse_up<D: MouseDelegate + ?Sized>(
        &mut self,
        event: MouseEvent,
        delegate: &mut D,
        data: &mut D::Data,
    ) {
        if event.button != Some(MouseButton::Left) {
            return;
        }
        match std::mem::replace(&mut self.state, MouseState::Up) {
            MouseState::Up => {}
            MouseState::Down(_) => {
                delegate.left_up(event, data);
                delegate.left_click(event, data);
            }
            MouseState::Drag { start, last } => {
                let drag = Drag {
                    start: start.pos,
                    prev: last.pos,
                    current: event.pos,
                };
                delegate.left_drag_ended(event, drag, data);
                delegate.left_up(event, data);
            }
        }
    }

    /// Abandon any press or drag in progress
    pub fn cancel<D: MouseDelegate + ?Sized>(&mut self, delegate: &mut D, data: &mut D::Data) {
        if !matches!(self.state, MouseState::Up) {
            self.state = MouseState::Up;
            delegate.cancel(data);
        }
    }

    /// Forget the current press without notifying anyone
    pub fn reset(&mut self) {
        self.state = MouseState::Up;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder;

    impl MouseDelegate for Recorder {
        type Data = Vec<&'static str>;

        fn mouse_moved(&mut self, _event: MouseEvent, data: &mut Self::Data) {
            data.push("moved");
        }
        fn left_down(&mut self, _event: MouseEvent, data: &mut Self::Data) {
            data.push("down");
        }
        fn left_up(&mut self, _event: MouseEvent, data: &mut Self::Data) {
            data.push("up");
        }
        fn left_click(&mut self, _event: MouseEvent, data: &mut Self::Data) {
            data.push("click");
        }
        fn left_drag_began(&mut self, _e: MouseEvent, _d: Drag, data: &mut Self::Data) {
            data.push("drag_began");
        }
        fn left_drag_changed(&mut self, _e: MouseEvent, _d: Drag, data: &mut Self::Data) {
            data.push("drag_changed");
        }
        fn left_drag_ended(&mut self, _e: MouseEvent, _d: Drag, data: &mut Self::Data) {
            data.push("drag_ended");
        }
        fn cancel(&mut self, data: &mut Self::Data) {
            data.push("cancel");
        }
    }

    fn left(x: f64, y: f64) -> MouseEvent {
        MouseEvent::new(Point::new(x, y), Some(MouseButton::Left))
    }

    #[test]
    fn press_release_is_a_click() {
        let mut mouse = Mouse::with_drag_threshold(3.0);
        let mut log = Vec::new();
        mouse.mouse_down(left(0.0, 0.0), &mut Recorder, &mut log);
        mouse.mouse_moved(left(1.0, 1.0), &mut Recorder, &mut log);
        mouse.mouse_up(left(1.0, 1.0), &mut Recorder, &mut log);
        assert_eq!(log, vec!["down", "up", "click"]);
    }

    #[test]
    fn travel_past_threshold_is_a_drag() {
        let mut mouse = Mouse::with_drag_threshold(3.0);
        let mut log = Vec::new();
        mouse.mouse_down(left(0.0, 0.0), &mut Recorder, &mut log);
        mouse.mouse_moved(left(10.0, 0.0), &mut Recorder, &mut log);
        assert!(mouse.is_dragging());
        mouse.mouse_moved(left(20.0, 0.0), &mut Recorder, &mut log);
        mouse.mouse_up(left(20.0, 0.0), &mut Recorder, &mut log);
        assert_eq!(
            log,
            vec!["down", "drag_began", "drag_changed", "drag_ended", "up"]
        );
        assert!(!mouse.is_dragging());
    }

    #[test]
    fn hover_reports_moves() {
        let mut mouse = Mouse::new();
        let mut log = Vec::new();
        mouse.mouse_moved(MouseEvent::new(Point::ZERO, None), &mut Recorder, &mut log);
        assert_eq!(log, vec!["moved"]);
    }

    #[test]
    fn right_button_is_ignored() {
        let mut mouse = Mouse::new();
        let mut log = Vec::new();
        let ev = MouseEvent::new(Point::ZERO, Some(MouseButton::Right));
        mouse.mouse_down(ev, &mut Recorder, &mut log);
        mouse.mouse_up(ev, &mut Recorder, &mut log);
        assert!(log.is_empty());
    }

    #[test]
    fn cancel_only_when_pressed() {
        let mut mouse = Mouse::new();
        let mut log = Vec::new();
        mouse.cancel(&mut Recorder, &mut log);
        assert!(log.is_empty());
        mouse.mouse_down(left(0.0, 0.0), &mut Recorder, &mut log);
        mouse.cancel(&mut Recorder, &mut log);
        assert_eq!(log, vec!["down", "cancel"]);
    }
}
