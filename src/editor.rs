// Copyright 2025 the Polyhole Authors
// SPDX-License-Identifier: Apache-2.0

//! The editor: one edit session plus the mode controller driving it.
//!
//! Hosts feed UI triggers, pointer events, and keys in here, render from
//! `source()`, `highlight()`, and `sketch()`, and call `end_turn` once the
//! render pass for the current event is done.

use crate::config::Config;
use crate::editing::{BackgroundImage, EditSession, Key, MouseEvent, Selection};
use crate::mode::{Mode, ModeController, Trigger};
use crate::model::ShapeSource;
use crate::tools::ToolId;
use crate::tools::draw::Sketch;

#[derive(Debug, Clone, Default)]
pub struct Editor {
    session: EditSession,
    controller: ModeController,
    background: Option<BackgroundImage>,
}

impl Editor {
    pub fn new(config: Config) -> Self {
        Self {
            session: EditSession::new(config),
            controller: ModeController::new(),
            background: None,
        }
    }

    /// Set the image being annotated; its extent becomes the input surface
    pub fn set_background(&mut self, background: BackgroundImage) {
        tracing::info!(
            "Editor: background {}x{}",
            background.width,
            background.height
        );
        self.controller
            .attach_surface(background.extent(), &mut self.session);
        self.background = Some(background);
    }

    pub fn background(&self) -> Option<&BackgroundImage> {
        self.background.as_ref()
    }

    /// Handle a UI control, returning the resulting mode
    pub fn trigger(&mut self, trigger: Trigger) -> Mode {
        tracing::debug!("Editor: trigger {:?}", trigger);
        match trigger {
            Trigger::Clear => self.controller.clear_all(&mut self.session),
            Trigger::Stop => self.controller.clear(&mut self.session),
            other => self.controller.activate(other.mode(), &mut self.session),
        }
    }

    pub fn pointer_down(&mut self, event: MouseEvent) {
        self.controller.pointer_down(event, &mut self.session);
    }

    pub fn pointer_moved(&mut self, event: MouseEvent) {
        self.controller.pointer_moved(event, &mut self.session);
    }

    pub fn pointer_up(&mut self, event: MouseEvent) {
        self.controller.pointer_up(event, &mut self.session);
    }

    pub fn pointer_cancel(&mut self) {
        self.controller.pointer_cancel(&mut self.session);
    }

    /// Returns whether an attached tool used the key
    pub fn key_down(&mut self, key: Key) -> bool {
        self.controller.key_down(key, &mut self.session)
    }

    /// Run work postponed during the turn that just finished
    pub fn end_turn(&mut self) -> usize {
        self.session.end_turn()
    }

    pub fn mode(&self) -> Mode {
        self.controller.mode()
    }

    pub fn attached_tools(&self) -> Vec<ToolId> {
        self.controller.attached()
    }

    pub fn source(&self) -> &ShapeSource {
        &self.session.source
    }

    /// Mutable access for hosts that edit shapes outside the tools
    pub fn source_mut(&mut self) -> &mut ShapeSource {
        &mut self.session.source
    }

    pub fn highlight(&self) -> &Selection {
        &self.session.highlight
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    /// The drawing in progress, for the renderer
    pub fn sketch(&self) -> Option<&Sketch> {
        self.controller.sketch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::MouseButton;
    use crate::model::{Polygon, Ring};
    use kurbo::Point;

    fn editor() -> Editor {
        let config = Config {
            snap_tolerance: 0.5,
            ..Config::default()
        };
        let mut editor = Editor::new(config);
        editor.set_background(BackgroundImage::with_size(200, 200));
        editor
    }

    fn click(editor: &mut Editor, x: f64, y: f64) {
        let event = MouseEvent::new(Point::new(x, y), Some(MouseButton::Left));
        editor.pointer_down(event);
        editor.pointer_up(event);
        editor.end_turn();
    }

    fn draw(editor: &mut Editor, points: &[(f64, f64)]) {
        for &(x, y) in points {
            click(editor, x, y);
        }
        editor.key_down(Key::Enter);
        editor.end_turn();
    }

    fn square(min: f64, max: f64) -> Vec<(f64, f64)> {
        vec![(min, min), (max, min), (max, max), (min, max)]
    }

    fn ring(points: &[(f64, f64)]) -> Ring {
        Ring::closed(points.iter().map(|&(x, y)| Point::new(x, y)))
    }

    #[test]
    fn draw_then_cut_a_hole() {
        let mut editor = editor();
        editor.trigger(Trigger::Draw);
        draw(&mut editor, &square(0.0, 10.0));
        assert_eq!(editor.source().len(), 1);

        editor.trigger(Trigger::Hole);
        draw(&mut editor, &square(2.0, 8.0));

        // The hole sketch is gone once the turn has ended
        assert_eq!(editor.source().len(), 1);
        let shape = editor.source().iter().next().unwrap();
        let expected =
            Polygon::from_rings(vec![ring(&square(0.0, 10.0)), ring(&square(2.0, 8.0))]);
        assert_eq!(shape.geometry, expected);
        assert!(editor.sketch().is_none());
    }

    #[test]
    fn finished_hole_sketch_survives_until_end_of_turn() {
        let mut editor = editor();
        editor.trigger(Trigger::Draw);
        draw(&mut editor, &square(0.0, 10.0));
        editor.trigger(Trigger::Hole);
        for (x, y) in square(2.0, 8.0) {
            click(&mut editor, x, y);
        }

        editor.key_down(Key::Enter);
        assert_eq!(editor.source().len(), 2);
        assert_eq!(editor.end_turn(), 1);
        assert_eq!(editor.source().len(), 1);
    }

    #[test]
    fn hole_without_host_touches_nothing() {
        let mut editor = editor();
        editor.trigger(Trigger::Draw);
        draw(&mut editor, &square(0.0, 10.0));
        let before = editor.source().iter().next().unwrap().clone();

        editor.trigger(Trigger::Hole);
        draw(&mut editor, &[(100.0, 100.0), (120.0, 100.0), (120.0, 120.0)]);

        assert_eq!(editor.source().len(), 1);
        assert_eq!(editor.source().iter().next(), Some(&before));
    }

    #[test]
    fn holes_accumulate_one_ring_per_gesture() {
        let mut editor = editor();
        editor.trigger(Trigger::Draw);
        draw(&mut editor, &square(0.0, 100.0));

        editor.trigger(Trigger::Hole);
        let holes = [square(10.0, 20.0), square(30.0, 40.0), square(50.0, 60.0)];
        for hole in &holes {
            draw(&mut editor, hole);
        }

        let shape = editor.source().iter().next().unwrap();
        assert_eq!(shape.geometry.ring_count(), 4);
        for (interior, hole) in shape.geometry.interiors().iter().zip(&holes) {
            assert_eq!(interior, &ring(hole));
        }
    }

    #[test]
    fn delete_then_click_removes_shape() {
        let mut editor = editor();
        editor.trigger(Trigger::Draw);
        draw(&mut editor, &square(0.0, 10.0));
        draw(&mut editor, &square(50.0, 60.0));

        editor.trigger(Trigger::DeleteClick);
        click(&mut editor, 55.0, 55.0);

        assert_eq!(editor.source().len(), 1);
        let left = editor.source().iter().next().unwrap();
        assert_eq!(left.geometry.outer(), Some(&ring(&square(0.0, 10.0))));
        assert_eq!(editor.mode(), Mode::SelectDelete);
    }

    #[test]
    fn hover_over_delete_keeps_click_delete_armed() {
        let mut editor = editor();
        editor.trigger(Trigger::DeleteClick);
        assert_eq!(editor.trigger(Trigger::DeleteHover), Mode::SelectDelete);
        assert_eq!(
            editor.attached_tools(),
            vec![ToolId::SelectClick, ToolId::SelectHover]
        );
    }

    #[test]
    fn clear_with_three_shapes() {
        let mut editor = editor();
        editor.trigger(Trigger::Draw);
        draw(&mut editor, &square(0.0, 10.0));
        draw(&mut editor, &square(20.0, 30.0));
        draw(&mut editor, &square(40.0, 50.0));
        assert_eq!(editor.source().len(), 3);

        editor.trigger(Trigger::Clear);
        assert!(editor.source().is_empty());
        assert_eq!(editor.mode(), Mode::Idle);
        assert!(editor.attached_tools().is_empty());
    }

    #[test]
    fn hole_target_removed_mid_gesture_aborts() {
        let mut editor = editor();
        editor.trigger(Trigger::Draw);
        draw(&mut editor, &square(0.0, 10.0));
        let target = editor.source().iter().next().unwrap().id;

        editor.trigger(Trigger::Hole);
        click(&mut editor, 2.0, 2.0);
        assert!(editor.sketch().is_some());

        editor.source_mut().remove(target);
        editor.pointer_moved(MouseEvent::new(Point::new(8.0, 2.0), None));
        assert!(editor.sketch().is_none());
        assert!(editor.source().is_empty());
    }

    #[test]
    fn trigger_before_background_is_applied_later() {
        let mut editor = Editor::new(Config::default());
        editor.trigger(Trigger::Modify);
        assert!(editor.attached_tools().is_empty());
        editor.set_background(BackgroundImage::with_size(10, 10));
        assert_eq!(editor.attached_tools(), vec![ToolId::Modify]);
    }
}
