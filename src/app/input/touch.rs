// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/input/touch.rs
//
// Single-touch drag. Only the first touch point drives movement.

use super::{EventHandler, EventTarget, InputEvent, PointerEvent, TouchPoint};
use crate::app::message::CropperMessage;
use crate::domain::Cursor;

/// Turns absolute touch positions into movement deltas.
#[derive(Debug, Clone, Default)]
pub struct TouchHandler {
    registered: bool,
    capturing: bool,
    previous_touch: Option<TouchPoint>,
}

impl TouchHandler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn previous_touch(&self) -> Option<TouchPoint> {
        self.previous_touch
    }

    fn stop(&mut self) {
        self.capturing = false;
        self.previous_touch = None;
    }
}

impl EventHandler for TouchHandler {
    fn register(&mut self) {
        self.registered = true;
    }

    fn remove(&mut self) {
        self.registered = false;
        self.stop();
    }

    fn is_registered(&self) -> bool {
        self.registered
    }

    fn is_capturing(&self) -> bool {
        self.capturing
    }

    fn handle(&mut self, event: &mut InputEvent) -> Option<CropperMessage> {
        if !self.registered {
            return None;
        }

        match &event.kind {
            PointerEvent::TouchStart if event.target == EventTarget::Draggable => {
                event.prevent_default();
                self.capturing = true;
                Some(CropperMessage::SetCursor(Cursor::Grabbing))
            }
            PointerEvent::TouchMove { touches } if self.capturing => {
                let touch = *touches.first()?;
                event.prevent_default();

                let message = self.previous_touch.map(|previous| CropperMessage::MoveDraggable {
                    delta_x: touch.page_x - previous.page_x,
                    delta_y: touch.page_y - previous.page_y,
                });
                self.previous_touch = Some(touch);
                message
            }
            PointerEvent::TouchEnd if self.capturing => {
                event.prevent_default();
                self.stop();
                Some(CropperMessage::SetCursor(Cursor::Grab))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch_move(touches: &[(f64, f64)]) -> InputEvent {
        InputEvent::on_window(PointerEvent::TouchMove {
            touches: touches
                .iter()
                .map(|&(x, y)| TouchPoint::new(x, y))
                .collect(),
        })
    }

    fn started() -> TouchHandler {
        let mut handler = TouchHandler::new();
        handler.register();
        handler.handle(&mut InputEvent::on_draggable(PointerEvent::TouchStart));
        handler
    }

    #[test]
    fn first_move_only_records_position() {
        let mut handler = started();
        let mut event = touch_move(&[(10.0, 10.0)]);
        assert_eq!(handler.handle(&mut event), None);
        assert!(event.is_default_prevented());
        assert_eq!(handler.previous_touch(), Some(TouchPoint::new(10.0, 10.0)));
    }

    #[test]
    fn deltas_are_page_coordinate_differences() {
        let mut handler = started();
        handler.handle(&mut touch_move(&[(10.0, 10.0)]));

        assert_eq!(
            handler.handle(&mut touch_move(&[(15.0, 7.0)])),
            Some(CropperMessage::MoveDraggable {
                delta_x: 5.0,
                delta_y: -3.0
            })
        );
        assert_eq!(
            handler.handle(&mut touch_move(&[(12.0, 7.0)])),
            Some(CropperMessage::MoveDraggable {
                delta_x: -3.0,
                delta_y: 0.0
            })
        );
    }

    #[test]
    fn second_touch_point_is_ignored() {
        let mut handler = started();
        handler.handle(&mut touch_move(&[(10.0, 10.0), (200.0, 200.0)]));

        let message = handler.handle(&mut touch_move(&[(12.0, 11.0), (500.0, 40.0)]));
        assert_eq!(
            message,
            Some(CropperMessage::MoveDraggable {
                delta_x: 2.0,
                delta_y: 1.0
            })
        );
    }

    #[test]
    fn touch_end_clears_previous_touch() {
        let mut handler = started();
        handler.handle(&mut touch_move(&[(10.0, 10.0)]));

        let mut end = InputEvent::on_window(PointerEvent::TouchEnd);
        assert_eq!(
            handler.handle(&mut end),
            Some(CropperMessage::SetCursor(Cursor::Grab))
        );
        assert_eq!(handler.previous_touch(), None);
        assert!(!handler.is_capturing());

        // A new gesture starts from scratch instead of jumping.
        handler.handle(&mut InputEvent::on_draggable(PointerEvent::TouchStart));
        assert_eq!(handler.handle(&mut touch_move(&[(90.0, 90.0)])), None);
    }

    #[test]
    fn stray_touch_end_keeps_default_action() {
        let mut handler = TouchHandler::new();
        handler.register();
        let mut end = InputEvent::on_window(PointerEvent::TouchEnd);
        assert_eq!(handler.handle(&mut end), None);
        assert!(!end.is_default_prevented());
    }

    #[test]
    fn moves_without_touch_start_are_ignored() {
        let mut handler = TouchHandler::new();
        handler.register();
        let mut event = touch_move(&[(1.0, 1.0)]);
        assert_eq!(handler.handle(&mut event), None);
        assert!(!event.is_default_prevented());
    }

    #[test]
    fn empty_touch_list_is_ignored() {
        let mut handler = started();
        assert_eq!(handler.handle(&mut touch_move(&[])), None);
    }

    #[test]
    fn remove_is_idempotent_and_resets_state() {
        let mut handler = started();
        handler.handle(&mut touch_move(&[(10.0, 10.0)]));
        handler.remove();
        handler.remove();
        assert!(!handler.is_registered());
        assert_eq!(handler.previous_touch(), None);
    }
}
