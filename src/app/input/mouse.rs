// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/input/mouse.rs
//
// Single-button mouse drag.

use super::{EventHandler, EventTarget, InputEvent, PointerEvent};
use crate::app::message::CropperMessage;
use crate::domain::Cursor;

/// Forwards mouse movement while the button is held on the draggable.
///
/// Move and release events are taken from the whole window so a drag keeps
/// going after the pointer leaves the image.
#[derive(Debug, Clone, Default)]
pub struct MouseHandler {
    registered: bool,
    capturing: bool,
}

impl MouseHandler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventHandler for MouseHandler {
    fn register(&mut self) {
        self.registered = true;
    }

    fn remove(&mut self) {
        self.registered = false;
        self.capturing = false;
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

        match event.kind {
            PointerEvent::MouseDown if event.target == EventTarget::Draggable => {
                event.prevent_default();
                self.capturing = true;
                Some(CropperMessage::SetCursor(Cursor::Grabbing))
            }
            PointerEvent::MouseMove {
                movement_x,
                movement_y,
            } if self.capturing => {
                event.prevent_default();
                Some(CropperMessage::MoveDraggable {
                    delta_x: movement_x,
                    delta_y: movement_y,
                })
            }
            PointerEvent::MouseUp if self.capturing => {
                event.prevent_default();
                self.capturing = false;
                Some(CropperMessage::SetCursor(Cursor::Grab))
            }
            _ => None,
        }
    }
}
