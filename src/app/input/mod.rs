// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/input/mod.rs
//
// Input adapters: raw pointer and touch events in, cropper messages out.

mod mouse;
mod touch;

pub use mouse::MouseHandler;
pub use touch::TouchHandler;

use super::message::CropperMessage;

/// Where an event was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTarget {
    /// The draggable image itself.
    Draggable,
    /// Anywhere else in the host window.
    Window,
}

/// A single touch point in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchPoint {
    pub page_x: f64,
    pub page_y: f64,
}

impl TouchPoint {
    #[must_use]
    pub fn new(page_x: f64, page_y: f64) -> Self {
        Self { page_x, page_y }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    MouseDown,
    /// Movement relative to the previous mouse event, as reported by the host.
    MouseMove { movement_x: f64, movement_y: f64 },
    MouseUp,
    TouchStart,
    /// Currently active touches; only the first one is consulted.
    TouchMove { touches: Vec<TouchPoint> },
    TouchEnd,
}

/// A raw event plus its default-action flag.
#[derive(Debug, Clone, PartialEq)]
pub struct InputEvent {
    pub kind: PointerEvent,
    pub target: EventTarget,
    default_prevented: bool,
}

impl InputEvent {
    #[must_use]
    pub fn new(kind: PointerEvent, target: EventTarget) -> Self {
        Self {
            kind,
            target,
            default_prevented: false,
        }
    }

    #[must_use]
    pub fn on_draggable(kind: PointerEvent) -> Self {
        Self::new(kind, EventTarget::Draggable)
    }

    #[must_use]
    pub fn on_window(kind: PointerEvent) -> Self {
        Self::new(kind, EventTarget::Window)
    }

    /// Suppress the host's default action (page scroll, image ghost drag).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    #[must_use]
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Common interface of the input adapters.
///
/// `register` and `remove` are idempotent. An unregistered handler ignores
/// every event.
pub trait EventHandler {
    fn register(&mut self);

    fn remove(&mut self);

    fn is_registered(&self) -> bool;

    /// Whether move events are currently being forwarded.
    fn is_capturing(&self) -> bool;

    /// Translate one event, marking it handled when it is consumed.
    fn handle(&mut self, event: &mut InputEvent) -> Option<CropperMessage>;
}
