// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/stage.rs
//
// Layout of the widget: a wrapper holding the viewport slot and the draggable.

use crate::domain::{Draggable, Rect};
use crate::error::{CropResult, CropperError};

/// The wrapper, its slotted viewport element and the draggable image.
///
/// All rectangles share wrapper coordinates. The draggable is laid out
/// centered in the wrapper.
#[derive(Debug, Clone, Default)]
pub struct Stage {
    wrapper: Rect,
    slot: Vec<Rect>,
    pub draggable: Draggable,
}

impl Stage {
    #[must_use]
    pub fn new(wrapper: Rect) -> Self {
        Self {
            wrapper,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn wrapper(&self) -> Rect {
        self.wrapper
    }

    /// Resize the wrapper and lay the draggable out again.
    pub fn set_wrapper(&mut self, wrapper: Rect) {
        self.wrapper = wrapper;
        let (width, height) = (self.draggable.width, self.draggable.height);
        self.draggable.resize_centered(width, height, &self.wrapper);
    }

    /// Replace the elements assigned to the crop-region slot.
    pub fn assign_slot(&mut self, elements: Vec<Rect>) {
        self.slot = elements;
    }

    /// Bounding rectangle of the viewport, the first slotted element.
    pub fn viewport_rect(&self) -> CropResult<Rect> {
        self.slot.first().copied().ok_or_else(|| {
            CropperError::precondition("Crop region slot must contain the viewport element")
        })
    }

    /// Set the draggable's displayed size and re-center it.
    pub fn resize_draggable(&mut self, width: u32, height: u32) {
        self.draggable.resize_centered(width, height, &self.wrapper);
    }
}
