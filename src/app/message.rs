// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/message.rs
//
// Messages emitted by the input adapters and applied by the cropper.

use crate::domain::Cursor;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CropperMessage {
    // Presentation.
    SetCursor(Cursor),

    // Drag.
    MoveDraggable { delta_x: f64, delta_y: f64 },
}
