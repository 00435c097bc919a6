// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/drag.rs
//
// Draggable element model and the snapping drag step.

use super::geometry::{Rect, Transform};
use super::overflow::{HorizontalOverflow, OverflowTable, VerticalOverflow, compute_overflow};

/// Pointer affordance shown over the draggable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Grab,
    Grabbing,
}

/// The user-movable image element.
///
/// `offset_left`/`offset_top` are the laid-out position inside the wrapper,
/// `transform` is the translation on top of that layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Draggable {
    pub width: u32,
    pub height: u32,
    pub offset_left: f64,
    pub offset_top: f64,
    pub transform: Transform,
    pub cursor: Cursor,
}

impl Draggable {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// On-screen bounding rectangle in wrapper coordinates.
    #[must_use]
    pub fn bounding_rect(&self) -> Rect {
        Rect::new(
            self.offset_left + self.transform.tx,
            self.offset_top + self.transform.ty,
            f64::from(self.width),
            f64::from(self.height),
        )
    }

    /// Horizontal vector replacing the requested delta on overflow.
    #[must_use]
    pub fn snap_x(&self, overflow: HorizontalOverflow) -> f64 {
        match overflow {
            HorizontalOverflow::Left => -self.offset_left - self.transform.tx,
            HorizontalOverflow::Right => self.offset_left - self.transform.tx,
        }
    }

    /// Vertical vector replacing the requested delta on overflow.
    #[must_use]
    pub fn snap_y(&self, overflow: VerticalOverflow) -> f64 {
        match overflow {
            VerticalOverflow::Top => -self.offset_top - self.transform.ty,
            VerticalOverflow::Bottom => self.offset_top - self.transform.ty,
        }
    }

    /// Translation the draggable would get for a requested delta.
    ///
    /// Axes that would expose the viewport are snapped, the others pass the
    /// delta through. Nothing is mutated.
    #[must_use]
    pub fn translation_for(&self, viewport: &Rect, delta_x: f64, delta_y: f64) -> Transform {
        let candidate = self.bounding_rect().translate(delta_x, delta_y);
        let OverflowTable {
            horizontal,
            vertical,
        } = compute_overflow(viewport, &candidate);

        let vector_x = horizontal.map_or(delta_x, |overflow| self.snap_x(overflow));
        let vector_y = vertical.map_or(delta_y, |overflow| self.snap_y(overflow));

        self.transform.translate(vector_x, vector_y)
    }

    /// Apply one drag step and store the resulting translation.
    pub fn apply_delta(&mut self, viewport: &Rect, delta_x: f64, delta_y: f64) -> Transform {
        let transform = self.translation_for(viewport, delta_x, delta_y);
        self.transform = transform;
        transform
    }

    /// Change the displayed size and re-center it inside a wrapper.
    pub fn resize_centered(&mut self, width: u32, height: u32, wrapper: &Rect) {
        self.width = width;
        self.height = height;
        self.offset_left = (wrapper.width - f64::from(width)) / 2.0;
        self.offset_top = (wrapper.height - f64::from(height)) / 2.0;
    }
}
