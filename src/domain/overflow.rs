// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/overflow.rs
//
// Which side of the crop viewport a moved draggable stops covering.

use super::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalOverflow {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalOverflow {
    Top,
    Bottom,
}

/// Per-axis overflow of a candidate rectangle against the viewport.
///
/// At most one side is reported per axis; `None` means the candidate still
/// covers the viewport on that axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverflowTable {
    pub horizontal: Option<HorizontalOverflow>,
    pub vertical: Option<VerticalOverflow>,
}

impl OverflowTable {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.horizontal.is_none() && self.vertical.is_none()
    }
}

/// Compare the viewport with a candidate draggable rectangle.
///
/// The left/top check wins over right/bottom on the same axis, so a candidate
/// smaller than the viewport only ever reports one side.
#[must_use]
pub fn compute_overflow(viewport: &Rect, candidate: &Rect) -> OverflowTable {
    let horizontal = if viewport.left() < candidate.left() {
        Some(HorizontalOverflow::Left)
    } else if viewport.right() > candidate.right() {
        Some(HorizontalOverflow::Right)
    } else {
        None
    };

    let vertical = if viewport.top() < candidate.top() {
        Some(VerticalOverflow::Top)
    } else if viewport.bottom() > candidate.bottom() {
        Some(VerticalOverflow::Bottom)
    } else {
        None
    };

    OverflowTable {
        horizontal,
        vertical,
    }
}
