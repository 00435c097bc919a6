// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/mod.rs
//
// Pure cropper domain: geometry, drag snapping, bitmaps and rasterization.
// No host or input concerns live here.

pub mod bitmap;
pub mod drag;
pub mod geometry;
pub mod overflow;
pub mod raster;

pub use bitmap::Bitmap;
pub use drag::{Cursor, Draggable};
pub use geometry::{Rect, Transform};
pub use overflow::{HorizontalOverflow, OverflowTable, VerticalOverflow, compute_overflow};
pub use raster::CroppedFile;
