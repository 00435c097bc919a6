// SPDX-License-Identifier: GPL-3.0-or-later
// src/lib.rs
//
// Drag-to-position image cropper with a fixed-size crop viewport.

pub mod app;
pub mod config;
pub mod constant;
pub mod domain;
pub mod error;

pub use app::Cropper;
pub use config::{CropperSettings, FileFormat};
pub use domain::CroppedFile;
pub use error::{CropResult, CropperError};
