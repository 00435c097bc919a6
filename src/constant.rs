// SPDX-License-Identifier: GPL-3.0-or-later
// src/constant.rs
//
// Cropper constants that should not be changed by the user.

/// Style custom property holding the crop viewport edge length in pixels.
pub const CROPPER_MIN_SIZE_VAR: &str = "--cropper-min-w";

/// Encoder quality used until a `quality` attribute is set.
pub const DEFAULT_QUALITY: f32 = 0.7;

/// File stem of the exported crop (`cropped-file.<ext>`).
pub const CROPPED_FILE_STEM: &str = "cropped-file";

/// Canvas fill behind the cropped region (opaque white).
pub const BACKGROUND_RGBA: [u8; 4] = [255, 255, 255, 255];

/// Crop viewport size used by the CLI when none is given.
pub const DEFAULT_CROP_SIZE: f64 = 240.0;

/// Smallest usable crop viewport edge, in pixels.
pub const MIN_CROP_SIZE: f64 = 1.0;

/// Largest JPEG quality accepted by the encoder.
pub const JPEG_MAX_QUALITY: u8 = 100;
