// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/bitmap.rs
//
// Source bitmap: resolve, decode and downscale to the crop size.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};

use crate::error::{CropResult, CropperError};

/// Resize filter used for every scaling step ("high" quality).
pub const RESIZE_FILTER: FilterType = FilterType::Lanczos3;

/// Decoded, immutable RGBA pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    pixels: RgbaImage,
}

impl Bitmap {
    #[must_use]
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// Decode an encoded image (PNG, JPEG, ...) from memory.
    pub fn decode(bytes: &[u8]) -> CropResult<Self> {
        let document = image::load_from_memory(bytes)
            .map_err(|e| CropperError::io(format!("Could not decode source image: {e}")))?;
        Ok(Self::from_rgba(document.to_rgba8()))
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    #[must_use]
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    #[must_use]
    pub fn is_landscape(&self) -> bool {
        self.width() > self.height()
    }

    /// Resize to exact dimensions.
    #[must_use]
    pub fn resized(&self, width: u32, height: u32) -> Self {
        if self.dimensions() == (width, height) {
            return self.clone();
        }
        Self::from_rgba(imageops::resize(&self.pixels, width, height, RESIZE_FILTER))
    }

    /// Dimensions after fitting the short side to `crop_size`.
    ///
    /// Landscape images get their height fixed, everything else its width;
    /// the other side keeps the aspect ratio.
    #[must_use]
    pub fn min_side_dimensions(&self, crop_size: u32) -> (u32, u32) {
        let (width, height) = self.dimensions();
        let scale_side = |long: u32, short: u32| -> u32 {
            let scaled = f64::from(long) * f64::from(crop_size) / f64::from(short.max(1));
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let scaled = scaled.round() as u32;
            scaled.max(1)
        };

        if self.is_landscape() {
            (scale_side(width, height), crop_size)
        } else {
            (crop_size, scale_side(height, width))
        }
    }

    /// Downscale (or upscale) so the short side equals `crop_size`.
    #[must_use]
    pub fn scaled_to_min_side(&self, crop_size: u32) -> Self {
        let (width, height) = self.min_side_dimensions(crop_size);
        self.resized(width, height)
    }
}

impl From<DynamicImage> for Bitmap {
    fn from(document: DynamicImage) -> Self {
        Self::from_rgba(document.to_rgba8())
    }
}

/// Turn a `src` attribute into a local path.
///
/// Plain paths and `file://` URLs are accepted.
pub fn resolve_source(src: &str) -> CropResult<PathBuf> {
    let src = src.trim();
    if src.is_empty() {
        return Err(CropperError::io("Source must not be empty"));
    }
    if let Some(path) = src.strip_prefix("file://") {
        return Ok(PathBuf::from(path));
    }
    if let Some((scheme, _)) = src.split_once("://") {
        return Err(CropperError::io(format!("Unsupported source scheme: {scheme}")));
    }
    Ok(Path::new(src).to_path_buf())
}

/// Load `src`, decode it and scale its short side to `crop_size`.
///
/// Decoding and resizing run on a blocking worker; the full-size original is
/// dropped before returning.
pub async fn load_scaled_bitmap(src: &str, crop_size: u32) -> CropResult<Bitmap> {
    let path = resolve_source(src)?;
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| CropperError::io(format!("Could not read {}: {e}", path.display())))?;

    tokio::task::spawn_blocking(move || {
        let original = Bitmap::decode(&bytes)?;
        log::debug!("original bitmap {}x{}", original.width(), original.height());

        let scaled = original.scaled_to_min_side(crop_size);
        log::debug!("scaled bitmap {}x{}", scaled.width(), scaled.height());
        Ok(scaled)
    })
    .await
    .map_err(|e| CropperError::io(format!("Bitmap worker failed: {e}")))?
}
