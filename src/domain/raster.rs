// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/raster.rs
//
// Crop rasterizer: maps the on-screen transform back into bitmap pixels,
// rasterizes the viewport-sized region and encodes it.

use std::sync::Arc;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops;
use image::{DynamicImage, Rgba, RgbaImage};

use super::bitmap::Bitmap;
use super::drag::Draggable;
use crate::config::{CropperSettings, FileFormat};
use crate::constant::{BACKGROUND_RGBA, CROPPED_FILE_STEM, JPEG_MAX_QUALITY};
use crate::error::{CropResult, CropperError};

const ENCODING_FAILED: &str = "Cropped Image could not be created";

/// Encoded crop ready to be handed to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CroppedFile {
    /// `cropped-file.<extension>`
    pub name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl CroppedFile {
    fn new(format: FileFormat, bytes: Vec<u8>) -> Self {
        Self {
            name: format!("{CROPPED_FILE_STEM}.{}", format.extension()),
            mime_type: format.mime_type(),
            bytes,
        }
    }
}

/// Pixel offset of the viewport inside the scaled working bitmap.
///
/// The absolute value folds the (non-positive) layout-plus-translation
/// position into a coordinate. It is only in bounds while drag snapping keeps
/// the draggable covering the viewport.
#[must_use]
pub fn source_offset(draggable: &Draggable) -> (u32, u32) {
    let to_pixel = |position: f64| -> u32 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let pixel = position.abs().round() as u32;
        pixel
    };
    (
        to_pixel(draggable.transform.tx + draggable.offset_left),
        to_pixel(draggable.transform.ty + draggable.offset_top),
    )
}

/// Rasterize the `crop_size` square the viewport covers onto a white canvas.
pub fn rasterize(bitmap: &Bitmap, draggable: &Draggable, crop_size: u32) -> CropResult<RgbaImage> {
    if draggable.width == 0 || draggable.height == 0 {
        return Err(CropperError::precondition(
            "Draggable must have a displayed size before cropping",
        ));
    }

    let working = bitmap.resized(draggable.width, draggable.height);
    let (source_x, source_y) = source_offset(draggable);
    log::debug!(
        "rasterizing {crop_size}px crop at ({source_x}, {source_y}) of {}x{}",
        working.width(),
        working.height()
    );

    let mut canvas = RgbaImage::from_pixel(crop_size, crop_size, Rgba(BACKGROUND_RGBA));
    if source_x < working.width() && source_y < working.height() {
        let region =
            imageops::crop_imm(working.pixels(), source_x, source_y, crop_size, crop_size).to_image();
        imageops::overlay(&mut canvas, &region, 0, 0);
    }
    Ok(canvas)
}

/// Map a `[0, 1]` quality onto the JPEG encoder scale.
#[must_use]
pub fn jpeg_quality(quality: f32) -> u8 {
    let scaled = (quality * f32::from(JPEG_MAX_QUALITY)).round();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let scaled = scaled.clamp(1.0, f32::from(JPEG_MAX_QUALITY)) as u8;
    scaled
}

/// Encode the canvas with the configured format and quality.
pub fn encode(canvas: RgbaImage, settings: &CropperSettings) -> CropResult<CroppedFile> {
    let mut bytes = Vec::new();
    let result = match settings.format {
        FileFormat::Jpeg => {
            let opaque = DynamicImage::ImageRgba8(canvas).to_rgb8();
            DynamicImage::ImageRgb8(opaque).write_with_encoder(JpegEncoder::new_with_quality(
                &mut bytes,
                jpeg_quality(settings.quality),
            ))
        }
        FileFormat::Png => DynamicImage::ImageRgba8(canvas).write_with_encoder(PngEncoder::new(&mut bytes)),
        #[cfg(feature = "webp")]
        FileFormat::Webp => DynamicImage::ImageRgba8(canvas)
            .write_with_encoder(image::codecs::webp::WebPEncoder::new_lossless(&mut bytes)),
        #[cfg(not(feature = "webp"))]
        FileFormat::Webp => {
            log::warn!("webp support is disabled in this build");
            return Err(CropperError::encoding(ENCODING_FAILED));
        }
    };

    if let Err(e) = result {
        log::error!("{} encoder failed: {e}", settings.format);
        return Err(CropperError::encoding(ENCODING_FAILED));
    }
    if bytes.is_empty() {
        return Err(CropperError::encoding(ENCODING_FAILED));
    }

    Ok(CroppedFile::new(settings.format, bytes))
}

/// Rasterize and encode the crop on a blocking worker.
pub async fn crop(
    bitmap: Arc<Bitmap>,
    draggable: Draggable,
    crop_size: u32,
    settings: CropperSettings,
) -> CropResult<CroppedFile> {
    tokio::task::spawn_blocking(move || {
        let canvas = rasterize(&bitmap, &draggable, crop_size)?;
        encode(canvas, &settings)
    })
    .await
    .map_err(|e| {
        log::error!("crop worker failed: {e}");
        CropperError::encoding(ENCODING_FAILED)
    })?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geometry::{Rect, Transform};

    /// Every pixel encodes its own coordinates.
    fn gradient(size: u32) -> Bitmap {
        #[allow(clippy::cast_possible_truncation)]
        let pixels = RgbaImage::from_fn(size, size, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        Bitmap::from_rgba(pixels)
    }

    fn centered(size: u32, crop_size: u32) -> Draggable {
        let mut draggable = Draggable::default();
        let wrapper = Rect::new(0.0, 0.0, f64::from(crop_size), f64::from(crop_size));
        draggable.resize_centered(size, size, &wrapper);
        draggable
    }

    #[test]
    fn offset_folds_layout_and_translation() {
        let mut draggable = centered(150, 100);
        assert_eq!(source_offset(&draggable), (25, 25));

        draggable.transform = Transform::new(25.0, -25.0);
        assert_eq!(source_offset(&draggable), (0, 50));
    }

    #[test]
    fn origin_aligned_crop_is_top_left_region() {
        let bitmap = gradient(150);
        let mut draggable = centered(150, 100);
        draggable.transform = Transform::new(25.0, 25.0);

        let canvas = rasterize(&bitmap, &draggable, 100).unwrap();
        let expected = imageops::crop_imm(bitmap.pixels(), 0, 0, 100, 100).to_image();
        assert_eq!(canvas, expected);
    }

    #[test]
    fn right_flush_crop_starts_at_overhang() {
        let bitmap = gradient(150);
        let mut draggable = centered(150, 100);
        draggable.transform = Transform::new(-25.0, 0.0);

        let canvas = rasterize(&bitmap, &draggable, 100).unwrap();
        assert_eq!(canvas.get_pixel(0, 0), &Rgba([50, 25, 0, 255]));
        assert_eq!(canvas.get_pixel(99, 99), &Rgba([149, 124, 0, 255]));
    }

    #[test]
    fn uncovered_area_stays_white() {
        let bitmap = gradient(10);
        let draggable = Draggable::new(10, 10);

        let canvas = rasterize(&bitmap, &draggable, 20).unwrap();
        assert_eq!(canvas.get_pixel(5, 5), &Rgba([5, 5, 0, 255]));
        assert_eq!(canvas.get_pixel(15, 15), &Rgba(BACKGROUND_RGBA));
    }

    #[test]
    fn zero_sized_draggable_is_a_precondition_error() {
        let err = rasterize(&gradient(4), &Draggable::default(), 4).unwrap_err();
        assert!(matches!(err, CropperError::Precondition(_)));
    }

    #[test]
    fn jpeg_quality_maps_unit_range() {
        assert_eq!(jpeg_quality(0.7), 70);
        assert_eq!(jpeg_quality(1.0), 100);
        assert_eq!(jpeg_quality(0.0), 1);
    }

    #[test]
    fn png_crop_of_crop_sized_image_round_trips() {
        let bitmap = gradient(32);
        let draggable = Draggable::new(32, 32);
        let canvas = rasterize(&bitmap, &draggable, 32).unwrap();

        let settings = CropperSettings::default().with_format(FileFormat::Png);
        let file = encode(canvas, &settings).unwrap();
        assert_eq!(file.name, "cropped-file.png");
        assert_eq!(file.mime_type, "image/png");

        let decoded = image::load_from_memory(&file.bytes).unwrap().to_rgba8();
        assert_eq!(&decoded, bitmap.pixels());
    }

    #[cfg(feature = "webp")]
    #[test]
    fn webp_crop_is_named_after_format() {
        let canvas = rasterize(&gradient(16), &Draggable::new(16, 16), 16).unwrap();
        let settings = CropperSettings::default().with_format(FileFormat::Webp);

        let file = encode(canvas, &settings).unwrap();
        assert_eq!(file.name, "cropped-file.webp");
        assert_eq!(file.mime_type, "image/webp");
        assert_eq!(&file.bytes[..4], b"RIFF");
        assert_eq!(&file.bytes[8..12], b"WEBP");
    }

    #[test]
    fn lower_jpeg_quality_produces_smaller_output() {
        #[allow(clippy::cast_possible_truncation)]
        let canvas = RgbaImage::from_fn(64, 64, |x, y| {
            Rgba([(x * 37 ^ y * 91) as u8, (x * y) as u8, (x * 13 + y * 7) as u8, 255])
        });
        let settings = CropperSettings::default();

        let low = encode(canvas.clone(), &settings.with_quality(0.1)).unwrap();
        let high = encode(canvas, &settings.with_quality(0.9)).unwrap();
        assert!(low.bytes.len() < high.bytes.len());
    }

    #[tokio::test]
    async fn jpeg_crop_is_named_after_format() {
        let file = crop(
            Arc::new(gradient(16)),
            Draggable::new(16, 16),
            8,
            CropperSettings::default(),
        )
        .await
        .unwrap();

        assert_eq!(file.name, "cropped-file.jpeg");
        assert_eq!(file.mime_type, "image/jpeg");
        assert_eq!(&file.bytes[..2], &[0xFF, 0xD8]);
    }
}
