// SPDX-License-Identifier: GPL-3.0-or-later
// src/config.rs
//
// Export settings of the cropper and defaults of the command-line driver.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::constant::{DEFAULT_CROP_SIZE, DEFAULT_QUALITY};
use crate::error::{CropResult, CropperError};

/// Output file format of the exported crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileFormat {
    #[default]
    Jpeg,
    Png,
    Webp,
}

impl FileFormat {
    /// File extension without the leading dot.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Webp => "webp",
        }
    }

    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
        }
    }
}

impl FromStr for FileFormat {
    type Err = CropperError;

    fn from_str(s: &str) -> CropResult<Self> {
        match s {
            "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "webp" => Ok(Self::Webp),
            _ => Err(CropperError::configuration("Unrecognized image format")),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Settings applied when encoding the crop.
///
/// Replaced wholesale on every `format` or `quality` attribute change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropperSettings {
    /// Encoder quality in `[0, 1]`.
    pub quality: f32,
    pub format: FileFormat,
}

impl Default for CropperSettings {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            format: FileFormat::Jpeg,
        }
    }
}

impl CropperSettings {
    /// Copy of these settings with another output format.
    #[must_use]
    pub fn with_format(self, format: FileFormat) -> Self {
        Self { format, ..self }
    }

    /// Copy of these settings with another quality.
    #[must_use]
    pub fn with_quality(self, quality: f32) -> Self {
        Self { quality, ..self }
    }
}

/// Parse a numeric attribute the way a host document coerces strings to
/// numbers: surrounding whitespace is ignored, an empty string is zero and
/// anything unparsable is `NaN`.
#[must_use]
pub fn parse_number(value: &str) -> f64 {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Parse a `quality` attribute into an encoder quality.
pub fn parse_quality(value: &str) -> CropResult<f32> {
    let quality = parse_number(value);
    if !quality.is_finite() || !(0.0..=1.0).contains(&quality) {
        return Err(CropperError::configuration(format!(
            "Quality must be a number between 0 and 1, got {value:?}"
        )));
    }
    #[allow(clippy::cast_possible_truncation)]
    let quality = quality as f32;
    Ok(quality)
}

/// Parse a pixel length style value (`240` or `240px`).
#[must_use]
pub fn parse_pixel_length(value: &str) -> f64 {
    let trimmed = value.trim();
    parse_number(trimmed.strip_suffix("px").unwrap_or(trimmed))
}

/// Defaults of the command-line driver.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory the exported crop is written to.
    pub output_dir: PathBuf,
    /// Crop viewport edge length in pixels.
    pub crop_size: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: dirs::picture_dir()
                .or_else(dirs::home_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
            crop_size: DEFAULT_CROP_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_jpeg_at_seventy_percent() {
        let settings = CropperSettings::default();
        assert_eq!(settings.format, FileFormat::Jpeg);
        assert!((settings.quality - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn known_formats_carry_extension_and_mime() {
        let png: FileFormat = "png".parse().unwrap();
        assert_eq!(png.extension(), "png");
        assert_eq!(png.mime_type(), "image/png");

        let webp: FileFormat = "webp".parse().unwrap();
        assert_eq!(webp.mime_type(), "image/webp");
        assert_eq!(FileFormat::Jpeg.to_string(), "jpeg");
    }

    #[test]
    fn unknown_format_is_a_configuration_error() {
        let err = "tiff".parse::<FileFormat>().unwrap_err();
        assert!(matches!(err, CropperError::Configuration(_)));
        assert_eq!(err.message(), "Unrecognized image format");
    }

    #[test]
    fn format_names_are_case_sensitive() {
        assert!("JPEG".parse::<FileFormat>().is_err());
    }

    #[test]
    fn numbers_parse_like_host_coercion() {
        assert_eq!(parse_number(" 0.5 "), 0.5);
        assert_eq!(parse_number(""), 0.0);
        assert!(parse_number("abc").is_nan());
    }

    #[test]
    fn quality_outside_unit_range_is_rejected() {
        assert_eq!(parse_quality("0.9").unwrap(), 0.9);
        assert_eq!(parse_quality("1").unwrap(), 1.0);
        assert!(parse_quality("1.5").is_err());
        assert!(parse_quality("-0.1").is_err());
        assert!(parse_quality("high").is_err());
    }

    #[test]
    fn pixel_lengths_accept_optional_unit() {
        assert_eq!(parse_pixel_length("240"), 240.0);
        assert_eq!(parse_pixel_length(" 240px"), 240.0);
        assert!(parse_pixel_length("12em").is_nan());
    }

    #[test]
    fn app_config_defaults_to_standard_crop_size() {
        let config = AppConfig::default();
        assert_eq!(config.crop_size, DEFAULT_CROP_SIZE);
        assert!(!config.output_dir.as_os_str().is_empty());
    }

    #[test]
    fn settings_are_replaced_field_by_field() {
        let settings = CropperSettings::default()
            .with_format(FileFormat::Png)
            .with_quality(0.3);
        assert_eq!(settings.format, FileFormat::Png);
        assert!((settings.quality - 0.3).abs() < f32::EPSILON);
    }
}
