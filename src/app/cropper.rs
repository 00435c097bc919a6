// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/cropper.rs
//
// The cropper widget: lifecycle hooks, attributes and host operations.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use super::input::{EventHandler, InputEvent, MouseHandler, TouchHandler};
use super::message::CropperMessage;
use super::stage::Stage;
use crate::config::{CropperSettings, FileFormat, parse_pixel_length, parse_quality};
use crate::constant::{CROPPER_MIN_SIZE_VAR, MIN_CROP_SIZE};
use crate::domain::bitmap::{self, Bitmap};
use crate::domain::raster::{self, CroppedFile};
use crate::domain::{Draggable, Rect, Transform};
use crate::error::{CropResult, CropperError};

/// Attributes the cropper reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservedAttribute {
    Src,
    Format,
    Quality,
}

impl FromStr for ObservedAttribute {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "src" => Ok(Self::Src),
            "format" => Ok(Self::Format),
            "quality" => Ok(Self::Quality),
            _ => Err(()),
        }
    }
}

/// Drag-to-position image cropper.
///
/// Owns the export settings, the decoded source bitmap, the layout stage and
/// both input adapters. All state is mutated through `&mut self`.
#[derive(Debug, Default)]
pub struct Cropper {
    settings: CropperSettings,
    bitmap: Option<Arc<Bitmap>>,
    stage: Stage,
    mouse: MouseHandler,
    touch: TouchHandler,
    style: HashMap<String, String>,
    attached: bool,
}

impl Cropper {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    pub fn on_attach(&mut self) {
        self.mouse.register();
        self.touch.register();
        self.attached = true;
    }

    pub fn on_detach(&mut self) {
        self.mouse.remove();
        self.touch.remove();
        self.attached = false;
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// React to an attribute change. Unobserved names are ignored.
    pub async fn attribute_changed(&mut self, name: &str, value: &str) -> CropResult<()> {
        match name.parse::<ObservedAttribute>() {
            Ok(ObservedAttribute::Src) => self.set_source(value).await,
            Ok(ObservedAttribute::Format) => self.set_format(value),
            Ok(ObservedAttribute::Quality) => self.set_quality(value),
            Err(()) => {
                log::warn!("ignoring unobserved attribute {name:?}");
                Ok(())
            }
        }
    }

    // =========================================================================
    // Attributes and style
    // =========================================================================

    /// Load a new source, replacing (and dropping) the previous bitmap.
    pub async fn set_source(&mut self, src: &str) -> CropResult<()> {
        let crop_size = self.crop_size()?;
        let bitmap = bitmap::load_scaled_bitmap(src, crop_size).await?;
        let (width, height) = bitmap.dimensions();
        log::info!("loaded {src} as {width}x{height}");

        if self.bitmap.replace(Arc::new(bitmap)).is_some() {
            log::debug!("released previous bitmap");
        }
        self.stage.resize_draggable(width, height);
        self.stage.draggable.transform = Transform::IDENTITY;
        Ok(())
    }

    pub fn set_format(&mut self, value: &str) -> CropResult<()> {
        let format = FileFormat::from_str(value)?;
        self.settings = self.settings.with_format(format);
        Ok(())
    }

    pub fn set_quality(&mut self, value: &str) -> CropResult<()> {
        let quality = parse_quality(value)?;
        self.settings = self.settings.with_quality(quality);
        Ok(())
    }

    /// Set a style custom property. The crop size property also resizes the
    /// wrapper when it holds a usable length.
    pub fn set_style_property(&mut self, name: &str, value: &str) {
        self.style.insert(name.to_owned(), value.to_owned());
        if name == CROPPER_MIN_SIZE_VAR {
            if let Ok(size) = self.crop_size() {
                let edge = f64::from(size);
                self.stage.set_wrapper(Rect::new(0.0, 0.0, edge, edge));
            }
        }
    }

    /// Raw crop viewport size from the style, `NaN` when absent or invalid.
    #[must_use]
    pub fn cropper_min_size(&self) -> f64 {
        self.style
            .get(CROPPER_MIN_SIZE_VAR)
            .map_or(f64::NAN, |value| parse_pixel_length(value))
    }

    /// Crop viewport edge in whole pixels.
    pub fn crop_size(&self) -> CropResult<u32> {
        let size = self.cropper_min_size();
        if !size.is_finite() || size < MIN_CROP_SIZE || size > f64::from(u32::MAX) {
            return Err(CropperError::configuration(format!(
                "{CROPPER_MIN_SIZE_VAR} must be a pixel length of at least {MIN_CROP_SIZE}"
            )));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let size = size as u32;
        Ok(size)
    }

    /// Assign the elements of the crop-region slot; the first is the viewport.
    pub fn assign_slot(&mut self, elements: Vec<Rect>) {
        self.stage.assign_slot(elements);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn bitmap(&self) -> CropResult<&Bitmap> {
        self.shared_bitmap().map(|bitmap| &**bitmap)
    }

    fn shared_bitmap(&self) -> CropResult<&Arc<Bitmap>> {
        self.bitmap.as_ref().ok_or_else(|| {
            CropperError::precondition("ImageBitmap must be defined before calling this method")
        })
    }

    #[must_use]
    pub fn settings(&self) -> CropperSettings {
        self.settings
    }

    #[must_use]
    pub fn draggable(&self) -> &Draggable {
        &self.stage.draggable
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        self.stage.draggable.transform
    }

    #[must_use]
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    // =========================================================================
    // Host operations
    // =========================================================================

    /// Zoom the draggable relative to the bitmap and move it back to origin.
    pub fn scale_image(&mut self, scale: f64) -> CropResult<()> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(CropperError::configuration(format!(
                "Scale must be a positive number, got {scale}"
            )));
        }
        let (width, height) = self.bitmap()?.dimensions();
        self.stage.viewport_rect()?;
        let scaled = |side: u32| -> u32 {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let side = (f64::from(side) * scale) as u32;
            side
        };

        self.stage.resize_draggable(scaled(width), scaled(height));
        self.stage.draggable.transform = Transform::IDENTITY;
        self.move_draggable(0.0, 0.0)?;
        Ok(())
    }

    /// One drag step with snapping against the viewport.
    pub fn move_draggable(&mut self, delta_x: f64, delta_y: f64) -> CropResult<Transform> {
        let viewport = self.stage.viewport_rect()?;
        let transform = self.stage.draggable.apply_delta(&viewport, delta_x, delta_y);
        log::debug!("moved by ({delta_x}, {delta_y}) to ({}, {})", transform.tx, transform.ty);
        Ok(transform)
    }

    /// Rasterize and encode the region under the viewport.
    pub async fn crop_image(&self) -> CropResult<CroppedFile> {
        let bitmap = Arc::clone(self.shared_bitmap()?);
        let crop_size = self.crop_size()?;
        let file = raster::crop(bitmap, self.stage.draggable, crop_size, self.settings).await?;
        log::info!("cropped {} ({} bytes)", file.name, file.bytes.len());
        Ok(file)
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Route a raw input event through both adapters.
    pub fn dispatch(&mut self, event: &mut InputEvent) -> CropResult<()> {
        let messages = [self.mouse.handle(event), self.touch.handle(event)];
        for message in messages.into_iter().flatten() {
            self.update(message)?;
        }
        Ok(())
    }

    pub fn update(&mut self, message: CropperMessage) -> CropResult<()> {
        match message {
            CropperMessage::SetCursor(cursor) => {
                self.stage.draggable.cursor = cursor;
            }
            CropperMessage::MoveDraggable { delta_x, delta_y } => {
                self.move_draggable(delta_x, delta_y)?;
            }
        }
        Ok(())
    }
}
