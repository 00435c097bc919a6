// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/mod.rs
//
// Widget layer: the cropper, its layout stage, input adapters and messages.

mod cropper;
pub mod input;
pub mod message;
pub mod stage;

pub use cropper::{Cropper, ObservedAttribute};
pub use message::CropperMessage;
