// SPDX-License-Identifier: GPL-3.0-or-later
// src/error.rs
//
// Error kind shared by every cropper operation.

/// Result alias used across the crate.
pub type CropResult<T> = Result<T, CropperError>;

/// Single distinguished error type of the cropper.
///
/// The variant carries the class of failure, the payload the human-readable
/// message shown to the host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CropperError {
    /// State was used before it was initialized (bitmap, viewport element).
    #[error("SigmaCropper Error: {0}")]
    Precondition(String),
    /// Invalid attribute or style value.
    #[error("SigmaCropper Error: {0}")]
    Configuration(String),
    /// The source could not be read or decoded.
    #[error("SigmaCropper Error: {0}")]
    Io(String),
    /// The encoder produced no data.
    #[error("SigmaCropper Error: {0}")]
    Encoding(String),
}

impl CropperError {
    pub fn precondition<S: Into<String>>(msg: S) -> Self {
        Self::Precondition(msg.into())
    }

    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn io<S: Into<String>>(msg: S) -> Self {
        Self::Io(msg.into())
    }

    pub fn encoding<S: Into<String>>(msg: S) -> Self {
        Self::Encoding(msg.into())
    }

    /// Human-readable message without the error prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Precondition(msg)
            | Self::Configuration(msg)
            | Self::Io(msg)
            | Self::Encoding(msg) => msg,
        }
    }
}
