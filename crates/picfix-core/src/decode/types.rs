//! Decoder error and EXIF orientation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transform::FlipAxis;

/// Errors raised while turning file bytes into a raster.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// No decoder recognizes the bytes.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The format was recognized but the data is broken.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

/// How the stored pixels relate to the upright picture, per the EXIF
/// Orientation tag (values 1-8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Normal,
    Mirrored,
    UpsideDown,
    MirroredUpsideDown,
    /// Mirrored along the main diagonal.
    Transpose,
    RotatedLeft,
    /// Mirrored along the anti-diagonal.
    Transverse,
    RotatedRight,
}

impl Orientation {
    /// Map an EXIF tag value. Out-of-range values mean "no correction".
    pub fn from_exif(value: u32) -> Self {
        match value {
            2 => Orientation::Mirrored,
            3 => Orientation::UpsideDown,
            4 => Orientation::MirroredUpsideDown,
            5 => Orientation::Transpose,
            6 => Orientation::RotatedLeft,
            7 => Orientation::Transverse,
            8 => Orientation::RotatedRight,
            _ => Orientation::Normal,
        }
    }

    /// Clockwise quarter turns, then an optional mirror, that bring the
    /// stored pixels upright.
    pub fn correction(self) -> (u8, Option<FlipAxis>) {
        match self {
            Orientation::Normal => (0, None),
            Orientation::Mirrored => (0, Some(FlipAxis::Horizontal)),
            Orientation::UpsideDown => (2, None),
            Orientation::MirroredUpsideDown => (0, Some(FlipAxis::Vertical)),
            Orientation::Transpose => (1, Some(FlipAxis::Horizontal)),
            Orientation::RotatedLeft => (1, None),
            Orientation::Transverse => (3, Some(FlipAxis::Horizontal)),
            Orientation::RotatedRight => (3, None),
        }
    }
}
