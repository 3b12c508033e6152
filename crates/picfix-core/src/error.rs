//! Error type shared by commands, transforms and the editing session.

use std::path::PathBuf;

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::raster::Rect;

/// Errors raised while building, applying or persisting an edit.
#[derive(Debug, Error)]
pub enum EditError {
    /// The operation needs a loaded image and the session has none.
    #[error("No image is loaded")]
    NoImage,

    /// Pixel buffer length does not match the dimensions.
    #[error("Invalid raster: {width}x{height} needs {expected} bytes, got {actual}")]
    InvalidRaster {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Crop rectangle is empty or reaches outside the raster.
    #[error("Invalid crop rectangle {rect:?} for a {width}x{height} image")]
    InvalidCrop { rect: Rect, width: u32, height: u32 },

    /// Contrast level outside [-255, 255].
    #[error("Contrast level {0} is outside the supported range -255..=255")]
    InvalidContrast(i32),

    /// Zoom factor must be finite and strictly positive.
    #[error("Invalid zoom factor: {0}")]
    InvalidZoom(f64),

    /// The image could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The image could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Reading or writing an image file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
