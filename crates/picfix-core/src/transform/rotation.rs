//! Quarter-turn rotation.
//!
//! A 90° rotation maps pixels onto pixels exactly, so this uses an integer
//! remap instead of resampling. Width and height are swapped.

use image::imageops;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::raster::Raster;

/// Direction of a quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotateDirection {
    Clockwise,
    CounterClockwise,
}

/// Rotate a raster by 90° in the given direction.
///
/// Clockwise: source (x, y) lands at (H-1-y, x).
/// Counter-clockwise: source (x, y) lands at (y, W-1-x).
pub fn rotate90(image: &Raster, direction: RotateDirection) -> Raster {
    let Some(view) = image.as_image() else {
        return image.clone();
    };
    trace!(width = image.width, height = image.height, ?direction, "rotate90");

    let rotated = match direction {
        RotateDirection::Clockwise => imageops::rotate90(&view),
        RotateDirection::CounterClockwise => imageops::rotate270(&view),
    };
    Raster::from_rgba_image(rotated)
}
