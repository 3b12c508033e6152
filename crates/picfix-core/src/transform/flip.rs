//! Mirror a raster along one axis.

use image::imageops;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::raster::Raster;

/// Mirror axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipAxis {
    /// Left-right mirror (columns reversed).
    Horizontal,
    /// Top-bottom mirror (rows reversed).
    Vertical,
}

/// Flip a raster. Dimensions are unchanged.
pub fn apply_flip(image: &Raster, axis: FlipAxis) -> Raster {
    let Some(view) = image.as_image() else {
        return image.clone();
    };
    trace!(width = image.width, height = image.height, ?axis, "flip");

    let flipped = match axis {
        FlipAxis::Horizontal => imageops::flip_horizontal(&view),
        FlipAxis::Vertical => imageops::flip_vertical(&view),
    };
    Raster::from_rgba_image(flipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_image() -> Raster {
        // 2x2: red green / blue white
        Raster::new(
            2,
            2,
            vec![
                255, 0, 0, 255, 0, 255, 0, 255, //
                0, 0, 255, 255, 255, 255, 255, 255,
            ],
        )
    }

    #[test]
    fn test_flip_horizontal() {
        let result = apply_flip(&row_image(), FlipAxis::Horizontal);
        assert_eq!(result.pixel(0, 0), Some([0, 255, 0, 255]));
        assert_eq!(result.pixel(1, 0), Some([255, 0, 0, 255]));
        assert_eq!(result.pixel(0, 1), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_flip_vertical() {
        let result = apply_flip(&row_image(), FlipAxis::Vertical);
        assert_eq!(result.pixel(0, 0), Some([0, 0, 255, 255]));
        assert_eq!(result.pixel(1, 1), Some([0, 255, 0, 255]));
    }

    #[test]
    fn test_flip_is_involution() {
        let img = row_image();
        for axis in [FlipAxis::Horizontal, FlipAxis::Vertical] {
            let twice = apply_flip(&apply_flip(&img, axis), axis);
            assert_eq!(twice, img, "double {:?} flip", axis);
        }
    }

    #[test]
    fn test_flip_keeps_dimensions() {
        let img = Raster::filled(7, 3, [9, 9, 9, 9]);
        let result = apply_flip(&img, FlipAxis::Vertical);
        assert_eq!(result.dimensions(), (7, 3));
    }
}
