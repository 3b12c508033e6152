//! Image cropping in raster coordinates.
//!
//! Screen-space selections must be converted first (see
//! [`Rect::unzoomed`](crate::raster::Rect::unzoomed)).

use tracing::trace;

use crate::error::EditError;
use crate::raster::{Raster, Rect, CHANNELS};

/// Crop a raster to `rect`.
///
/// The rectangle must be non-empty and lie entirely inside the raster.
/// Nothing outside the rectangle survives in the result.
///
/// # Errors
///
/// Returns `EditError::InvalidCrop` for empty or out-of-bounds rectangles.
///
/// # Example
///
/// ```
/// use picfix_core::raster::{Raster, Rect};
/// use picfix_core::transform::apply_crop;
///
/// let image = Raster::filled(100, 100, [128, 128, 128, 255]);
/// let cropped = apply_crop(&image, Rect::new(25, 25, 50, 50)).unwrap();
/// assert_eq!(cropped.width, 50);
/// assert_eq!(cropped.height, 50);
/// ```
pub fn apply_crop(image: &Raster, rect: Rect) -> Result<Raster, EditError> {
    image.validate()?;
    if !rect.fits_within(image.width, image.height) {
        return Err(EditError::InvalidCrop {
            rect,
            width: image.width,
            height: image.height,
        });
    }

    // Fast path: full crop returns a clone
    if rect == image.bounds() {
        return Ok(image.clone());
    }

    trace!(x = rect.x, y = rect.y, width = rect.width, height = rect.height, "crop");

    let src_stride = image.width as usize * CHANNELS;
    let row_len = rect.width as usize * CHANNELS;
    let left = rect.x as usize * CHANNELS;
    let top = rect.y as usize;

    let mut output = Vec::with_capacity(row_len * rect.height as usize);

    // Copy pixel data row by row for efficiency
    for y in top..top + rect.height as usize {
        let start = y * src_stride + left;
        output.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    Ok(Raster::new(rect.width as u32, rect.height as u32, output))
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Image dimensions plus a rectangle guaranteed to fit inside them.
    fn image_and_rect() -> impl Strategy<Value = (u32, u32, Rect)> {
        (1u32..=40, 1u32..=40).prop_flat_map(|(w, h)| {
            (0..w, 0..h).prop_flat_map(move |(x, y)| {
                (1..=w - x, 1..=h - y).prop_map(move |(rw, rh)| {
                    (w, h, Rect::new(x as i32, y as i32, rw as i32, rh as i32))
                })
            })
        })
    }

    fn create_test_image(width: u32, height: u32) -> Raster {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[x as u8, y as u8, 0, 255]);
            }
        }
        Raster::new(width, height, pixels)
    }

    proptest! {
        /// Property: Output dimensions equal the rectangle.
        #[test]
        fn prop_output_matches_rect((width, height, rect) in image_and_rect()) {
            let img = create_test_image(width, height);
            let result = apply_crop(&img, rect).unwrap();

            prop_assert_eq!(result.width, rect.width as u32);
            prop_assert_eq!(result.height, rect.height as u32);
            prop_assert_eq!(result.pixels.len(), result.pixel_count() * CHANNELS);
        }

        /// Property: Every output pixel is the source pixel at the offset position.
        #[test]
        fn prop_pixels_come_from_offset((width, height, rect) in image_and_rect()) {
            let img = create_test_image(width, height);
            let result = apply_crop(&img, rect).unwrap();

            for y in 0..result.height {
                for x in 0..result.width {
                    let expected = img.pixel(x + rect.x as u32, y + rect.y as u32);
                    prop_assert_eq!(result.pixel(x, y), expected);
                }
            }
        }

        /// Property: Sequential crops compose by adding offsets.
        #[test]
        fn prop_sequential_crops((width, height) in (4u32..=40, 4u32..=40)) {
            let img = create_test_image(width, height);

            let outer = Rect::new(1, 1, width as i32 - 2, height as i32 - 2);
            let inner = Rect::new(1, 1, outer.width - 2, outer.height - 2);
            prop_assume!(inner.is_valid());

            let twice = apply_crop(&apply_crop(&img, outer).unwrap(), inner).unwrap();
            let once = apply_crop(&img, Rect::new(2, 2, inner.width, inner.height)).unwrap();
            prop_assert_eq!(twice, once);
        }
    }
}
