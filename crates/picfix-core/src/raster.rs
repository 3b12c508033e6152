//! In-memory raster and the integer rectangle used to address it.

use image::{ImageBuffer, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::EditError;

/// Bytes per pixel in a [`Raster`] (RGBA, 8 bits per channel).
pub const CHANNELS: usize = 4;

/// An RGBA8 image held in memory.
///
/// A zero-sized raster stands for "no image loaded".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Raster {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    /// Length should be width * height * 4.
    pub pixels: Vec<u8>,
}

impl Raster {
    /// Create a new Raster with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * CHANNELS,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// The empty raster.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a raster where every pixel has the same RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            pixels.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a Raster from an image::RgbaImage.
    pub fn from_rgba_image(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an owned image::RgbaImage.
    pub fn to_rgba_image(&self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Borrow the pixel buffer as an image view without copying.
    pub fn as_image(&self) -> Option<ImageBuffer<Rgba<u8>, &[u8]>> {
        ImageBuffer::from_raw(self.width, self.height, self.pixels.as_slice())
    }

    /// RGBA value at (x, y), or None when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let px = self.pixels.get(idx..idx + CHANNELS)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Rectangle covering the whole raster.
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Buffer length implied by the dimensions.
    pub fn expected_len(&self) -> usize {
        self.pixel_count() * CHANNELS
    }

    /// Whether the pixel buffer length matches the dimensions.
    pub fn is_consistent(&self) -> bool {
        self.pixels.len() == self.expected_len()
    }

    /// Reject a raster whose buffer does not match its dimensions.
    ///
    /// The fields are public, so anything built outside [`Raster::new`]
    /// must pass through here before a transform indexes into it.
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidRaster` on a length mismatch.
    pub fn validate(&self) -> Result<(), EditError> {
        if self.is_consistent() {
            Ok(())
        } else {
            Err(EditError::InvalidRaster {
                width: self.width,
                height: self.height,
                expected: self.expected_len(),
                actual: self.pixels.len(),
            })
        }
    }
}

/// Axis-aligned integer rectangle.
///
/// Used both for screen-space selections and raster-space crop regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Rectangle with its top-left corner at (x, y).
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a normalized rectangle from two drag corners in any order.
    ///
    /// Spans wider than `i32::MAX` saturate.
    pub fn from_corners(origin: (i32, i32), end: (i32, i32)) -> Self {
        Self {
            x: origin.0.min(end.0),
            y: origin.1.min(end.1),
            width: saturating_span(origin.0, end.0),
            height: saturating_span(origin.1, end.1),
        }
    }

    /// Non-empty rectangle.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Whether the rectangle is valid and lies entirely inside a
    /// `width` x `height` raster.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.is_valid()
            && self.x >= 0
            && self.y >= 0
            && self.x as i64 + self.width as i64 <= width as i64
            && self.y as i64 + self.height as i64 <= height as i64
    }

    /// Map a screen-space rectangle to raster space by dividing by the
    /// zoom factor. Components are truncated toward zero.
    pub fn unzoomed(&self, zoom: f64) -> Self {
        if zoom == 1.0 || !zoom.is_finite() || zoom <= 0.0 {
            return *self;
        }
        Self {
            x: (self.x as f64 / zoom) as i32,
            y: (self.y as f64 / zoom) as i32,
            width: (self.width as f64 / zoom) as i32,
            height: (self.height as f64 / zoom) as i32,
        }
    }
}

fn saturating_span(a: i32, b: i32) -> i32 {
    i32::try_from(a.abs_diff(b)).unwrap_or(i32::MAX)
}
