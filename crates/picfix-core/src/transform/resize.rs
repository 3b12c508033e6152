//! Raster resampling.
//!
//! The editor exposes a single resize action that halves both dimensions;
//! [`resize`] is the general building block it uses.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::raster::Raster;

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, smooth).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Resize a raster to exact dimensions.
///
/// Zero target dimensions are raised to 1. Matching dimensions return a
/// clone without resampling.
pub fn resize(image: &Raster, width: u32, height: u32, filter: FilterType) -> Raster {
    let (width, height) = (width.max(1), height.max(1));

    // Fast path: if dimensions match, just clone
    if image.dimensions() == (width, height) {
        return image.clone();
    }

    let Some(view) = image.as_image() else {
        return image.clone();
    };
    trace!(from_w = image.width, from_h = image.height, width, height, ?filter, "resize");

    let resized = image::imageops::resize(&view, width, height, filter.to_image_filter());
    Raster::from_rgba_image(resized)
}

/// Halve both dimensions (floored, minimum 1) with smooth resampling.
///
/// Aspect ratio is preserved up to rounding.
pub fn halve(image: &Raster) -> Raster {
    resize(image, image.width / 2, image.height / 2, FilterType::Bilinear)
}
