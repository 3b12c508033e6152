//! Per-pixel color transforms.
//!
//! Every function works in place on a contiguous RGBA8 buffer
//! (`Raster::pixels`) in a single linear pass over 4-byte chunks. Results
//! are rounded to the nearest integer and clamped to 0..=255.
//!
//! Alpha is left untouched by everything except [`normalize_rgb`].

mod adjustments;
mod hue;
mod luma;

pub use adjustments::{
    apply_brightness, apply_contrast, apply_grayscale, apply_sepia, contrast_factor, normalize_rgb,
    CONTRAST_LIMIT,
};
pub use hue::{apply_hue_shift, hsv_to_rgb, rgb_to_hsv};
pub use luma::{calculate_luma, calculate_luma_u8, LUMA_B, LUMA_G, LUMA_R};
