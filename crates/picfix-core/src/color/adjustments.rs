//! Whole-image color adjustments.
//!
//! ## Formulas
//! - Grayscale: `Y = 0.299R + 0.587G + 0.114B` written to all color channels
//! - Sepia: fixed 3x3 matrix, see [`apply_sepia`]
//! - Brightness: `c + delta`
//! - Contrast: `factor * (c - 128) + 128` with
//!   `factor = 259 (level + 255) / (255 (259 - level))`

use tracing::trace;

use super::luma::calculate_luma_u8;
use crate::error::EditError;
use crate::raster::CHANNELS;

/// Largest contrast level magnitude accepted.
///
/// The factor formula is singular at 259; anything past 255 is rejected.
pub const CONTRAST_LIMIT: i32 = 255;

const SEPIA: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

#[inline]
fn to_channel(value: f32) -> u8 {
    value.clamp(0.0, 255.0).round() as u8
}

/// Apply a 256-entry lookup table to the color channels.
fn apply_lut(pixels: &mut [u8], lut: &[u8; 256]) {
    for px in pixels.chunks_exact_mut(CHANNELS) {
        px[0] = lut[px[0] as usize];
        px[1] = lut[px[1] as usize];
        px[2] = lut[px[2] as usize];
    }
}

/// Convert to grayscale with BT.601 luma weights.
///
/// Idempotent: gray pixels map to themselves.
pub fn apply_grayscale(pixels: &mut [u8]) {
    trace!(bytes = pixels.len(), "grayscale");
    for px in pixels.chunks_exact_mut(CHANNELS) {
        let y = calculate_luma_u8(px[0], px[1], px[2]);
        px[0] = y;
        px[1] = y;
        px[2] = y;
    }
}

/// Normalize to the canonical opaque RGB layout: alpha becomes 255.
pub fn normalize_rgb(pixels: &mut [u8]) {
    trace!(bytes = pixels.len(), "normalize_rgb");
    for px in pixels.chunks_exact_mut(CHANNELS) {
        px[3] = 255;
    }
}

/// Apply the classic sepia tone matrix.
///
/// ```text
/// R' = 0.393R + 0.769G + 0.189B
/// G' = 0.349R + 0.686G + 0.168B
/// B' = 0.272R + 0.534G + 0.131B
/// ```
pub fn apply_sepia(pixels: &mut [u8]) {
    trace!(bytes = pixels.len(), "sepia");
    for px in pixels.chunks_exact_mut(CHANNELS) {
        let (r, g, b) = (px[0] as f32, px[1] as f32, px[2] as f32);
        for (channel, row) in px.iter_mut().zip(SEPIA.iter()) {
            *channel = to_channel(row[0] * r + row[1] * g + row[2] * b);
        }
    }
}

/// Add `delta` to every color channel, clamping at 0 and 255.
pub fn apply_brightness(pixels: &mut [u8], delta: i32) {
    if delta == 0 {
        return;
    }
    trace!(bytes = pixels.len(), delta, "brightness");

    let mut lut = [0u8; 256];
    for (i, out) in lut.iter_mut().enumerate() {
        *out = (i as i32).saturating_add(delta).clamp(0, 255) as u8;
    }
    apply_lut(pixels, &lut);
}

/// Contrast multiplier for `level`, or None outside [-255, 255].
pub fn contrast_factor(level: i32) -> Option<f64> {
    if !(-CONTRAST_LIMIT..=CONTRAST_LIMIT).contains(&level) {
        return None;
    }
    let level = level as f64;
    Some(259.0 * (level + 255.0) / (255.0 * (259.0 - level)))
}

/// Stretch (positive level) or compress (negative level) channel values
/// around mid-gray 128.
///
/// # Errors
///
/// Returns `EditError::InvalidContrast` when `level` is outside [-255, 255].
pub fn apply_contrast(pixels: &mut [u8], level: i32) -> Result<(), EditError> {
    let factor = contrast_factor(level).ok_or(EditError::InvalidContrast(level))?;
    if level == 0 {
        return Ok(());
    }
    trace!(bytes = pixels.len(), level, factor, "contrast");

    let mut lut = [0u8; 256];
    for (i, out) in lut.iter_mut().enumerate() {
        *out = (factor * (i as f64 - 128.0) + 128.0).clamp(0.0, 255.0).round() as u8;
    }
    apply_lut(pixels, &lut);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(rgba: [u8; 4]) -> Vec<u8> {
        rgba.to_vec()
    }

    #[test]
    fn test_grayscale_weights() {
        let mut pixels = px([255, 0, 0, 200]);
        apply_grayscale(&mut pixels);
        assert_eq!(pixels, vec![76, 76, 76, 200]);
    }

    #[test]
    fn test_grayscale_idempotent() {
        let mut pixels = vec![12, 200, 34, 255, 90, 90, 250, 10];
        apply_grayscale(&mut pixels);
        let once = pixels.clone();
        apply_grayscale(&mut pixels);
        assert_eq!(pixels, once);
    }

    #[test]
    fn test_normalize_rgb_sets_opaque() {
        let mut pixels = vec![1, 2, 3, 0, 4, 5, 6, 128];
        normalize_rgb(&mut pixels);
        assert_eq!(pixels, vec![1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn test_sepia_pure_red() {
        let mut pixels = px([255, 0, 0, 255]);
        apply_sepia(&mut pixels);
        assert_eq!(pixels, vec![100, 89, 69, 255]);
    }

    #[test]
    fn test_sepia_white_clamps() {
        let mut pixels = px([255, 255, 255, 7]);
        apply_sepia(&mut pixels);
        // 1.351 * 255 and 1.203 * 255 clip; 0.937 * 255 = 238.9
        assert_eq!(pixels, vec![255, 255, 239, 7]);
    }

    #[test]
    fn test_sepia_black_stays_black() {
        let mut pixels = px([0, 0, 0, 255]);
        apply_sepia(&mut pixels);
        assert_eq!(pixels, vec![0, 0, 0, 255]);
    }

    #[test]
    fn test_brightness_clamps_high() {
        let mut pixels = px([250, 100, 0, 255]);
        apply_brightness(&mut pixels, 20);
        assert_eq!(pixels, vec![255, 120, 20, 255]);
    }

    #[test]
    fn test_brightness_clamps_low() {
        let mut pixels = px([5, 100, 255, 40]);
        apply_brightness(&mut pixels, -20);
        assert_eq!(pixels, vec![0, 80, 235, 40]);
    }

    #[test]
    fn test_brightness_round_trip_not_identity_at_edges() {
        let mut pixels = px([250, 100, 10, 255]);
        apply_brightness(&mut pixels, 20);
        apply_brightness(&mut pixels, -20);
        // 250 clipped at 255 then came back to 235
        assert_eq!(pixels, vec![235, 100, 10, 255]);
    }

    #[test]
    fn test_brightness_extreme_delta() {
        let mut pixels = px([10, 20, 30, 255]);
        apply_brightness(&mut pixels, i32::MAX);
        assert_eq!(pixels, vec![255, 255, 255, 255]);
    }

    #[test]
    fn test_contrast_factor_zero_is_one() {
        assert!((contrast_factor(0).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_contrast_factor_domain() {
        assert!(contrast_factor(255).is_some());
        assert!(contrast_factor(-255).is_some());
        assert!(contrast_factor(256).is_none());
        assert!(contrast_factor(259).is_none());
        assert!(contrast_factor(-300).is_none());
    }

    #[test]
    fn test_contrast_zero_is_identity() {
        let mut pixels = vec![0, 64, 128, 255, 200, 255, 1, 9];
        let original = pixels.clone();
        apply_contrast(&mut pixels, 0).unwrap();
        assert_eq!(pixels, original);
    }

    #[test]
    fn test_contrast_positive() {
        // factor(30) = 259 * 285 / (255 * 229) ~= 1.26406
        let mut pixels = px([228, 250, 0, 255]);
        apply_contrast(&mut pixels, 30).unwrap();
        assert_eq!(pixels, vec![254, 255, 0, 255]);
    }

    #[test]
    fn test_contrast_minimum_flattens_to_mid_gray() {
        let mut pixels = vec![0, 77, 255, 3, 128, 129, 200, 255];
        apply_contrast(&mut pixels, -255).unwrap();
        assert_eq!(pixels, vec![128, 128, 128, 3, 128, 128, 128, 255]);
    }

    #[test]
    fn test_contrast_rejects_singularity() {
        let mut pixels = px([10, 20, 30, 255]);
        assert!(matches!(
            apply_contrast(&mut pixels, 259),
            Err(EditError::InvalidContrast(259))
        ));
        assert_eq!(pixels, vec![10, 20, 30, 255]);
    }
}
