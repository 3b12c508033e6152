//! Hue rotation in HSV space.

use tracing::trace;

use crate::raster::CHANNELS;

/// Convert 8-bit RGB to HSV.
///
/// Returns hue in degrees [0, 360), saturation and value in [0, 1].
/// Achromatic colors report hue 0.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let (r, g, b) = (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    if delta <= 0.0 {
        return (0.0, 0.0, v);
    }
    let s = delta / max;

    let h = if max == r {
        60.0 * ((g - b) / delta)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    (h.rem_euclid(360.0), s, v)
}

/// Convert HSV back to 8-bit RGB. Hue is wrapped into [0, 360).
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (u8, u8, u8) {
    let h = h.rem_euclid(360.0);
    let c = v * s;
    let sector = h / 60.0;
    let x = c * (1.0 - (sector % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match sector as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let to_u8 = |value: f32| ((value + m) * 255.0).clamp(0.0, 255.0).round() as u8;
    (to_u8(r), to_u8(g), to_u8(b))
}

/// Rotate the hue of every pixel by `shift_degrees`, wrapping modulo 360.
///
/// Saturation, value and alpha are preserved. Gray pixels have no hue and
/// are left as they are. A shift that is a multiple of 360 is a no-op.
pub fn apply_hue_shift(pixels: &mut [u8], shift_degrees: i32) {
    let shift = shift_degrees.rem_euclid(360);
    if shift == 0 {
        return;
    }
    trace!(bytes = pixels.len(), shift, "hue_shift");

    for px in pixels.chunks_exact_mut(CHANNELS) {
        if px[0] == px[1] && px[1] == px[2] {
            continue;
        }
        let (h, s, v) = rgb_to_hsv(px[0], px[1], px[2]);
        let (r, g, b) = hsv_to_rgb(h + shift as f32, s, v);
        px[0] = r;
        px[1] = g;
        px[2] = b;
    }
}
