//! Editor configuration.

use serde::{Deserialize, Serialize};

/// Tunables for the editing session.
///
/// Missing fields fall back to the defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Zoom-out is offered only while the zoom factor is above this.
    pub min_zoom: f64,
    /// Zoom-in is offered only while the zoom factor is below this.
    pub max_zoom: f64,
    /// Multiplier applied by a zoom-in step.
    pub zoom_in_step: f64,
    /// Multiplier applied by a zoom-out step.
    pub zoom_out_step: f64,
    /// Hue shift in degrees used by the one-click hue action.
    pub default_hue_shift: i32,
    /// JPEG quality (1-100) used when saving.
    pub jpeg_quality: u8,
    /// Width of the visible area in screen pixels.
    pub visible_width: u32,
    /// Height of the visible area in screen pixels.
    pub visible_height: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.333,
            max_zoom: 4.0,
            zoom_in_step: 1.25,
            zoom_out_step: 0.8,
            default_hue_shift: 30,
            jpeg_quality: 90,
            visible_width: 800,
            visible_height: 600,
        }
    }
}

impl EditorConfig {
    /// Same as [`EditorConfig::default`].
    pub fn new() -> Self {
        Self::default()
    }
}
