//! Display state: zoom factor and scroll positions.
//!
//! Zoom never touches pixel data. The displayed size is the raster size
//! times the zoom factor; scroll ranges follow from the displayed size and
//! the visible area.

use serde::{Deserialize, Serialize};
use tracing::trace;

/// A requested zoom change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ZoomChange {
    /// Multiply the current factor.
    Scale(f64),
    /// Reset the factor to 1.0.
    NormalSize,
}

impl ZoomChange {
    /// Scale factors must be finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        match self {
            ZoomChange::Scale(factor) => factor.is_finite() && *factor > 0.0,
            ZoomChange::NormalSize => true,
        }
    }
}

/// One scroll axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollBar {
    value: i32,
    maximum: i32,
    page_step: i32,
}

impl ScrollBar {
    /// Current position, within [0, maximum].
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Largest position: content extent minus page step, never negative.
    pub fn maximum(&self) -> i32 {
        self.maximum
    }

    /// Visible extent along this axis.
    pub fn page_step(&self) -> i32 {
        self.page_step
    }

    /// Set the position, clamped to [0, maximum].
    pub fn set_value(&mut self, value: i32) {
        self.value = value.clamp(0, self.maximum);
    }

    fn set_range(&mut self, content: i32, page: i32) {
        self.page_step = page;
        self.maximum = (content - page).max(0);
        self.value = self.value.clamp(0, self.maximum);
    }

    /// Rescale the position after the content grew by `factor`, keeping the
    /// visible center in place: `factor * value + (factor - 1) * page / 2`.
    fn rescale(&mut self, factor: f64) {
        let value = factor * self.value as f64 + (factor - 1.0) * self.page_step as f64 / 2.0;
        self.set_value(value as i32);
    }
}

/// Zoom factor and scroll positions, without the window geometry.
///
/// This is what a zoom edit changes and what undoing it puts back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    pub zoom: f64,
    pub horizontal: i32,
    pub vertical: i32,
}

/// Zoom factor plus both scroll bars.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    visible_width: u32,
    visible_height: u32,
    horizontal: ScrollBar,
    vertical: ScrollBar,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Viewport {
    /// Viewport at 1.0 over a `visible_width` x `visible_height` window.
    /// Call [`Viewport::sync`] once a raster is known.
    pub fn new(visible_width: u32, visible_height: u32) -> Self {
        Self {
            zoom: 1.0,
            visible_width,
            visible_height,
            horizontal: ScrollBar::default(),
            vertical: ScrollBar::default(),
        }
    }

    /// Current zoom factor; 1.0 is actual size.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Horizontal scroll bar.
    pub fn horizontal(&self) -> &ScrollBar {
        &self.horizontal
    }

    /// Vertical scroll bar.
    pub fn vertical(&self) -> &ScrollBar {
        &self.vertical
    }

    /// Window size as (width, height).
    pub fn visible_area(&self) -> (u32, u32) {
        (self.visible_width, self.visible_height)
    }

    /// On-screen size of a raster at the current zoom factor.
    pub fn displayed_size(&self, raster: (u32, u32)) -> (u32, u32) {
        (
            (raster.0 as f64 * self.zoom).round() as u32,
            (raster.1 as f64 * self.zoom).round() as u32,
        )
    }

    /// Recompute scroll ranges for a raster of the given dimensions.
    pub fn sync(&mut self, raster: (u32, u32)) {
        let (w, h) = self.displayed_size(raster);
        self.horizontal
            .set_range(clamp_i32(w), clamp_i32(self.visible_width));
        self.vertical
            .set_range(clamp_i32(h), clamp_i32(self.visible_height));
    }

    /// Resize the window and recompute ranges. Not an undoable edit.
    pub fn set_visible_area(&mut self, width: u32, height: u32, raster: (u32, u32)) {
        self.visible_width = width;
        self.visible_height = height;
        self.sync(raster);
    }

    /// Move both bars, each clamped to its range.
    pub fn scroll_to(&mut self, horizontal: i32, vertical: i32) {
        self.horizontal.set_value(horizontal);
        self.vertical.set_value(vertical);
    }

    /// Back to 1.0 with both bars at the origin, as after loading an image.
    pub fn reset(&mut self, raster: (u32, u32)) {
        self.zoom = 1.0;
        self.horizontal.value = 0;
        self.vertical.value = 0;
        self.sync(raster);
    }

    /// Apply a zoom change. Scroll bars are rescaled for `Scale` only.
    pub fn apply_zoom(&mut self, change: ZoomChange, raster: (u32, u32)) {
        match change {
            ZoomChange::Scale(factor) => {
                self.zoom *= factor;
                self.sync(raster);
                self.horizontal.rescale(factor);
                self.vertical.rescale(factor);
            }
            ZoomChange::NormalSize => {
                self.zoom = 1.0;
                self.sync(raster);
            }
        }
        trace!(zoom = self.zoom, ?change, "zoom");
    }

    /// Capture the zoom factor and scroll positions.
    pub fn zoom_state(&self) -> ZoomState {
        ZoomState {
            zoom: self.zoom,
            horizontal: self.horizontal.value,
            vertical: self.vertical.value,
        }
    }

    /// Put back a captured zoom factor and scroll positions.
    ///
    /// Ranges follow the current visible area, which is left as it is;
    /// restored positions are clamped to those ranges.
    pub fn restore_zoom_state(&mut self, state: ZoomState, raster: (u32, u32)) {
        self.zoom = state.zoom;
        self.sync(raster);
        self.scroll_to(state.horizontal, state.vertical);
        trace!(zoom = self.zoom, "zoom restored");
    }

    /// Whether a further zoom-in step is offered below `max_zoom`.
    pub fn can_zoom_in(&self, max_zoom: f64) -> bool {
        self.zoom < max_zoom
    }

    /// Whether a further zoom-out step is offered above `min_zoom`.
    pub fn can_zoom_out(&self, min_zoom: f64) -> bool {
        self.zoom > min_zoom
    }
}

fn clamp_i32(value: u32) -> i32 {
    value.min(i32::MAX as u32) as i32
}
