//! Undoable edits.
//!
//! An [`Edit`] names an operation and its parameters. A [`Command`] pairs an
//! edit with a snapshot of the state it is about to change, taken when the
//! command is built. Reverting restores that snapshot; no inverse
//! transform is ever computed, so undo is exact even for lossy edits.

use serde::{Deserialize, Serialize};

use crate::color;
use crate::error::EditError;
use crate::raster::{Raster, Rect};
use crate::transform::{self, FlipAxis, RotateDirection};
use crate::viewport::{Viewport, ZoomChange, ZoomState};

/// The closed set of operations the editor can perform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Edit {
    /// Keep only the rectangle (raster coordinates).
    Crop(Rect),
    /// Halve both dimensions.
    Resize,
    Rotate(RotateDirection),
    Flip(FlipAxis),
    Grayscale,
    /// Normalize to opaque RGB.
    Rgb,
    Sepia,
    /// Signed per-channel offset.
    Brightness(i32),
    /// Contrast level in [-255, 255].
    Contrast(i32),
    /// Hue rotation in degrees, wrapped modulo 360.
    Hue(i32),
    Zoom(ZoomChange),
}

impl Edit {
    /// Whether this edit changes pixels (as opposed to display state).
    pub fn touches_raster(&self) -> bool {
        !matches!(self, Edit::Zoom(_))
    }

    /// Short human-readable label, suitable for menus and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Edit::Crop(_) => "Crop",
            Edit::Resize => "Resize",
            Edit::Rotate(RotateDirection::Clockwise) => "Rotate 90° CW",
            Edit::Rotate(RotateDirection::CounterClockwise) => "Rotate 90° CCW",
            Edit::Flip(FlipAxis::Horizontal) => "Flip Horizontal",
            Edit::Flip(FlipAxis::Vertical) => "Flip Vertical",
            Edit::Grayscale => "Grayscale",
            Edit::Rgb => "RGB",
            Edit::Sepia => "Sepia",
            Edit::Brightness(_) => "Brightness",
            Edit::Contrast(_) => "Contrast",
            Edit::Hue(_) => "Hue",
            Edit::Zoom(ZoomChange::NormalSize) => "Normal Size",
            Edit::Zoom(_) => "Zoom",
        }
    }
}

/// What a command mutates: the active raster and its viewport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub raster: Raster,
    pub viewport: Viewport,
}

impl Document {
    /// Pair a raster with a viewport and size the scroll ranges to it.
    pub fn new(raster: Raster, viewport: Viewport) -> Self {
        let mut doc = Self { raster, viewport };
        doc.viewport.sync(doc.raster.dimensions());
        doc
    }

    /// False for the empty raster that stands for "nothing loaded".
    pub fn has_image(&self) -> bool {
        !self.raster.is_empty()
    }
}

#[derive(Debug, Clone)]
enum Snapshot {
    Raster(Raster),
    Zoom(ZoomState),
}

/// An edit plus the pre-edit state needed to undo it.
#[derive(Debug, Clone)]
pub struct Command {
    edit: Edit,
    snapshot: Snapshot,
}

impl Command {
    /// Validate `edit` against the document and capture its pre-state.
    ///
    /// # Errors
    ///
    /// - `EditError::NoImage` if the document has no raster
    /// - `EditError::InvalidRaster` if the pixel buffer does not match the dimensions
    /// - `EditError::InvalidCrop` for an empty or out-of-bounds crop
    /// - `EditError::InvalidContrast` for a level outside [-255, 255]
    /// - `EditError::InvalidZoom` for a non-positive or non-finite factor
    pub fn new(edit: Edit, doc: &Document) -> Result<Self, EditError> {
        if !doc.has_image() {
            return Err(EditError::NoImage);
        }
        doc.raster.validate()?;

        match &edit {
            Edit::Crop(rect) if !rect.fits_within(doc.raster.width, doc.raster.height) => {
                return Err(EditError::InvalidCrop {
                    rect: *rect,
                    width: doc.raster.width,
                    height: doc.raster.height,
                });
            }
            Edit::Contrast(level) if color::contrast_factor(*level).is_none() => {
                return Err(EditError::InvalidContrast(*level));
            }
            Edit::Zoom(change) if !change.is_valid() => {
                let factor = match change {
                    ZoomChange::Scale(f) => *f,
                    ZoomChange::NormalSize => 1.0,
                };
                return Err(EditError::InvalidZoom(factor));
            }
            _ => {}
        }

        let snapshot = if edit.touches_raster() {
            Snapshot::Raster(doc.raster.clone())
        } else {
            Snapshot::Zoom(doc.viewport.zoom_state())
        };

        Ok(Self { edit, snapshot })
    }

    /// The operation this command performs.
    pub fn edit(&self) -> &Edit {
        &self.edit
    }

    /// The raster as it was before this command, if the command touches pixels.
    pub fn raster_before(&self) -> Option<&Raster> {
        match &self.snapshot {
            Snapshot::Raster(raster) => Some(raster),
            Snapshot::Zoom(_) => None,
        }
    }

    /// Perform the edit on the document.
    ///
    /// Geometric edits replace the raster; color edits rewrite it in place.
    pub fn apply(&self, doc: &mut Document) -> Result<(), EditError> {
        let raster = &mut doc.raster;
        match &self.edit {
            Edit::Crop(rect) => *raster = transform::apply_crop(raster, *rect)?,
            Edit::Resize => *raster = transform::halve(raster),
            Edit::Rotate(direction) => *raster = transform::rotate90(raster, *direction),
            Edit::Flip(axis) => *raster = transform::apply_flip(raster, *axis),
            Edit::Grayscale => color::apply_grayscale(&mut raster.pixels),
            Edit::Rgb => color::normalize_rgb(&mut raster.pixels),
            Edit::Sepia => color::apply_sepia(&mut raster.pixels),
            Edit::Brightness(delta) => color::apply_brightness(&mut raster.pixels, *delta),
            Edit::Contrast(level) => color::apply_contrast(&mut raster.pixels, *level)?,
            Edit::Hue(shift) => color::apply_hue_shift(&mut raster.pixels, *shift),
            Edit::Zoom(change) => {
                let dims = doc.raster.dimensions();
                doc.viewport.apply_zoom(*change, dims);
                return Ok(());
            }
        }
        doc.viewport.sync(doc.raster.dimensions());
        Ok(())
    }

    /// Restore the snapshot taken at construction.
    ///
    /// Zoom commands restore the factor and scroll positions only; the
    /// visible area keeps whatever size the window has now.
    pub fn revert(&self, doc: &mut Document) {
        match &self.snapshot {
            Snapshot::Raster(before) => {
                doc.raster = before.clone();
                doc.viewport.sync(doc.raster.dimensions());
            }
            Snapshot::Zoom(before) => {
                let dims = doc.raster.dimensions();
                doc.viewport.restore_zoom_state(*before, dims);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_document(width: u32, height: u32) -> Document {
        Document::new(
            Raster::filled(width, height, [255, 0, 0, 255]),
            Viewport::new(50, 50),
        )
    }

    #[test]
    fn test_new_rejects_empty_document() {
        let doc = Document::default();
        assert!(matches!(
            Command::new(Edit::Sepia, &doc),
            Err(EditError::NoImage)
        ));
        assert!(matches!(
            Command::new(Edit::Zoom(ZoomChange::NormalSize), &doc),
            Err(EditError::NoImage)
        ));
    }

    #[test]
    fn test_new_rejects_bad_parameters() {
        let doc = red_document(4, 4);
        assert!(matches!(
            Command::new(Edit::Crop(Rect::new(0, 0, 5, 1)), &doc),
            Err(EditError::InvalidCrop { .. })
        ));
        assert!(matches!(
            Command::new(Edit::Crop(Rect::new(0, 0, 0, 0)), &doc),
            Err(EditError::InvalidCrop { .. })
        ));
        assert!(matches!(
            Command::new(Edit::Contrast(259), &doc),
            Err(EditError::InvalidContrast(259))
        ));
        assert!(matches!(
            Command::new(Edit::Zoom(ZoomChange::Scale(0.0)), &doc),
            Err(EditError::InvalidZoom(_))
        ));
    }

    #[test]
    fn test_snapshot_taken_at_construction() {
        let mut doc = red_document(4, 4);
        let cmd = Command::new(Edit::Sepia, &doc).unwrap();

        // Mutate after construction; revert still restores the captured state
        doc.raster = Raster::filled(2, 2, [1, 1, 1, 1]);
        cmd.revert(&mut doc);
        assert_eq!(doc.raster, Raster::filled(4, 4, [255, 0, 0, 255]));
    }

    #[test]
    fn test_revert_without_apply_is_safe() {
        let mut doc = red_document(3, 3);
        let before = doc.clone();
        let cmd = Command::new(Edit::Grayscale, &doc).unwrap();
        cmd.revert(&mut doc);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_sepia_apply_and_revert() {
        let mut doc = red_document(4, 4);
        let cmd = Command::new(Edit::Sepia, &doc).unwrap();

        cmd.apply(&mut doc).unwrap();
        assert!(doc.raster.pixels.chunks_exact(4).all(|px| px == [100, 89, 69, 255]));

        cmd.revert(&mut doc);
        assert_eq!(doc.raster, Raster::filled(4, 4, [255, 0, 0, 255]));
    }

    #[test]
    fn test_brightness_undo_is_exact() {
        let mut doc = Document::new(Raster::filled(2, 2, [250, 10, 0, 255]), Viewport::new(8, 8));
        let before = doc.raster.clone();

        let cmd = Command::new(Edit::Brightness(20), &doc).unwrap();
        cmd.apply(&mut doc).unwrap();
        assert_eq!(doc.raster.pixel(0, 0), Some([255, 30, 20, 255]));

        cmd.revert(&mut doc);
        assert_eq!(doc.raster, before);
    }

    #[test]
    fn test_crop_apply_updates_scroll_range() {
        let mut doc = red_document(100, 80);
        assert_eq!(doc.viewport.horizontal().maximum(), 50);

        let cmd = Command::new(Edit::Crop(Rect::new(10, 10, 40, 40)), &doc).unwrap();
        cmd.apply(&mut doc).unwrap();
        assert_eq!(doc.raster.dimensions(), (40, 40));
        assert_eq!(doc.viewport.horizontal().maximum(), 0);

        cmd.revert(&mut doc);
        assert_eq!(doc.raster.dimensions(), (100, 80));
        assert_eq!(doc.viewport.horizontal().maximum(), 50);
    }

    #[test]
    fn test_zoom_snapshots_viewport_not_raster() {
        let mut doc = red_document(100, 100);
        doc.viewport.scroll_to(10, 10);
        let raster = doc.raster.clone();

        let cmd = Command::new(Edit::Zoom(ZoomChange::Scale(2.0)), &doc).unwrap();
        assert!(cmd.raster_before().is_none());

        cmd.apply(&mut doc).unwrap();
        assert_eq!(doc.viewport.zoom(), 2.0);
        assert_eq!(doc.raster, raster);

        cmd.revert(&mut doc);
        assert_eq!(doc.viewport.zoom(), 1.0);
        assert_eq!(doc.viewport.horizontal().value(), 10);
    }

    #[test]
    fn test_new_rejects_inconsistent_buffer() {
        let doc = Document::new(
            Raster {
                width: 4,
                height: 4,
                pixels: vec![7; 8],
            },
            Viewport::new(50, 50),
        );
        for edit in [
            Edit::Rotate(RotateDirection::Clockwise),
            Edit::Flip(FlipAxis::Vertical),
            Edit::Resize,
            Edit::Crop(Rect::new(1, 1, 3, 3)),
            Edit::Sepia,
        ] {
            assert!(matches!(
                Command::new(edit, &doc),
                Err(EditError::InvalidRaster { expected: 64, actual: 8, .. })
            ));
        }
    }

    #[test]
    fn test_zoom_undo_keeps_resized_window() {
        let mut doc = red_document(2000, 2000);
        let cmd = Command::new(Edit::Zoom(ZoomChange::Scale(1.25)), &doc).unwrap();
        cmd.apply(&mut doc).unwrap();

        doc.viewport.set_visible_area(300, 200, doc.raster.dimensions());
        cmd.revert(&mut doc);

        assert_eq!(doc.viewport.zoom(), 1.0);
        assert_eq!(doc.viewport.visible_area(), (300, 200));
        assert_eq!(doc.viewport.horizontal().page_step(), 300);
        assert_eq!(doc.viewport.vertical().page_step(), 200);
    }

    #[test]
    fn test_normal_size_undo_restores_absolute_factor() {
        let mut doc = red_document(100, 100);
        Command::new(Edit::Zoom(ZoomChange::Scale(2.5)), &doc)
            .unwrap()
            .apply(&mut doc)
            .unwrap();

        let cmd = Command::new(Edit::Zoom(ZoomChange::NormalSize), &doc).unwrap();
        cmd.apply(&mut doc).unwrap();
        assert_eq!(doc.viewport.zoom(), 1.0);

        cmd.revert(&mut doc);
        assert_eq!(doc.viewport.zoom(), 2.5);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Edit::Sepia.label(), "Sepia");
        assert_eq!(Edit::Zoom(ZoomChange::NormalSize).label(), "Normal Size");
        assert_eq!(Edit::Zoom(ZoomChange::Scale(1.25)).label(), "Zoom");
        assert!(!Edit::Zoom(ZoomChange::NormalSize).touches_raster());
        assert!(Edit::Resize.touches_raster());
    }
}
