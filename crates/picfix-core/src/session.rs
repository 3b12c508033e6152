//! Editing session: the loaded image, its pristine original, the viewport
//! and the undo history.
//!
//! Every mutation of the active raster goes through a [`Command`] executed
//! on the session's [`History`], except loading and reverting to the
//! original, which both clear the history.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::command::{Command, Document, Edit};
use crate::config::EditorConfig;
use crate::decode::decode_image;
use crate::edit_log::EditLog;
use crate::encode::save_image;
use crate::error::EditError;
use crate::history::History;
use crate::raster::{Raster, Rect};
use crate::transform::{FlipAxis, RotateDirection};
use crate::viewport::{Viewport, ZoomChange};

/// Which UI actions are currently meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Affordances {
    pub save: bool,
    pub print: bool,
    pub revert: bool,
    pub normal_size: bool,
    pub undo: bool,
    pub redo: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
}

/// Outcome of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    pub path: PathBuf,
    /// Set when the image was written but the edit log rejected the entry.
    pub warning: Option<String>,
}

/// One open image and everything needed to edit it.
#[derive(Debug)]
pub struct Session {
    config: EditorConfig,
    doc: Document,
    original: Raster,
    source: Option<PathBuf>,
    history: History,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Session {
    /// Empty session; the viewport takes its window size from `config`.
    pub fn new(config: EditorConfig) -> Self {
        let viewport = Viewport::new(config.visible_width, config.visible_height);
        Self {
            config,
            doc: Document::new(Raster::empty(), viewport),
            original: Raster::empty(),
            source: None,
            history: History::new(),
        }
    }

    /// Settings the session was created with.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The image as currently edited.
    pub fn raster(&self) -> &Raster {
        &self.doc.raster
    }

    /// The image as loaded, before any edit.
    pub fn original(&self) -> &Raster {
        &self.original
    }

    /// Zoom and scroll state of the current image.
    pub fn viewport(&self) -> &Viewport {
        &self.doc.viewport
    }

    /// Raster and viewport together, as commands see them.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Path the current image was opened from.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Whether an image is loaded.
    pub fn has_image(&self) -> bool {
        self.doc.has_image()
    }

    /// Undo and redo stacks.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Mutable access for observer registration.
    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// Read and decode an image file, replacing the current one.
    ///
    /// On failure nothing changes.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<(), EditError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| EditError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let raster = decode_image(&bytes)?;
        info!(path = %path.display(), width = raster.width, height = raster.height, "Opened image");
        self.load_raster(raster, Some(path.to_path_buf()))
    }

    /// Install an already decoded raster as both active and original image.
    ///
    /// # Arguments
    /// * `raster` - The new image; its buffer must match its dimensions
    /// * `source` - File the raster came from, if any
    ///
    /// # Errors
    /// `EditError::InvalidRaster` for a malformed buffer, in which case the
    /// session is left untouched.
    pub fn load_raster(
        &mut self,
        raster: Raster,
        source: Option<PathBuf>,
    ) -> Result<(), EditError> {
        raster.validate()?;
        self.original = raster.clone();
        self.doc.raster = raster;
        self.doc.viewport.reset(self.doc.raster.dimensions());
        self.source = source;
        self.history.reset();
        Ok(())
    }

    /// Encode the active raster by the path's extension and write it, then
    /// record the save in `log`.
    ///
    /// A log failure does not fail the save; it comes back as
    /// `SaveReport::warning`.
    pub fn save<L: EditLog>(
        &self,
        path: impl AsRef<Path>,
        username: &str,
        log: &mut L,
    ) -> Result<SaveReport, EditError> {
        if !self.has_image() {
            return Err(EditError::NoImage);
        }

        let path = path.as_ref();
        save_image(&self.doc.raster, path, self.config.jpeg_quality)?;
        info!(path = %path.display(), username, "Saved image");

        let warning = match log.record_edit(&path.to_string_lossy(), username) {
            Ok(()) => None,
            Err(err) => {
                warn!(path = %path.display(), username, error = %err, "Failed to record edit");
                Some(format!("Image saved, but the edit could not be recorded: {err}"))
            }
        };

        Ok(SaveReport {
            path: path.to_path_buf(),
            warning,
        })
    }

    /// Throw away every edit and restore the raster as loaded.
    pub fn revert_to_original(&mut self) -> Result<(), EditError> {
        if !self.has_image() {
            return Err(EditError::NoImage);
        }
        self.doc.raster = self.original.clone();
        self.doc.viewport.sync(self.doc.raster.dimensions());
        self.history.reset();
        info!("Reverted to original");
        Ok(())
    }

    /// Validate, apply and record an edit.
    pub fn execute(&mut self, edit: Edit) -> Result<(), EditError> {
        let cmd = Command::new(edit, &self.doc)?;
        self.history.execute(cmd, &mut self.doc)
    }

    /// Undo the most recent edit. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.doc)
    }

    /// Reapply the most recently undone edit.
    ///
    /// # Returns
    /// `Ok(false)` when the redo stack is empty.
    pub fn redo(&mut self) -> Result<bool, EditError> {
        self.history.redo(&mut self.doc)
    }

    /// Crop to a selection made on screen at the current zoom factor.
    pub fn crop_selection(&mut self, screen: Rect) -> Result<(), EditError> {
        let rect = screen.unzoomed(self.doc.viewport.zoom());
        self.execute(Edit::Crop(rect))
    }

    /// Halve both dimensions.
    pub fn resize(&mut self) -> Result<(), EditError> {
        self.execute(Edit::Resize)
    }

    /// Quarter turn in `direction`.
    pub fn rotate(&mut self, direction: RotateDirection) -> Result<(), EditError> {
        self.execute(Edit::Rotate(direction))
    }

    /// Mirror across `axis`.
    pub fn flip(&mut self, axis: FlipAxis) -> Result<(), EditError> {
        self.execute(Edit::Flip(axis))
    }

    /// Replace each pixel with its luma.
    pub fn grayscale(&mut self) -> Result<(), EditError> {
        self.execute(Edit::Grayscale)
    }

    /// Make the image fully opaque.
    pub fn rgb(&mut self) -> Result<(), EditError> {
        self.execute(Edit::Rgb)
    }

    /// Sepia tone.
    pub fn sepia(&mut self) -> Result<(), EditError> {
        self.execute(Edit::Sepia)
    }

    /// Add `delta` to every color channel, clamped to 0-255.
    pub fn brightness(&mut self, delta: i32) -> Result<(), EditError> {
        self.execute(Edit::Brightness(delta))
    }

    /// Stretch or compress channels around mid-gray. `level` must be within ±255.
    pub fn contrast(&mut self, level: i32) -> Result<(), EditError> {
        self.execute(Edit::Contrast(level))
    }

    /// Rotate hues by `degrees`, or by the configured default when `None`.
    pub fn shift_hue(&mut self, degrees: Option<i32>) -> Result<(), EditError> {
        let degrees = degrees.unwrap_or(self.config.default_hue_shift);
        self.execute(Edit::Hue(degrees))
    }

    /// Zoom by the configured step. Bounds are only enforced through
    /// [`Session::affordances`].
    pub fn zoom_in(&mut self) -> Result<(), EditError> {
        self.execute(Edit::Zoom(ZoomChange::Scale(self.config.zoom_in_step)))
    }

    /// Zoom out by the configured step.
    pub fn zoom_out(&mut self) -> Result<(), EditError> {
        self.execute(Edit::Zoom(ZoomChange::Scale(self.config.zoom_out_step)))
    }

    /// Back to a zoom factor of 1.0, as an undoable edit.
    pub fn normal_size(&mut self) -> Result<(), EditError> {
        self.execute(Edit::Zoom(ZoomChange::NormalSize))
    }

    /// Scroll the view. Scrolling is not recorded in the history.
    pub fn scroll_to(&mut self, horizontal: i32, vertical: i32) {
        self.doc.viewport.scroll_to(horizontal, vertical);
    }

    /// The window was resized. Not recorded in the history.
    pub fn set_visible_area(&mut self, width: u32, height: u32) {
        let dims = self.doc.raster.dimensions();
        self.doc.viewport.set_visible_area(width, height, dims);
    }

    /// Which actions the UI should currently enable.
    pub fn affordances(&self) -> Affordances {
        let has_image = self.has_image();
        let viewport = &self.doc.viewport;
        Affordances {
            save: has_image,
            print: has_image,
            revert: has_image,
            normal_size: has_image,
            undo: self.history.can_undo(),
            redo: self.history.can_redo(),
            zoom_in: has_image && viewport.can_zoom_in(self.config.max_zoom),
            zoom_out: has_image && viewport.can_zoom_out(self.config.min_zoom),
        }
    }
}
