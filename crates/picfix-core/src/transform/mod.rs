//! Geometric transforms: crop, resize, quarter-turn rotation and flip.
//!
//! Every transform takes a raster by reference and returns a new raster;
//! none of them touch history or viewport state.
//!
//! # Coordinate System
//!
//! - Crop rectangles are in raster pixels, origin top-left
//! - Rotation is in quarter turns; clockwise moves the top-left pixel to the
//!   top-right corner
//! - Rotation and flip are exact integer remaps, so they are lossless

mod crop;
mod flip;
mod resize;
mod rotation;

pub use crop::apply_crop;
pub use flip::{apply_flip, FlipAxis};
pub use resize::{halve, resize, FilterType};
pub use rotation::{rotate90, RotateDirection};
