//! Image decoding for PicFix.
//!
//! This module provides functionality for:
//! - Decoding PNG, JPEG and BMP images (anything the `image` crate can guess)
//! - Applying EXIF orientation so the raster is upright
//! - Normalizing every source layout (gray, 16-bit, palette, RGB) to RGBA8
//!
//! Decoding is synchronous; a failure never touches the caller's state.
//!
//! # Examples
//!
//! ```ignore
//! use picfix_core::decode::load_image;
//!
//! let raster = load_image("photo.jpg").unwrap();
//! println!("Decoded {}x{} image", raster.width, raster.height);
//! ```

mod reader;
mod types;

pub use reader::{decode_image, decode_image_no_orientation, get_orientation, load_image};
pub use types::{DecodeError, Orientation};
