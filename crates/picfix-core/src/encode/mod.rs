//! Image encoding for PicFix.
//!
//! This module provides functionality for:
//! - Encoding a raster to PNG, JPEG or BMP
//! - Picking the output format from a file extension
//! - Writing the encoded bytes to disk
//!
//! # Examples
//!
//! ```ignore
//! use picfix_core::encode::{encode_image, OutputFormat};
//! use picfix_core::Raster;
//!
//! let raster = Raster::filled(100, 100, [128, 128, 128, 255]);
//! let png = encode_image(&raster, OutputFormat::Png, 90).unwrap();
//! println!("Encoded {} bytes", png.len());
//! ```

mod writer;

pub use writer::{encode_image, save_image, EncodeError, OutputFormat};
