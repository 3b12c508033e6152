//! Raster decoding with EXIF orientation handling.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::DynamicImage;
use image::ImageReader;
use tracing::{debug, trace};

use super::{DecodeError, Orientation};
use crate::raster::Raster;
use crate::transform::{apply_flip, rotate90, RotateDirection};

/// Decode an image from bytes, applying EXIF orientation correction.
///
/// The format is guessed from the content (PNG, JPEG and BMP are enabled).
/// Whatever the source layout, the result is normalized to RGBA8.
///
/// # Errors
///
/// Returns `DecodeError::CorruptedFile` if the bytes cannot be decoded.
pub fn decode_image(bytes: &[u8]) -> Result<Raster, DecodeError> {
    let orientation = extract_orientation(bytes);
    let raster = decode_image_no_orientation(bytes)?;
    Ok(apply_orientation(raster, orientation))
}

/// Decode an image from bytes without applying EXIF orientation.
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<Raster, DecodeError> {
    let img = decode_dynamic(bytes)?;
    Ok(Raster::from_rgba_image(img.into_rgba8()))
}

/// Read and decode an image file.
///
/// # Errors
///
/// Returns `DecodeError::IoError` if the file cannot be read, otherwise the
/// errors of [`decode_image`].
pub fn load_image(path: impl AsRef<Path>) -> Result<Raster, DecodeError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| DecodeError::IoError(e.to_string()))?;
    debug!(path = %path.display(), bytes = bytes.len(), "Decoding image file");
    decode_image(&bytes)
}

fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    trace!(width = img.width(), height = img.height(), "decode");
    Ok(img)
}

/// EXIF orientation of the bytes, `Normal` when there is no readable tag.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map(Orientation::from_exif)
        .unwrap_or_default()
}

/// Turn and mirror a raster so it displays upright.
fn apply_orientation(raster: Raster, orientation: Orientation) -> Raster {
    let (turns, flip) = orientation.correction();
    let turned = match turns {
        1 => rotate90(&raster, RotateDirection::Clockwise),
        2 => rotate90(&rotate90(&raster, RotateDirection::Clockwise), RotateDirection::Clockwise),
        3 => rotate90(&raster, RotateDirection::CounterClockwise),
        _ => raster,
    };
    match flip {
        Some(axis) => apply_flip(&turned, axis),
        None => turned,
    }
}

/// EXIF orientation of encoded image bytes.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}
