//! Image decoding for element materialization.
//!
//! The design tool accepts user imports as PNG or JPEG bytes and the crop
//! pipeline re-materializes cropped regions from encoded data, so this
//! module covers exactly those two formats. Anything else is rejected
//! before a decoder runs.

use thiserror::Error;

use crate::raster::Raster;

/// Errors decoding encoded image bytes.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The byte stream is not a recognized or supported image format.
    #[error("invalid or unsupported image format")]
    InvalidFormat,

    /// The byte stream identified as a known format but failed to decode.
    #[error("corrupted or incomplete image data: {0}")]
    CorruptedData(String),

    /// The decoded dimensions are not usable.
    #[error("decoded image has invalid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Decode PNG or JPEG bytes into an RGBA raster.
///
/// The format is sniffed from the magic bytes; formats other than PNG and
/// JPEG fail with [`DecodeError::InvalidFormat`] without attempting a
/// decode.
pub fn decode_image(bytes: &[u8]) -> Result<Raster, DecodeError> {
    let format = image::guess_format(bytes).map_err(|_| DecodeError::InvalidFormat)?;
    if !matches!(format, image::ImageFormat::Png | image::ImageFormat::Jpeg) {
        return Err(DecodeError::InvalidFormat);
    }

    let dynamic = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| DecodeError::CorruptedData(e.to_string()))?;

    let rgba = dynamic.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    Ok(Raster::from_rgba_image(rgba))
}
