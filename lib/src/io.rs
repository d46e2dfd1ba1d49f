//! Image source and sink backed by the `image` crate
//!
//! Decode and encode failures come back as `image::ImageError` exactly as the
//! codec reported them.

use crate::buffer::{PixelBuffer, RGBA_CHANNELS};
use image::error::{ImageError, ImageResult, ParameterError, ParameterErrorKind};
use image::{ExtendedColorType, ImageFormat, ImageReader};
use log::info;
use std::path::Path;

/// Decode an image file into an RGBA buffer
///
/// Any format the `image` crate can read is accepted; the pixels are
/// converted to 8-bit RGBA. The format is sniffed from the file contents,
/// so the extension does not matter.
pub fn load_image<P: AsRef<Path>>(path: P) -> ImageResult<PixelBuffer> {
    let path = path.as_ref();
    info!("Loading {}", path.display());
    let img = ImageReader::open(path)?
        .with_guessed_format()?
        .decode()?
        .to_rgba8();
    Ok(PixelBuffer::from(img))
}

/// Encode a buffer to a file, picking the format from the extension
///
/// A missing or unrecognised extension writes PNG. Only four-channel
/// buffers can be written.
pub fn save_image<P: AsRef<Path>>(path: P, buffer: &PixelBuffer) -> ImageResult<()> {
    let path = path.as_ref();
    info!("Saving {}", path.display());
    if buffer.channels() != RGBA_CHANNELS {
        return Err(dimension_mismatch());
    }
    let width = u32::try_from(buffer.width()).map_err(|_| dimension_mismatch())?;
    let height = u32::try_from(buffer.height()).map_err(|_| dimension_mismatch())?;
    let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Png);
    image::save_buffer_with_format(
        path,
        buffer.as_slice(),
        width,
        height,
        ExtendedColorType::Rgba8,
        format,
    )
}

fn dimension_mismatch() -> ImageError {
    ImageError::Parameter(ParameterError::from_kind(
        ParameterErrorKind::DimensionMismatch,
    ))
}
