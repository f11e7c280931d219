//! Decoding uploaded file bytes into a [`Bitmap`].
//!
//! The container is sniffed from the leading bytes rather than trusted from
//! a file name, and only the formats the engine can also write are accepted.

use std::io::Cursor;

use image::ImageReader;

use super::{Bitmap, DecodeError, ImageInfo};
use crate::format::ImageFormat;

/// Decode JPEG, PNG or WebP bytes into RGBA pixels.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes carry no known signature,
/// `DecodeError::UnsupportedFormat` for recognized but unsupported containers,
/// and `DecodeError::CorruptedFile` if the decoder fails part way.
pub fn decode_image(bytes: &[u8]) -> Result<Bitmap, DecodeError> {
    let format = sniff_format(bytes)?;

    let img = ImageReader::with_format(Cursor::new(bytes), format.to_image_format())
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let bitmap = Bitmap::from_rgba_image(img.into_rgba8());
    log::trace!(
        "decoded {} as {}x{}",
        format,
        bitmap.width,
        bitmap.height
    );
    Ok(bitmap)
}

/// Decode bytes that arrived with a declared MIME type (e.g. a browser `File`).
///
/// Anything outside `image/*` is rejected before the bytes are inspected.
/// The declared subtype is otherwise ignored in favour of sniffing.
pub fn decode_image_with_hint(bytes: &[u8], mime: &str) -> Result<Bitmap, DecodeError> {
    if !mime.trim().to_ascii_lowercase().starts_with("image/") {
        return Err(DecodeError::NotAnImage(mime.to_string()));
    }
    decode_image(bytes)
}

/// Identify the container format from the file signature.
pub fn sniff_format(bytes: &[u8]) -> Result<ImageFormat, DecodeError> {
    let guessed = image::guess_format(bytes).map_err(|_| DecodeError::InvalidFormat)?;
    ImageFormat::from_image_format(guessed)
        .ok_or_else(|| DecodeError::UnsupportedFormat(format!("{guessed:?}")))
}

/// Read dimensions and format without decoding pixel data.
pub fn read_info(bytes: &[u8]) -> Result<ImageInfo, DecodeError> {
    let format = sniff_format(bytes)?;

    let (width, height) = ImageReader::with_format(Cursor::new(bytes), format.to_image_format())
        .into_dimensions()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    Ok(ImageInfo {
        width,
        height,
        byte_size: bytes.len() as u64,
        format,
    })
}
