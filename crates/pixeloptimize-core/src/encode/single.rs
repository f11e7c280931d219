//! Single-pass encoding at a requested quality.

use super::{EncodeError, EncodePrimitive};
use crate::format::ImageFormat;
use crate::prepare::PixelBuffer;

/// Quality percentage used when the caller gives none.
pub const DEFAULT_QUALITY: u8 = 85;

/// Bytes produced by one encode and the quality they were produced at.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    /// Continuous quality in [0, 1]; `None` for PNG.
    pub quality: Option<f32>,
}

/// Encode `buffer` once.
///
/// For PNG the quality is never forwarded, whatever the caller passed. For
/// lossy formats `quality` is a percentage (values above 100 are treated as
/// 100) and defaults to [`DEFAULT_QUALITY`].
///
/// # Errors
///
/// Propagates the primitive's error unchanged. There is no retry.
pub fn encode_single<E: EncodePrimitive + ?Sized>(
    encoder: &E,
    buffer: &PixelBuffer,
    format: ImageFormat,
    quality: Option<u8>,
) -> Result<Encoded, EncodeError> {
    let quality = match format {
        ImageFormat::Png => None,
        ImageFormat::Jpeg | ImageFormat::Webp => {
            let percent = quality.unwrap_or(DEFAULT_QUALITY).min(100);
            Some(f32::from(percent) / 100.0)
        }
    };

    let bytes = encoder.encode(buffer, format, quality)?;
    log::debug!(
        "single-pass {} encode at {:?}: {} bytes",
        format,
        quality,
        bytes.len()
    );

    Ok(Encoded { bytes, quality })
}
