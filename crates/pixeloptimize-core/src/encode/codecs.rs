//! Concrete encoders backing the default [`EncodePrimitive`].
//!
//! PNG goes through the `image` crate and JPEG through `jpeg-encoder`, which
//! can subsample chroma. WebP goes through `libwebp`
//! (via the `webp` crate) because the `image` crate only writes lossless
//! WebP, which has no quality knob to search over.

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;

use super::EncodePrimitive;
use crate::format::ImageFormat;
use crate::prepare::PixelBuffer;

/// Errors that can occur while encoding a pixel buffer.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The encoder rejected the input or failed internally
    #[error("{format} encoding failed: {reason}")]
    EncodingFailed { format: ImageFormat, reason: String },
}

/// The built-in encoders.
///
/// Deterministic: the same buffer, format and quality always produce the
/// same bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Codecs;

impl EncodePrimitive for Codecs {
    fn encode(
        &self,
        buffer: &PixelBuffer,
        format: ImageFormat,
        quality: Option<f32>,
    ) -> Result<Vec<u8>, EncodeError> {
        let quality = quality.unwrap_or(super::DEFAULT_QUALITY_UNIT);
        match format {
            ImageFormat::Jpeg => encode_jpeg(
                &buffer.rgb_pixels(),
                buffer.width(),
                buffer.height(),
                jpeg_quality(quality),
            ),
            ImageFormat::Png => encode_png(buffer.pixels(), buffer.width(), buffer.height()),
            ImageFormat::Webp => {
                encode_webp(buffer.pixels(), buffer.width(), buffer.height(), quality)
            }
        }
    }
}

/// Map a continuous quality in [0, 1] onto the JPEG 1-100 scale.
fn jpeg_quality(quality: f32) -> u8 {
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

fn check_input(
    pixels: &[u8],
    width: u32,
    height: u32,
    bytes_per_pixel: usize,
) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = width as usize * height as usize * bytes_per_pixel;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

/// Encode RGB pixel data (3 bytes per pixel) to baseline JPEG.
///
/// `quality` is clamped to 1-100. Chroma is subsampled 4:2:0, as browsers
/// do for `canvas.toBlob("image/jpeg")`.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    check_input(pixels, width, height, 3)?;
    let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
        return Err(EncodeError::InvalidDimensions { width, height });
    };

    let mut buffer = Vec::new();
    let mut encoder = jpeg_encoder::Encoder::new(&mut buffer, quality.clamp(1, 100));
    encoder.set_sampling_factor(jpeg_encoder::SamplingFactor::R_4_2_0);
    encoder
        .encode(pixels, w, h, jpeg_encoder::ColorType::Rgb)
        .map_err(|e| EncodeError::EncodingFailed {
            format: ImageFormat::Jpeg,
            reason: e.to_string(),
        })?;

    Ok(buffer)
}

/// Encode RGBA pixel data (4 bytes per pixel) to lossless PNG.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    check_input(pixels, width, height, 4)?;

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: ImageFormat::Png,
            reason: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}

/// Encode RGBA pixel data (4 bytes per pixel) to lossy WebP.
///
/// `quality` is in [0, 1] and clamped. Alpha is stored losslessly.
pub fn encode_webp(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: f32,
) -> Result<Vec<u8>, EncodeError> {
    check_input(pixels, width, height, 4)?;

    let quality = (quality * 100.0).clamp(0.0, 100.0);
    let encoded = webp::Encoder::from_rgba(pixels, width, height)
        .encode_simple(false, quality)
        .map_err(|e| EncodeError::EncodingFailed {
            format: ImageFormat::Webp,
            reason: format!("{e:?}"),
        })?;

    Ok(encoded.to_vec())
}
