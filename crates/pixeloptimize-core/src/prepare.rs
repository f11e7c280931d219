//! Draw stage: scale a bitmap onto a fresh surface of the output size.
//!
//! The surface is a plain RGBA buffer owned by the engine call that created
//! it. It is dropped when that call returns, whether encoding succeeded or
//! not, so there is nothing for callers to release.

use image::RgbaImage;

use crate::decode::{Bitmap, FilterType};
use crate::error::ProcessError;
use crate::format::ImageFormat;

/// Longest edge a surface may have.
pub const MAX_SURFACE_EDGE: u32 = 32_767;

/// Largest pixel count a surface may have (16384 x 16384).
pub const MAX_SURFACE_AREA: u64 = 268_435_456;

/// The drawn, scaled pixels handed to the encoder.
///
/// RGBA, row-major, 4 bytes per pixel. For formats without alpha every pixel
/// is already opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGB bytes with alpha dropped, for encoders without an alpha channel.
    pub fn rgb_pixels(&self) -> Vec<u8> {
        self.pixels
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect()
    }

    pub fn is_opaque(&self) -> bool {
        self.pixels.chunks_exact(4).all(|px| px[3] == u8::MAX)
    }

    /// Reinterpret the surface as a bitmap, e.g. to inspect the drawn result.
    pub fn into_bitmap(self) -> Bitmap {
        Bitmap::new(self.width, self.height, self.pixels)
    }
}

/// Draw `bitmap` into a `width x height` surface for `format`.
///
/// Uses bilinear resampling. See [`prepare_with_filter`].
pub fn prepare(
    bitmap: &Bitmap,
    width: u32,
    height: u32,
    format: ImageFormat,
) -> Result<PixelBuffer, ProcessError> {
    prepare_with_filter(bitmap, width, height, format, FilterType::default())
}

/// Draw `bitmap` into a `width x height` surface for `format`.
///
/// The bitmap is stretched to exactly the requested size; no aspect ratio is
/// preserved. Formats without alpha get an opaque white background first and
/// the bitmap is composited over it. Formats with alpha start transparent, so
/// the drawn alpha is the source alpha unchanged.
///
/// # Errors
///
/// Returns `ProcessError::SurfaceAllocation` for zero or oversized
/// dimensions, and for a source bitmap whose pixel data does not match its
/// declared size.
pub fn prepare_with_filter(
    bitmap: &Bitmap,
    width: u32,
    height: u32,
    format: ImageFormat,
    filter: FilterType,
) -> Result<PixelBuffer, ProcessError> {
    check_surface(width, height)?;

    let surface_error = |reason| ProcessError::SurfaceAllocation {
        width,
        height,
        reason,
    };
    if bitmap.is_empty() {
        return Err(surface_error("source bitmap is empty"));
    }
    if bitmap.view().is_none() {
        return Err(surface_error("source pixel data does not match its dimensions"));
    }

    let mut pixels = bitmap.pixels.clone();
    if (bitmap.width, bitmap.height) == (width, height) {
        if !format.supports_alpha() {
            composite_over_white(&mut pixels);
        }
    } else if !format.supports_alpha() {
        // Compositing commutes with resampling, so flatten first
        composite_over_white(&mut pixels);
        pixels = resample(bitmap, pixels, width, height, filter)
            .ok_or_else(|| surface_error("source pixel data does not match its dimensions"))?;
    } else {
        // Resample premultiplied so transparent pixels carry no color
        premultiply(&mut pixels);
        pixels = resample(bitmap, pixels, width, height, filter)
            .ok_or_else(|| surface_error("source pixel data does not match its dimensions"))?;
        unpremultiply(&mut pixels);
    }

    log::trace!(
        "drew {}x{} source onto {}x{} surface for {}",
        bitmap.width,
        bitmap.height,
        width,
        height,
        format
    );

    Ok(PixelBuffer {
        width,
        height,
        pixels,
    })
}

fn check_surface(width: u32, height: u32) -> Result<(), ProcessError> {
    let reason = if width == 0 || height == 0 {
        "dimensions must be non-zero"
    } else if width > MAX_SURFACE_EDGE || height > MAX_SURFACE_EDGE {
        "edge exceeds maximum surface size"
    } else if u64::from(width) * u64::from(height) > MAX_SURFACE_AREA {
        "area exceeds maximum surface size"
    } else {
        return Ok(());
    };
    Err(ProcessError::SurfaceAllocation {
        width,
        height,
        reason,
    })
}

fn resample(
    source: &Bitmap,
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Option<Vec<u8>> {
    let staged = RgbaImage::from_raw(source.width, source.height, pixels)?;
    Some(image::imageops::resize(&staged, width, height, filter.to_image_filter()).into_raw())
}

fn premultiply(pixels: &mut [u8]) {
    for px in pixels.chunks_exact_mut(4) {
        let alpha = u32::from(px[3]);
        for channel in &mut px[..3] {
            *channel = ((u32::from(*channel) * alpha + 127) / 255) as u8;
        }
    }
}

fn unpremultiply(pixels: &mut [u8]) {
    for px in pixels.chunks_exact_mut(4) {
        let alpha = u32::from(px[3]);
        if alpha == 0 {
            px[..3].fill(0);
            continue;
        }
        for channel in &mut px[..3] {
            let straight = (u32::from(*channel) * 255 + alpha / 2) / alpha;
            *channel = straight.min(255) as u8;
        }
    }
}

/// Source-over composite onto opaque white, in place.
fn composite_over_white(pixels: &mut [u8]) {
    for px in pixels.chunks_exact_mut(4) {
        let alpha = u32::from(px[3]);
        for channel in &mut px[..3] {
            let blended = u32::from(*channel) * alpha + 255 * (255 - alpha);
            *channel = ((blended + 127) / 255) as u8;
        }
        px[3] = u8::MAX;
    }
}
