//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core types,
//! handling the conversion between Rust and JavaScript data representations.

use pixeloptimize_core::decode::{Bitmap, FilterType, ImageInfo};
use pixeloptimize_core::ImageFormat;
use wasm_bindgen::prelude::*;

/// A decoded bitmap wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`. Keep the bitmap in WASM memory across
/// repeated `process` calls instead of round-tripping the pixels.
///
/// The `free()` method can be called to explicitly release WASM memory, but this is
/// optional as wasm-bindgen's finalizer will handle cleanup automatically.
#[wasm_bindgen]
pub struct JsBitmap {
    inner: Bitmap,
}

#[wasm_bindgen]
impl JsBitmap {
    /// Create a new JsBitmap from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order),
    ///   e.g. `ImageData.data` from a canvas
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsBitmap {
        JsBitmap {
            inner: Bitmap {
                width,
                height,
                pixels,
            },
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.byte_size()
    }

    /// Whether any pixel is not fully opaque.
    #[wasm_bindgen(getter)]
    pub fn has_transparency(&self) -> bool {
        self.inner.has_transparency()
    }

    /// Returns RGBA pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsBitmap {
    pub(crate) fn from_bitmap(inner: Bitmap) -> Self {
        Self { inner }
    }

    pub(crate) fn as_bitmap(&self) -> &Bitmap {
        &self.inner
    }
}

/// Dimensions and size of an uploaded file, for the size checker.
#[wasm_bindgen]
pub struct JsImageInfo {
    inner: ImageInfo,
}

#[wasm_bindgen]
impl JsImageInfo {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Size of the uploaded file in bytes.
    #[wasm_bindgen(getter)]
    pub fn byte_size(&self) -> f64 {
        self.inner.byte_size as f64
    }

    /// MIME type sniffed from the file contents.
    #[wasm_bindgen(getter)]
    pub fn format(&self) -> String {
        self.inner.format.mime_type().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn megapixels(&self) -> f64 {
        self.inner.megapixels()
    }

    /// `"Landscape"` or `"Portrait"`.
    #[wasm_bindgen(getter)]
    pub fn orientation(&self) -> String {
        format!("{:?}", self.inner.orientation())
    }

    /// e.g. `"1.50:1"`
    #[wasm_bindgen(getter)]
    pub fn aspect_ratio_label(&self) -> String {
        self.inner.aspect_ratio_label()
    }
}

impl JsImageInfo {
    pub(crate) fn from_info(inner: ImageInfo) -> Self {
        Self { inner }
    }
}

/// Convert a u8 filter type value to the core FilterType enum.
///
/// Values:
/// - 0 = Nearest (fastest, lowest quality)
/// - 1 = Bilinear (good balance of speed and quality)
/// - 2 = Lanczos3 (best quality, slowest)
///
/// Any other value defaults to Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear, // Default
    }
}

/// Parse a MIME string coming from JavaScript.
pub(crate) fn format_from_mime(mime: &str) -> Result<ImageFormat, String> {
    ImageFormat::from_mime(mime).ok_or_else(|| format!("Unsupported output format: {mime}"))
}
