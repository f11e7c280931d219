//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode a JPEG, PNG or WebP upload into a bitmap
//! - [`read_image_info`] - Dimensions, size and sniffed format without a full decode
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, read_image_info } from '@pixeloptimize/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const info = read_image_info(bytes);
//! const bitmap = decode_image(bytes, file.type);
//! console.log(`${info.width}x${info.height}, ${info.megapixels.toFixed(2)} MP`);
//! ```

use crate::types::{JsBitmap, JsImageInfo};
use pixeloptimize_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an uploaded file.
///
/// # Arguments
///
/// * `bytes` - The file contents as a `Uint8Array`
/// * `mime` - The file's declared type (`File.type`); pass an empty string if unknown
///
/// # Errors
///
/// Returns an error if the declared type is not `image/*`, or the bytes are
/// not a valid JPEG, PNG or WebP image.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8], mime: &str) -> Result<JsBitmap, JsValue> {
    let result = if mime.is_empty() {
        decode::decode_image(bytes)
    } else {
        decode::decode_image_with_hint(bytes, mime)
    };
    result
        .map(JsBitmap::from_bitmap)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Read dimensions, byte size and format without decoding pixels.
#[wasm_bindgen]
pub fn read_image_info(bytes: &[u8]) -> Result<JsImageInfo, JsValue> {
    decode::read_info(bytes)
        .map(JsImageInfo::from_info)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
