//! Display helpers for the tool pages.

use crate::types::format_from_mime;
use pixeloptimize_core::{dimensions, download, size};
use wasm_bindgen::prelude::*;

/// Format a byte count, e.g. `1536` as `"1.5 KB"`.
///
/// `decimals` defaults to 2.
#[wasm_bindgen]
pub fn format_bytes(bytes: f64, decimals: Option<i32>) -> String {
    size::format_bytes_with_decimals(js_count(bytes), decimals.unwrap_or(2))
}

/// Rounded percentage saved; negative when the output grew.
#[wasm_bindgen]
pub fn size_change_percent(original: f64, processed: f64) -> f64 {
    size::size_change_percent(js_count(original), js_count(processed)) as f64
}

/// Height matching `width` for a width/height ratio, for locked-aspect inputs.
#[wasm_bindgen]
pub fn height_for_width(width: u32, ratio: f64) -> u32 {
    dimensions::height_for_width(width, ratio)
}

/// Width matching `height` for a width/height ratio.
#[wasm_bindgen]
pub fn width_for_height(height: u32, ratio: f64) -> u32 {
    dimensions::width_for_height(height, ratio)
}

#[wasm_bindgen]
pub fn aspect_ratio(width: u32, height: u32) -> f64 {
    dimensions::aspect_ratio(width, height)
}

/// Name for the download link, e.g. `compressed_photo.webp`.
#[wasm_bindgen]
pub fn download_filename(
    prefix: &str,
    original_name: Option<String>,
    mime: &str,
) -> Result<String, JsValue> {
    let format = format_from_mime(mime).map_err(|e| JsValue::from_str(&e))?;
    Ok(download::download_filename(
        prefix,
        original_name.as_deref(),
        format,
    ))
}

/// JS numbers to byte counts; NaN and negatives count as zero.
fn js_count(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value as u64
    } else {
        0
    }
}
