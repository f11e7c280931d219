//! Re-encoding WASM bindings.
//!
//! # Functions
//!
//! - [`process`] - Re-encode a bitmap under a set of constraints
//! - [`process_with_filter`] - Same, with an explicit resampling filter
//! - [`compress`] - Shrink to a byte budget
//! - [`convert`] - Switch output format
//! - [`resize_image`] - Scale to exact dimensions
//! - [`simulate_webp_savings`] - Estimate the size of a WebP conversion
//! - [`initial_quality_format`] - Default output format for an upload
//!
//! # Example
//!
//! ```typescript
//! import { process } from '@pixeloptimize/wasm';
//!
//! const result = process(bitmap, { format: 'image/webp', targetSizeKB: 200 });
//! console.log(`${result.size} bytes at q=${result.quality}, met=${result.target_met}`);
//! preview.src = result.url;
//! ```

use crate::result::{JsProcessingResult, ObjectUrls};
use crate::types::{filter_from_u8, format_from_mime, JsBitmap};
use pixeloptimize_core::encode::Codecs;
use pixeloptimize_core::{presets, Constraints, Engine, ProcessError, ProcessingResult};
use wasm_bindgen::prelude::*;

fn engine() -> Engine<Codecs, ObjectUrls> {
    Engine::with_parts(Codecs, ObjectUrls)
}

fn to_js(
    result: Result<ProcessingResult<crate::result::ObjectUrl>, ProcessError>,
) -> Result<JsProcessingResult, JsValue> {
    result
        .map(JsProcessingResult::from_result)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Read a constraints object (`{ format, quality, width, height, targetSizeKB }`).
///
/// `undefined` and `null` mean "no constraints".
fn parse_constraints(value: JsValue) -> Result<Constraints, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(Constraints::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid constraints: {e}")))
}

fn parse_format(mime: &str) -> Result<pixeloptimize_core::ImageFormat, JsValue> {
    format_from_mime(mime).map_err(|e| JsValue::from_str(&e))
}

/// Re-encode a bitmap.
///
/// # Arguments
///
/// * `bitmap` - The decoded source image
/// * `constraints` - Plain object; every field is optional
///
/// # Errors
///
/// Returns an error for invalid constraints, zero or oversized dimensions,
/// or if encoding fails.
#[wasm_bindgen]
pub fn process(bitmap: &JsBitmap, constraints: JsValue) -> Result<JsProcessingResult, JsValue> {
    let constraints = parse_constraints(constraints)?;
    to_js(engine().process(bitmap.as_bitmap(), &constraints))
}

/// Re-encode with a specific resampling filter.
///
/// * `filter` - 0 = Nearest, 1 = Bilinear, 2 = Lanczos3
#[wasm_bindgen]
pub fn process_with_filter(
    bitmap: &JsBitmap,
    constraints: JsValue,
    filter: u8,
) -> Result<JsProcessingResult, JsValue> {
    let constraints = parse_constraints(constraints)?;
    to_js(
        engine()
            .with_filter(filter_from_u8(filter))
            .process(bitmap.as_bitmap(), &constraints),
    )
}

/// Shrink to at most `target_kb` KiB.
#[wasm_bindgen]
pub fn compress(
    bitmap: &JsBitmap,
    target_kb: f64,
    format: &str,
) -> Result<JsProcessingResult, JsValue> {
    let format = parse_format(format)?;
    to_js(engine().compress(bitmap.as_bitmap(), target_kb, format))
}

/// Re-encode in another format at `quality` (0-100).
#[wasm_bindgen]
pub fn convert(
    bitmap: &JsBitmap,
    format: &str,
    quality: u8,
    target_kb: Option<f64>,
) -> Result<JsProcessingResult, JsValue> {
    let format = parse_format(format)?;
    to_js(engine().convert(bitmap.as_bitmap(), format, quality, target_kb))
}

/// Scale to exactly `width x height`.
#[wasm_bindgen]
pub fn resize_image(
    bitmap: &JsBitmap,
    width: u32,
    height: u32,
    format: &str,
    quality: u8,
) -> Result<JsProcessingResult, JsValue> {
    let format = parse_format(format)?;
    to_js(engine().resize(bitmap.as_bitmap(), width, height, format, quality))
}

/// Encode as WebP at quality 75 to show the likely savings.
#[wasm_bindgen]
pub fn simulate_webp_savings(bitmap: &JsBitmap) -> Result<JsProcessingResult, JsValue> {
    to_js(engine().simulate_webp_savings(bitmap.as_bitmap()))
}

/// Output format the quality tool starts with for an upload of type `source`.
#[wasm_bindgen]
pub fn initial_quality_format(source: &str) -> Result<String, JsValue> {
    let source = parse_format(source)?;
    Ok(presets::initial_quality_format(source).mime_type().to_string())
}
