//! PixelOptimize WASM - WebAssembly bindings for PixelOptimize
//!
//! This crate provides WASM bindings to expose the pixeloptimize-core engine
//! to the browser, so images are re-encoded without leaving the device.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for bitmaps and file info
//! - `decode` - Decoding uploads into bitmaps
//! - `process` - The re-encoding engine and the per-tool presets
//! - `result` - Processing results and their object URLs
//! - `util` - Byte-size, aspect-ratio and file-name helpers
//! - `logging` - Console logging
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, process, JsResultSlot } from '@pixeloptimize/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const bitmap = decode_image(bytes, file.type);
//!
//! const slot = new JsResultSlot();
//! const result = process(bitmap, { format: 'image/webp', quality: 80 });
//! preview.src = result.url;
//! slot.install(result);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod logging;
mod process;
mod result;
mod types;
mod util;

// Re-export public types
pub use decode::{decode_image, read_image_info};
pub use logging::init_logging;
pub use process::{
    compress, convert, initial_quality_format, process, process_with_filter, resize_image,
    simulate_webp_savings,
};
pub use result::{JsProcessingResult, JsResultSlot, ObjectUrl, ObjectUrls};
pub use types::{JsBitmap, JsImageInfo};
pub use util::{
    aspect_ratio, download_filename, format_bytes, height_for_width, size_change_percent,
    width_for_height,
};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    init_logging(false);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
