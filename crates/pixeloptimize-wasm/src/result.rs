//! Processing results and their object URLs.
//!
//! Every successful `process` call creates one object URL for its bytes.
//! JavaScript must give it back, either by calling `release()` on the result
//! or by keeping results in a [`JsResultSlot`], which revokes the previous
//! URL whenever a new result is installed.
//!
//! # Example
//!
//! ```typescript
//! const slot = new JsResultSlot();
//!
//! async function onSettingsChange(constraints) {
//!   const result = process(bitmap, constraints);
//!   preview.src = result.url;
//!   slot.install(result); // revokes the previous preview URL
//! }
//!
//! // On unmount
//! slot.clear();
//! ```

use pixeloptimize_core::{DisplayHandle, HandleAllocator, HandleError, ImageFormat};
use pixeloptimize_core::{ProcessingResult, ResultSlot};
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, Url};

/// An object URL created with `URL.createObjectURL`.
#[derive(Debug)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl DisplayHandle for ObjectUrl {
    fn release(self) {
        if let Err(e) = Url::revoke_object_url(&self.0) {
            log::warn!("failed to revoke {}: {:?}", self.0, e);
        }
    }
}

/// Wraps encoded bytes in a typed `Blob` and hands out its object URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectUrls;

impl HandleAllocator for ObjectUrls {
    type Handle = ObjectUrl;

    fn allocate(&self, bytes: &[u8], format: ImageFormat) -> Result<ObjectUrl, HandleError> {
        let parts = js_sys::Array::of1(&JsValue::from(js_sys::Uint8Array::from(bytes)));
        let options = BlobPropertyBag::new();
        options.set_type(format.mime_type());

        let blob =
            Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)?;
        Url::create_object_url_with_blob(&blob)
            .map(ObjectUrl)
            .map_err(js_error)
    }
}

fn js_error(value: JsValue) -> HandleError {
    HandleError(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

/// The output of one engine call.
#[wasm_bindgen]
pub struct JsProcessingResult {
    inner: ProcessingResult<ObjectUrl>,
}

#[wasm_bindgen]
impl JsProcessingResult {
    /// Encoded size in bytes.
    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.inner.size()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// MIME type of the bytes. May differ from the requested format when a
    /// PNG request had a size target.
    #[wasm_bindgen(getter)]
    pub fn format(&self) -> String {
        self.inner.format().mime_type().to_string()
    }

    /// File extension for downloads, without the dot.
    #[wasm_bindgen(getter)]
    pub fn extension(&self) -> String {
        self.inner.format().extension().to_string()
    }

    /// Quality in [0, 1] the bytes were encoded at; undefined for PNG.
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> Option<f32> {
        self.inner.quality()
    }

    /// Whether the size target was met; undefined without a target.
    #[wasm_bindgen(getter)]
    pub fn target_met(&self) -> Option<bool> {
        self.inner.target_met()
    }

    /// Object URL for previews and download links; undefined once released.
    #[wasm_bindgen(getter)]
    pub fn url(&self) -> Option<String> {
        self.inner.handle().map(|url| url.as_str().to_string())
    }

    #[wasm_bindgen(getter)]
    pub fn released(&self) -> bool {
        self.inner.is_released()
    }

    /// Copy of the encoded bytes.
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes().to_vec()
    }

    /// Revoke the object URL. Safe to call more than once.
    pub fn release(&mut self) {
        self.inner.release();
    }
}

impl JsProcessingResult {
    pub(crate) fn from_result(inner: ProcessingResult<ObjectUrl>) -> Self {
        Self { inner }
    }
}

/// Holds the result currently on screen and revokes it when replaced.
#[wasm_bindgen]
pub struct JsResultSlot {
    inner: ResultSlot<ObjectUrl>,
}

#[wasm_bindgen]
impl JsResultSlot {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsResultSlot {
        JsResultSlot {
            inner: ResultSlot::new(),
        }
    }

    /// Take ownership of `result`, revoking the previous result's URL.
    ///
    /// The JS `result` object is consumed and must not be used afterwards;
    /// read everything through the slot instead.
    pub fn install(&mut self, result: JsProcessingResult) {
        self.inner.install(result.inner);
    }

    #[wasm_bindgen(getter)]
    pub fn has_result(&self) -> bool {
        !self.inner.is_empty()
    }

    #[wasm_bindgen(getter)]
    pub fn url(&self) -> Option<String> {
        self.inner
            .current()
            .and_then(|result| result.handle())
            .map(|url| url.as_str().to_string())
    }

    #[wasm_bindgen(getter)]
    pub fn size(&self) -> Option<usize> {
        self.inner.current().map(|result| result.size())
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> Option<u32> {
        self.inner.current().map(|result| result.width())
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> Option<u32> {
        self.inner.current().map(|result| result.height())
    }

    #[wasm_bindgen(getter)]
    pub fn format(&self) -> Option<String> {
        self.inner
            .current()
            .map(|result| result.format().mime_type().to_string())
    }

    pub fn bytes(&self) -> Option<Vec<u8>> {
        self.inner.current().map(|result| result.bytes().to_vec())
    }

    /// Revoke and drop the current result.
    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

impl Default for JsResultSlot {
    fn default() -> Self {
        Self::new()
    }
}
