//! The re-encoding engine.
//!
//! [`Engine::process`] draws a bitmap at the requested size, encodes it
//! either once at a fixed quality or through the byte-budget search, and
//! wraps the bytes with a display handle.
//!
//! Calls are independent. The engine keeps no state between them beyond its
//! configuration, and has no way to cancel a call once started; callers that
//! react to slider movement should debounce and run one call at a time.

use serde::{Deserialize, Serialize};

use crate::decode::{Bitmap, FilterType};
use crate::encode::{encode_single, encode_to_target, Codecs, EncodePrimitive};
use crate::error::ProcessError;
use crate::format::ImageFormat;
use crate::handle::{DisplayHandle, HandleAllocator, NoHandle, NoHandles};
use crate::prepare::prepare_with_filter;

/// What the caller wants out of one engine call. Every field is optional.
///
/// Deserializes from the shape a settings form produces, e.g.
/// `{"format": "image/webp", "quality": 75, "targetSizeKB": 200}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Constraints {
    /// Target encoding; JPEG when absent.
    pub format: Option<ImageFormat>,
    /// Quality percentage 0-100; 85 when absent. Ignored for PNG and when a
    /// size target is set.
    pub quality: Option<u8>,
    /// Output width; source width when absent.
    pub width: Option<u32>,
    /// Output height; source height when absent.
    pub height: Option<u32>,
    /// Byte budget in KiB. Switches the engine to the quality search.
    #[serde(rename = "targetSizeKB")]
    pub target_size_kb: Option<f64>,
}

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_target_size_kb(mut self, target_size_kb: f64) -> Self {
        self.target_size_kb = Some(target_size_kb);
        self
    }

    /// The format the caller asked for.
    pub fn requested_format(&self) -> ImageFormat {
        self.format.unwrap_or_default()
    }

    /// The format that will actually be encoded. Differs from
    /// [`requested_format`](Self::requested_format) only for PNG with a
    /// size target, which becomes WebP.
    pub fn effective_format(&self) -> ImageFormat {
        match self.target_size_kb {
            Some(_) => self.requested_format().for_size_target(),
            None => self.requested_format(),
        }
    }

    /// Check value ranges. Dimensions are checked later by the draw stage.
    pub fn validate(&self) -> Result<(), ProcessError> {
        if let Some(quality) = self.quality {
            if quality > 100 {
                return Err(ProcessError::InvalidConstraints(format!(
                    "quality must be between 0 and 100, got {quality}"
                )));
            }
        }
        if let Some(kb) = self.target_size_kb {
            if !(kb.is_finite() && kb > 0.0) {
                return Err(ProcessError::InvalidConstraints(format!(
                    "targetSizeKB must be a positive number, got {kb}"
                )));
            }
        }
        Ok(())
    }
}

/// The encoded output of one engine call.
///
/// Holds a display handle that must be given back with
/// [`release`](Self::release) once the result is no longer shown, or
/// handed to a [`ResultSlot`](crate::ResultSlot) that does it.
#[must_use = "the result's display handle must be released"]
#[derive(Debug)]
pub struct ProcessingResult<H = NoHandle> {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
    format: ImageFormat,
    quality: Option<f32>,
    target_met: Option<bool>,
    handle: Option<H>,
}

impl<H: DisplayHandle> ProcessingResult<H> {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Encoded size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Format of the bytes. Can differ from the requested format; see
    /// [`Constraints::effective_format`].
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Continuous quality the bytes were encoded at; `None` for PNG.
    pub fn quality(&self) -> Option<f32> {
        self.quality
    }

    /// Whether the size target was met; `None` when no target was set.
    pub fn target_met(&self) -> Option<bool> {
        self.target_met
    }

    /// The display handle, until released.
    pub fn handle(&self) -> Option<&H> {
        self.handle.as_ref()
    }

    pub fn is_released(&self) -> bool {
        self.handle.is_none()
    }

    /// Give the display handle back. Calling again does nothing.
    pub fn release(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.release();
        }
    }

    /// Release the handle and keep only the bytes.
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.release();
        self.bytes
    }
}

/// The re-encoding engine with a pluggable encoder and handle allocator.
#[derive(Debug, Clone, Default)]
pub struct Engine<E = Codecs, A = NoHandles> {
    encoder: E,
    handles: A,
    filter: FilterType,
}

impl Engine {
    /// Engine backed by the built-in codecs, without display handles.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: EncodePrimitive, A: HandleAllocator> Engine<E, A> {
    pub fn with_parts(encoder: E, handles: A) -> Self {
        Self {
            encoder,
            handles,
            filter: FilterType::default(),
        }
    }

    /// Resampling filter for the draw stage.
    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    pub fn handles(&self) -> &A {
        &self.handles
    }

    /// Re-encode `bitmap` according to `constraints`.
    ///
    /// With `target_size_kb` set, runs the quality search and reports whether
    /// the budget was met; otherwise encodes once. The result's dimensions are
    /// always the requested ones (source dimensions by default).
    ///
    /// # Errors
    ///
    /// - `ProcessError::InvalidConstraints` for out-of-range settings
    /// - `ProcessError::SurfaceAllocation` for zero or oversized dimensions
    /// - `ProcessError::Encode` if the encoder fails
    /// - `ProcessError::Handle` if no display handle can be created
    pub fn process(
        &self,
        bitmap: &Bitmap,
        constraints: &Constraints,
    ) -> Result<ProcessingResult<A::Handle>, ProcessError> {
        constraints.validate()?;

        let width = constraints.width.unwrap_or(bitmap.width);
        let height = constraints.height.unwrap_or(bitmap.height);
        let format = constraints.effective_format();

        let buffer = prepare_with_filter(bitmap, width, height, format, self.filter)?;

        let (bytes, quality, target_met) = match constraints.target_size_kb {
            Some(target_size_kb) => {
                let outcome = encode_to_target(&self.encoder, &buffer, format, target_size_kb)?;
                (outcome.bytes, Some(outcome.quality), Some(outcome.target_met))
            }
            None => {
                let encoded = encode_single(&self.encoder, &buffer, format, constraints.quality)?;
                (encoded.bytes, encoded.quality, None)
            }
        };
        drop(buffer);

        let handle = self.handles.allocate(&bytes, format)?;
        log::debug!(
            "processed {}x{} -> {}x{} {} ({} bytes)",
            bitmap.width,
            bitmap.height,
            width,
            height,
            format,
            bytes.len()
        );

        Ok(ProcessingResult {
            bytes,
            width,
            height,
            format,
            quality,
            target_met,
            handle: Some(handle),
        })
    }
}

/// Run the default engine once.
pub fn process(
    bitmap: &Bitmap,
    constraints: &Constraints,
) -> Result<ProcessingResult, ProcessError> {
    Engine::new().process(bitmap, constraints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_image;
    use crate::encode::testing::{BrokenEncoder, LinearEncoder};
    use crate::handle::testing::{CountingAllocator, FailingAllocator};

    fn gradient(width: u32, height: u32) -> Bitmap {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[
                    (x * 255 / width) as u8,
                    (y * 255 / height) as u8,
                    128,
                    255,
                ]);
            }
        }
        Bitmap::new(width, height, pixels)
    }

    /// Alpha ramps across the image; a few rows are fully transparent.
    fn with_alpha(width: u32, height: u32) -> Bitmap {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let alpha = if y % 10 == 0 { 0 } else { (x * 255 / width) as u8 };
                pixels.extend_from_slice(&[200, 40, (y % 256) as u8, alpha]);
            }
        }
        Bitmap::new(width, height, pixels)
    }

    fn alpha_channel(bitmap: &Bitmap) -> Vec<u8> {
        bitmap.pixels.chunks_exact(4).map(|px| px[3]).collect()
    }

    #[test]
    fn test_constraints_defaults() {
        let constraints = Constraints::default();
        assert_eq!(constraints.requested_format(), ImageFormat::Jpeg);
        assert_eq!(constraints.effective_format(), ImageFormat::Jpeg);
        assert!(constraints.validate().is_ok());
    }

    #[test]
    fn test_constraints_deserialize_from_form_shape() {
        let constraints: Constraints =
            serde_json::from_str(r#"{"format":"image/png","targetSizeKB":20}"#).unwrap();

        assert_eq!(constraints.requested_format(), ImageFormat::Png);
        assert_eq!(constraints.target_size_kb, Some(20.0));
        assert_eq!(constraints.effective_format(), ImageFormat::Webp);
        assert_eq!(constraints.quality, None);
    }

    #[test]
    fn test_constraints_deserialize_empty_object() {
        let constraints: Constraints = serde_json::from_str("{}").unwrap();
        assert_eq!(constraints, Constraints::default());
    }

    #[test]
    fn test_constraints_validation() {
        assert!(Constraints::new().with_quality(100).validate().is_ok());
        assert!(matches!(
            Constraints::new().with_quality(101).validate(),
            Err(ProcessError::InvalidConstraints(_))
        ));
        for kb in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                Constraints::new().with_target_size_kb(kb).validate(),
                Err(ProcessError::InvalidConstraints(_))
            ));
        }
    }

    #[test]
    fn test_scenario_a_jpeg_under_budget() {
        let bitmap = gradient(2000, 1000);
        let constraints = Constraints::new()
            .with_format(ImageFormat::Jpeg)
            .with_target_size_kb(50.0);

        let result = process(&bitmap, &constraints).unwrap();

        assert_eq!(result.format(), ImageFormat::Jpeg);
        assert_eq!((result.width(), result.height()), (2000, 1000));
        assert_eq!(result.target_met(), Some(true));
        assert!(result.size() <= 51_200);
        let quality = result.quality().unwrap();
        assert!((0.01..=0.95).contains(&quality));
    }

    #[test]
    fn test_scenario_b_png_preserves_alpha() {
        let bitmap = with_alpha(500, 500);
        let result = process(&bitmap, &Constraints::new().with_format(ImageFormat::Png)).unwrap();

        assert_eq!(result.format(), ImageFormat::Png);
        assert_eq!(result.quality(), None);
        assert_eq!(result.target_met(), None);

        let decoded = decode_image(result.bytes()).unwrap();
        assert_eq!(decoded, bitmap);
    }

    #[test]
    fn test_scenario_c_png_with_target_becomes_webp() {
        let bitmap = gradient(300, 200);
        let constraints = Constraints::new()
            .with_format(ImageFormat::Png)
            .with_target_size_kb(20.0);

        let result = process(&bitmap, &constraints).unwrap();

        assert_eq!(result.format(), ImageFormat::Webp);
        assert_eq!(&result.bytes()[0..4], b"RIFF");
    }

    #[test]
    fn test_scenario_d_stretches_to_requested_size() {
        let bitmap = gradient(400, 200);
        let result = process(&bitmap, &Constraints::new().with_dimensions(100, 100)).unwrap();

        assert_eq!((result.width(), result.height()), (100, 100));
        let decoded = decode_image(result.bytes()).unwrap();
        assert_eq!((decoded.width, decoded.height), (100, 100));
    }

    #[test]
    fn test_jpeg_output_has_no_transparency() {
        let bitmap = with_alpha(64, 64);
        let result = process(&bitmap, &Constraints::new().with_format(ImageFormat::Jpeg)).unwrap();

        let decoded = decode_image(result.bytes()).unwrap();
        assert!(!decoded.has_transparency());
    }

    #[test]
    fn test_webp_output_preserves_alpha() {
        let bitmap = with_alpha(64, 64);
        let result = process(
            &bitmap,
            &Constraints::new().with_format(ImageFormat::Webp).with_quality(60),
        )
        .unwrap();

        let decoded = decode_image(result.bytes()).unwrap();
        assert_eq!(alpha_channel(&decoded), alpha_channel(&bitmap));
    }

    #[test]
    fn test_default_dimensions_are_source_dimensions() {
        let bitmap = gradient(37, 23);
        let result = process(&bitmap, &Constraints::default()).unwrap();
        assert_eq!((result.width(), result.height()), (37, 23));
    }

    #[test]
    fn test_single_pass_is_deterministic() {
        let bitmap = gradient(64, 48);
        let constraints = Constraints::new().with_format(ImageFormat::Webp).with_quality(70);

        let a = process(&bitmap, &constraints).unwrap();
        let b = process(&bitmap, &constraints).unwrap();
        assert_eq!(a.bytes(), b.bytes());
    }

    #[test]
    fn test_quality_ignored_with_target() {
        let engine = Engine::with_parts(LinearEncoder::new(100, 1000.0), NoHandles);
        let bitmap = gradient(8, 8);
        let constraints = Constraints::new().with_quality(10).with_target_size_kb(10.0);

        let result = engine.process(&bitmap, &constraints).unwrap();

        assert_eq!(engine.encoder().call_count(), 8);
        assert!(!engine.encoder().qualities().contains(&0.1));
        assert_eq!(result.target_met(), Some(true));
    }

    #[test]
    fn test_zero_dimensions_fail_without_allocating_handle() {
        let engine = Engine::with_parts(Codecs, CountingAllocator::default());
        let bitmap = gradient(10, 10);

        let result = engine.process(&bitmap, &Constraints::new().with_dimensions(0, 10));

        assert!(matches!(result, Err(ProcessError::SurfaceAllocation { .. })));
        assert_eq!(*engine.handles().allocated.borrow(), 0);
    }

    #[test]
    fn test_encoder_failure_propagates() {
        let engine = Engine::with_parts(BrokenEncoder, NoHandles);
        let result = engine.process(&gradient(4, 4), &Constraints::default());
        assert!(matches!(result, Err(ProcessError::Encode(_))));

        let result = engine.process(
            &gradient(4, 4),
            &Constraints::new().with_target_size_kb(5.0),
        );
        assert!(matches!(result, Err(ProcessError::Encode(_))));
    }

    #[test]
    fn test_handle_failure_propagates() {
        let engine = Engine::with_parts(Codecs, FailingAllocator);
        let result = engine.process(&gradient(4, 4), &Constraints::default());
        assert!(matches!(result, Err(ProcessError::Handle(_))));
    }

    #[test]
    fn test_one_handle_per_successful_call() {
        let engine = Engine::with_parts(Codecs, CountingAllocator::default());
        let bitmap = gradient(8, 8);

        let mut first = engine.process(&bitmap, &Constraints::default()).unwrap();
        assert_eq!(*engine.handles().allocated.borrow(), 1);

        let second = engine.process(&bitmap, &Constraints::default()).unwrap();
        assert_eq!(*engine.handles().allocated.borrow(), 2);

        // The engine never releases on its own
        assert!(engine.handles().released.borrow().is_empty());

        first.release();
        assert!(first.is_released());
        let _ = second.into_bytes();
        assert_eq!(*engine.handles().released.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_filter_choice_keeps_dimensions() {
        let engine = Engine::new().with_filter(FilterType::Nearest);
        let result = engine
            .process(&gradient(50, 50), &Constraints::new().with_dimensions(20, 30))
            .unwrap();
        assert_eq!((result.width(), result.height()), (20, 30));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
