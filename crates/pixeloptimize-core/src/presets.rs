//! Ready-made constraint sets for the product's tools.
//!
//! Each tool (compressor, converter, resizer, size checker) is a thin
//! wrapper that builds [`Constraints`] and calls [`Engine::process`].

use crate::decode::Bitmap;
use crate::encode::EncodePrimitive;
use crate::engine::{Constraints, Engine, ProcessingResult};
use crate::error::ProcessError;
use crate::format::ImageFormat;
use crate::handle::HandleAllocator;

/// Quality used for the size checker's WebP estimate.
pub const SAVINGS_ESTIMATE_QUALITY: u8 = 75;

/// Starting format for the quality tool.
///
/// PNG has no quality knob, so PNG sources start on WebP.
pub fn initial_quality_format(source: ImageFormat) -> ImageFormat {
    match source {
        ImageFormat::Png => ImageFormat::Webp,
        ImageFormat::Jpeg | ImageFormat::Webp => source,
    }
}

impl<E: EncodePrimitive, A: HandleAllocator> Engine<E, A> {
    /// Shrink to at most `target_kb` KiB, best effort.
    pub fn compress(
        &self,
        bitmap: &Bitmap,
        target_kb: f64,
        format: ImageFormat,
    ) -> Result<ProcessingResult<A::Handle>, ProcessError> {
        let constraints = Constraints::new()
            .with_format(format)
            .with_target_size_kb(target_kb);
        self.process(bitmap, &constraints)
    }

    /// Re-encode in another format, optionally under a byte budget.
    pub fn convert(
        &self,
        bitmap: &Bitmap,
        format: ImageFormat,
        quality: u8,
        target_kb: Option<f64>,
    ) -> Result<ProcessingResult<A::Handle>, ProcessError> {
        let constraints = Constraints {
            target_size_kb: target_kb,
            ..Constraints::new().with_format(format).with_quality(quality)
        };
        self.process(bitmap, &constraints)
    }

    /// Scale to `width x height` exactly.
    pub fn resize(
        &self,
        bitmap: &Bitmap,
        width: u32,
        height: u32,
        format: ImageFormat,
        quality: u8,
    ) -> Result<ProcessingResult<A::Handle>, ProcessError> {
        let constraints = Constraints::new()
            .with_format(format)
            .with_quality(quality)
            .with_dimensions(width, height);
        self.process(bitmap, &constraints)
    }

    /// Estimate what a WebP conversion would weigh.
    pub fn simulate_webp_savings(
        &self,
        bitmap: &Bitmap,
    ) -> Result<ProcessingResult<A::Handle>, ProcessError> {
        let constraints = Constraints::new()
            .with_format(ImageFormat::Webp)
            .with_quality(SAVINGS_ESTIMATE_QUALITY);
        self.process(bitmap, &constraints)
    }
}
