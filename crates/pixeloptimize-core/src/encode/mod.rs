//! Encoding stage for PixelOptimize.
//!
//! This module provides:
//! - [`EncodePrimitive`], the single-quality encoder the engine drives
//! - [`encode_single`], one deterministic encode at a requested quality
//! - [`encode_to_target`], the bounded quality search against a byte budget
//!
//! # Architecture
//!
//! The primitive is a black box: a pixel buffer, a format and a continuous
//! quality in [0, 1] go in, bytes come out. Everything above it (defaults,
//! the PNG rules, the search) lives here so that a platform encoder or a test
//! double can be swapped in without touching the policy.
//!
//! # Examples
//!
//! ```ignore
//! use pixeloptimize_core::encode::{encode_to_target, Codecs};
//!
//! let outcome = encode_to_target(&Codecs, &buffer, ImageFormat::Jpeg, 50.0).unwrap();
//! println!("{} bytes at q={}", outcome.bytes.len(), outcome.quality);
//! ```

mod codecs;
mod search;
mod single;

pub use codecs::{encode_jpeg, encode_png, encode_webp, Codecs, EncodeError};
pub use search::{
    encode_to_target, Probe, SearchOutcome, QUALITY_CEILING, QUALITY_FLOOR, SEARCH_ITERATIONS,
};
pub use single::{encode_single, Encoded, DEFAULT_QUALITY};

use crate::format::ImageFormat;
use crate::prepare::PixelBuffer;

/// Continuous form of [`DEFAULT_QUALITY`].
pub const DEFAULT_QUALITY_UNIT: f32 = 0.85;

/// A synchronous single-quality encoder.
///
/// `quality` is `None` for formats without a quality parameter and a value in
/// [0, 1] otherwise. Output size is expected, but not required, to grow with
/// quality.
pub trait EncodePrimitive {
    fn encode(
        &self,
        buffer: &PixelBuffer,
        format: ImageFormat,
        quality: Option<f32>,
    ) -> Result<Vec<u8>, EncodeError>;
}

impl<T: EncodePrimitive + ?Sized> EncodePrimitive for &T {
    fn encode(
        &self,
        buffer: &PixelBuffer,
        format: ImageFormat,
        quality: Option<f32>,
    ) -> Result<Vec<u8>, EncodeError> {
        (**self).encode(buffer, format, quality)
    }
}

/// Test doubles shared by the encode and engine tests.
#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;

    use super::*;

    /// Produces `base + slope * q` bytes (or a fixed size without quality)
    /// and records every call.
    pub(crate) struct LinearEncoder {
        pub base: usize,
        pub slope: f32,
        pub calls: RefCell<Vec<(ImageFormat, Option<f32>)>>,
    }

    impl LinearEncoder {
        pub fn new(base: usize, slope: f32) -> Self {
            Self {
                base,
                slope,
                calls: RefCell::new(Vec::new()),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }

        pub fn qualities(&self) -> Vec<f32> {
            self.calls.borrow().iter().filter_map(|(_, q)| *q).collect()
        }
    }

    impl EncodePrimitive for LinearEncoder {
        fn encode(
            &self,
            _buffer: &PixelBuffer,
            format: ImageFormat,
            quality: Option<f32>,
        ) -> Result<Vec<u8>, EncodeError> {
            self.calls.borrow_mut().push((format, quality));
            let size = self.base + (self.slope * quality.unwrap_or(1.0)) as usize;
            Ok(vec![0u8; size])
        }
    }

    /// Size jumps up and down as quality rises: `base + spread * |sin(q * freq)|`.
    pub(crate) struct ZigzagEncoder {
        pub base: usize,
        pub spread: f32,
        pub freq: f32,
        pub calls: RefCell<Vec<f32>>,
    }

    impl ZigzagEncoder {
        pub fn new(base: usize, spread: f32, freq: f32) -> Self {
            Self {
                base,
                spread,
                freq,
                calls: RefCell::new(Vec::new()),
            }
        }

        pub fn size_at(&self, quality: f32) -> usize {
            self.base + (self.spread * (quality * self.freq).sin().abs()) as usize
        }
    }

    impl EncodePrimitive for ZigzagEncoder {
        fn encode(
            &self,
            _buffer: &PixelBuffer,
            _format: ImageFormat,
            quality: Option<f32>,
        ) -> Result<Vec<u8>, EncodeError> {
            let quality = quality.unwrap_or(1.0);
            self.calls.borrow_mut().push(quality);
            Ok(vec![0u8; self.size_at(quality)])
        }
    }

    /// Always fails.
    pub(crate) struct BrokenEncoder;

    impl EncodePrimitive for BrokenEncoder {
        fn encode(
            &self,
            _buffer: &PixelBuffer,
            format: ImageFormat,
            _quality: Option<f32>,
        ) -> Result<Vec<u8>, EncodeError> {
            Err(EncodeError::EncodingFailed {
                format,
                reason: "encoder unavailable".to_string(),
            })
        }
    }

    pub(crate) fn buffer(width: u32, height: u32) -> PixelBuffer {
        let bitmap = crate::decode::Bitmap::filled(width, height, [120, 80, 40, 255]);
        crate::prepare::prepare(&bitmap, width, height, ImageFormat::Png)
            .expect("valid test surface")
    }
}
