//! PixelOptimize Core - on-device image re-encoding
//!
//! This crate provides the re-encoding engine behind PixelOptimize: decode an
//! upload, then produce a JPEG, PNG or WebP that meets a quality, dimension
//! or byte-size constraint, without the image ever leaving the device.
//!
//! # Pipeline
//!
//! 1. [`decode::decode_image`] turns file bytes into a [`Bitmap`]
//! 2. [`prepare::prepare`] draws it onto a surface of the output size
//! 3. [`encode::encode_single`] or [`encode::encode_to_target`] encodes it
//! 4. [`Engine::process`] ties the steps together and returns a
//!    [`ProcessingResult`] carrying a display handle to release

pub mod decode;
pub mod dimensions;
pub mod download;
pub mod encode;
pub mod engine;
pub mod error;
pub mod format;
pub mod handle;
pub mod prepare;
pub mod presets;
pub mod size;

pub use decode::{decode_image, Bitmap, DecodeError, ImageInfo};
pub use download::download_filename;
pub use encode::{EncodeError, EncodePrimitive};
pub use engine::{process, Constraints, Engine, ProcessingResult};
pub use error::ProcessError;
pub use format::ImageFormat;
pub use handle::{DisplayHandle, HandleAllocator, HandleError, NoHandle, NoHandles, ResultSlot};
pub use presets::initial_quality_format;
pub use size::{format_bytes, size_change_percent};
