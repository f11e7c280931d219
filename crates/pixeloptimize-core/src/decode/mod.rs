//! Image decoding for PixelOptimize.
//!
//! This module provides functionality for:
//! - Decoding uploaded JPEG, PNG and WebP files into RGBA bitmaps
//! - Reading dimensions and container format without a full decode
//!
//! Decoding is a leaf capability: the engine never decodes, it only consumes
//! the [`Bitmap`] a caller produced here.
//!
//! # Examples
//!
//! ```ignore
//! use pixeloptimize_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let bitmap = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", bitmap.width, bitmap.height);
//! ```

mod info;
mod loader;
mod types;

pub use info::{ImageInfo, ImageOrientation};
pub use loader::{decode_image, decode_image_with_hint, read_info, sniff_format};
pub use types::{Bitmap, DecodeError, FilterType};
