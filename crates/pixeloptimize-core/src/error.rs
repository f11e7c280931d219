//! Top-level error type for an engine call.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::handle::HandleError;

/// Everything that can fail a [`process`](crate::process) call.
///
/// Missing a byte budget is not in here: the search always returns its best
/// effort and reports whether the target was met.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The input could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The drawing surface for the requested output size cannot be created.
    #[error("Cannot allocate {width}x{height} drawing surface: {reason}")]
    SurfaceAllocation {
        width: u32,
        height: u32,
        reason: &'static str,
    },

    /// The single-quality encoder failed. Never retried.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The display handle for the result could not be created.
    #[error(transparent)]
    Handle(#[from] HandleError),

    /// A constraint value is outside its documented range.
    #[error("Invalid constraints: {0}")]
    InvalidConstraints(String),
}
