//! Quality search against a byte budget.
//!
//! A fixed number of bisection steps over the quality range, keeping the
//! highest quality whose output fit. Each step needs the previous step's
//! size to pick its midpoint, so the probes run strictly one after another.
//!
//! The encoder is only assumed to be roughly monotonic. If it is not, the
//! search may settle on a lower quality than the best that fits; it never
//! returns anything outside the probed set.

use super::{EncodeError, EncodePrimitive};
use crate::format::ImageFormat;
use crate::prepare::PixelBuffer;

/// Number of bisection steps. With the range below this bounds the gap to
/// the best fitting quality at (0.95 - 0.01) / 2^8, about 0.0037.
pub const SEARCH_ITERATIONS: usize = 8;

/// Lowest quality probed, also used for the fallback encode.
pub const QUALITY_FLOOR: f32 = 0.01;

/// Upper end of the search range.
pub const QUALITY_CEILING: f32 = 0.95;

/// One encode made during the search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probe {
    pub quality: f32,
    pub size: usize,
    /// Whether `size` fit the budget.
    pub accepted: bool,
}

/// Result of [`encode_to_target`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub bytes: Vec<u8>,
    /// Quality the returned bytes were encoded at.
    pub quality: f32,
    /// Format actually encoded (PNG requests come back as WebP).
    pub format: ImageFormat,
    /// False when even the floor encode is over budget.
    pub target_met: bool,
    /// Every encode made, in order.
    pub probes: Vec<Probe>,
}

/// Find the highest quality whose encoding fits in `target_size_kb` KiB.
///
/// Runs exactly [`SEARCH_ITERATIONS`] bisection steps over
/// [[`QUALITY_FLOOR`], [`QUALITY_CEILING`]]. A probe that fits becomes the
/// candidate and the search moves up; one that does not is discarded and the
/// search moves down. If nothing fit, the buffer is encoded once more at the
/// floor and that is returned, over budget or not.
///
/// PNG has no quality to search, so it is encoded as WebP instead.
///
/// # Errors
///
/// Any primitive failure aborts the search and is returned as is.
pub fn encode_to_target<E: EncodePrimitive + ?Sized>(
    encoder: &E,
    buffer: &PixelBuffer,
    format: ImageFormat,
    target_size_kb: f64,
) -> Result<SearchOutcome, EncodeError> {
    let format = format.for_size_target();
    let budget = target_size_kb * 1024.0;
    let fits = |len: usize| len as f64 <= budget;

    let mut low = QUALITY_FLOOR;
    let mut high = QUALITY_CEILING;
    let mut best: Option<(Vec<u8>, f32)> = None;
    let mut probes = Vec::with_capacity(SEARCH_ITERATIONS + 1);

    for _ in 0..SEARCH_ITERATIONS {
        let mid = (low + high) / 2.0;
        let bytes = encoder.encode(buffer, format, Some(mid))?;
        let accepted = fits(bytes.len());

        log::debug!(
            "probe {} q={:.4}: {} bytes ({})",
            format,
            mid,
            bytes.len(),
            if accepted { "fits" } else { "over" }
        );
        probes.push(Probe {
            quality: mid,
            size: bytes.len(),
            accepted,
        });

        if accepted {
            best = Some((bytes, mid));
            low = mid;
        } else {
            high = mid;
        }
    }

    let (bytes, quality) = match best {
        Some(candidate) => candidate,
        None => {
            let bytes = encoder.encode(buffer, format, Some(QUALITY_FLOOR))?;
            log::debug!(
                "no probe fit {:.1} KiB, falling back to floor: {} bytes",
                target_size_kb,
                bytes.len()
            );
            probes.push(Probe {
                quality: QUALITY_FLOOR,
                size: bytes.len(),
                accepted: fits(bytes.len()),
            });
            (bytes, QUALITY_FLOOR)
        }
    };

    Ok(SearchOutcome {
        target_met: fits(bytes.len()),
        bytes,
        quality,
        format,
        probes,
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================
