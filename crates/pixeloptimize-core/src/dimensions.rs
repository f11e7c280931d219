//! Aspect-ratio helpers for the resize form.
//!
//! The engine stretches to whatever it is given. Keeping proportions is the
//! caller's job, done with these before building [`Constraints`].
//!
//! [`Constraints`]: crate::Constraints

/// Width divided by height. Zero height yields 0.
pub fn aspect_ratio(width: u32, height: u32) -> f64 {
    if height == 0 {
        return 0.0;
    }
    f64::from(width) / f64::from(height)
}

/// Height that keeps `ratio` for a new width.
///
/// Returns 0 for a non-positive or non-finite ratio.
pub fn height_for_width(width: u32, ratio: f64) -> u32 {
    if !(ratio.is_finite() && ratio > 0.0) {
        return 0;
    }
    (f64::from(width) / ratio).round() as u32
}

/// Width that keeps `ratio` for a new height.
pub fn width_for_height(height: u32, ratio: f64) -> u32 {
    if !(ratio.is_finite() && ratio > 0.0) {
        return 0;
    }
    (f64::from(height) * ratio).round() as u32
}
