//! File names for downloaded results.

use crate::format::ImageFormat;

/// Stem used when the original file name is missing or has none.
pub const FALLBACK_STEM: &str = "image";

/// Build `"{prefix}_{stem}.{ext}"` for a processed image.
///
/// `stem` is everything in `original_name` before the first dot, and the
/// extension always follows the format that was actually encoded, so a
/// PNG request that came back as WebP downloads as `.webp`. An empty prefix
/// gives `"{stem}.{ext}"`.
pub fn download_filename(prefix: &str, original_name: Option<&str>, format: ImageFormat) -> String {
    let stem = original_name
        .and_then(|name| name.split('.').next())
        .filter(|stem| !stem.is_empty())
        .unwrap_or(FALLBACK_STEM);

    if prefix.is_empty() {
        format!("{stem}.{}", format.extension())
    } else {
        format!("{prefix}_{stem}.{}", format.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic() {
        assert_eq!(
            download_filename("pixeloptimize", Some("holiday.png"), ImageFormat::Webp),
            "pixeloptimize_holiday.webp"
        );
    }

    #[test]
    fn test_stem_stops_at_first_dot() {
        assert_eq!(
            download_filename("resized", Some("photo.final.v2.jpg"), ImageFormat::Jpeg),
            "resized_photo.jpeg"
        );
    }

    #[test]
    fn test_stem_keeps_whitespace() {
        assert_eq!(
            download_filename("compressed", Some("my photo .png"), ImageFormat::Jpeg),
            "compressed_my photo .jpeg"
        );
    }

    #[test]
    fn test_missing_name() {
        assert_eq!(
            download_filename("compressed_50kb", None, ImageFormat::Jpeg),
            "compressed_50kb_image.jpeg"
        );
        assert_eq!(
            download_filename("x", Some(".hidden"), ImageFormat::Png),
            "x_image.png"
        );
    }

    #[test]
    fn test_empty_prefix() {
        assert_eq!(download_filename("", Some("a.png"), ImageFormat::Png), "a.png");
    }
}
