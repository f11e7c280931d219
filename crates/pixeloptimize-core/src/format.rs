//! Output format enumeration.
//!
//! The engine only ever produces one of three containers. Keeping them in a
//! closed enum lets the PNG-specific rules (no quality knob, substitution
//! under a size target) be matched exhaustively.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Target encoding for a processed image.
///
/// Serialized as its MIME type (`"image/jpeg"`, `"image/png"`, `"image/webp"`)
/// so settings coming from a browser form deserialize directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ImageFormat {
    /// Baseline JPEG. No alpha channel.
    #[default]
    #[serde(rename = "image/jpeg")]
    Jpeg,
    /// Lossless PNG. No quality parameter.
    #[serde(rename = "image/png")]
    Png,
    /// Lossy WebP with alpha.
    #[serde(rename = "image/webp")]
    Webp,
}

impl ImageFormat {
    /// Every supported format, in UI order.
    pub const ALL: [ImageFormat; 3] = [ImageFormat::Jpeg, ImageFormat::Png, ImageFormat::Webp];

    /// MIME type string for this format.
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Webp => "image/webp",
        }
    }

    /// Parse a MIME type. Matching is case-insensitive and ignores parameters
    /// such as `;charset=...`.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        Self::ALL
            .into_iter()
            .find(|format| format.mime_type().eq_ignore_ascii_case(essence))
    }

    /// Preferred file extension, without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Png => "png",
            ImageFormat::Webp => "webp",
        }
    }

    /// All extensions commonly used for this format.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            ImageFormat::Jpeg => &["jpeg", "jpg"],
            ImageFormat::Png => &["png"],
            ImageFormat::Webp => &["webp"],
        }
    }

    /// Whether the container can store an alpha channel.
    pub fn supports_alpha(self) -> bool {
        match self {
            ImageFormat::Jpeg => false,
            ImageFormat::Png | ImageFormat::Webp => true,
        }
    }

    /// Whether the encoder exposes a continuous quality parameter.
    pub fn has_quality(self) -> bool {
        match self {
            ImageFormat::Jpeg | ImageFormat::Webp => true,
            ImageFormat::Png => false,
        }
    }

    /// The format actually encoded when a byte budget is requested.
    ///
    /// PNG has nothing to search over, so it is replaced by WebP.
    pub fn for_size_target(self) -> Self {
        match self {
            ImageFormat::Png => ImageFormat::Webp,
            other => other,
        }
    }

    pub(crate) fn from_image_format(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Jpeg => Some(ImageFormat::Jpeg),
            image::ImageFormat::Png => Some(ImageFormat::Png),
            image::ImageFormat::WebP => Some(ImageFormat::Webp),
            _ => None,
        }
    }

    pub(crate) fn to_image_format(self) -> image::ImageFormat {
        match self {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Webp => image::ImageFormat::WebP,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_jpeg() {
        assert_eq!(ImageFormat::default(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_mime_round_trip() {
        for format in ImageFormat::ALL {
            assert_eq!(ImageFormat::from_mime(format.mime_type()), Some(format));
        }
    }

    #[test]
    fn test_from_mime_lenient() {
        assert_eq!(ImageFormat::from_mime("IMAGE/WEBP"), Some(ImageFormat::Webp));
        assert_eq!(
            ImageFormat::from_mime("image/png; charset=binary"),
            Some(ImageFormat::Png)
        );
        assert_eq!(ImageFormat::from_mime("image/gif"), None);
        assert_eq!(ImageFormat::from_mime(""), None);
    }

    #[test]
    fn test_extensions() {
        assert_eq!(ImageFormat::Jpeg.extension(), "jpeg");
        assert!(ImageFormat::Jpeg.extensions().contains(&"jpg"));
        assert_eq!(ImageFormat::Png.extension(), "png");
        assert_eq!(ImageFormat::Webp.extension(), "webp");
    }

    #[test]
    fn test_png_rules() {
        assert!(!ImageFormat::Png.has_quality());
        assert_eq!(ImageFormat::Png.for_size_target(), ImageFormat::Webp);
        assert_eq!(ImageFormat::Jpeg.for_size_target(), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::Webp.for_size_target(), ImageFormat::Webp);
    }

    #[test]
    fn test_alpha_support() {
        assert!(!ImageFormat::Jpeg.supports_alpha());
        assert!(ImageFormat::Png.supports_alpha());
        assert!(ImageFormat::Webp.supports_alpha());
    }

    #[test]
    fn test_serde_uses_mime_strings() {
        let json = serde_json::to_string(&ImageFormat::Webp).unwrap();
        assert_eq!(json, "\"image/webp\"");

        let parsed: ImageFormat = serde_json::from_str("\"image/png\"").unwrap();
        assert_eq!(parsed, ImageFormat::Png);
    }

    #[test]
    fn test_display() {
        assert_eq!(ImageFormat::Jpeg.to_string(), "image/jpeg");
    }
}
