//! File-level facts shown by the size checker.

use serde::{Deserialize, Serialize};

use crate::dimensions::aspect_ratio;
use crate::format::ImageFormat;

/// Whether an image is wider than it is tall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageOrientation {
    Landscape,
    /// Square images count as portrait.
    Portrait,
}

/// Dimensions, encoded size and container of an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// Size of the file as uploaded.
    pub byte_size: u64,
    pub format: ImageFormat,
}

impl ImageInfo {
    /// Pixel count in millions.
    pub fn megapixels(&self) -> f64 {
        f64::from(self.width) * f64::from(self.height) / 1_000_000.0
    }

    pub fn orientation(&self) -> ImageOrientation {
        if self.width > self.height {
            ImageOrientation::Landscape
        } else {
            ImageOrientation::Portrait
        }
    }

    /// Width-to-height ratio rendered as `"1.50:1"`.
    pub fn aspect_ratio_label(&self) -> String {
        format!("{:.2}:1", aspect_ratio(self.width, self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(width: u32, height: u32) -> ImageInfo {
        ImageInfo {
            width,
            height,
            byte_size: 1024,
            format: ImageFormat::Jpeg,
        }
    }

    #[test]
    fn test_megapixels() {
        assert!((info(6000, 4000).megapixels() - 24.0).abs() < 1e-9);
        assert!((info(1920, 1080).megapixels() - 2.0736).abs() < 1e-9);
    }

    #[test]
    fn test_orientation() {
        assert_eq!(info(300, 200).orientation(), ImageOrientation::Landscape);
        assert_eq!(info(200, 300).orientation(), ImageOrientation::Portrait);
        assert_eq!(info(200, 200).orientation(), ImageOrientation::Portrait);
    }

    #[test]
    fn test_aspect_ratio_label() {
        assert_eq!(info(300, 200).aspect_ratio_label(), "1.50:1");
        assert_eq!(info(1920, 1080).aspect_ratio_label(), "1.78:1");
    }
}
