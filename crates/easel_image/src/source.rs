//! Image source types

use std::path::{Path, PathBuf};

/// Where the encoded bytes of an image come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A file on disk; the extension is used as the format hint
    File(PathBuf),

    /// Base64 data, either plain or as a `data:image/<format>;base64,` URI
    Base64(String),
}

impl ImageSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Parse a resource string into an ImageSource
    ///
    /// Supported formats:
    /// - `data:image/png;base64,...` - Data URI with base64
    /// - `file:///path/to/image.png` - File path
    /// - `/path/to/image.png` - Treated as file path
    pub fn from_uri(uri: &str) -> Self {
        if uri.starts_with("data:") {
            Self::Base64(uri.to_string())
        } else if let Some(path) = uri.strip_prefix("file://") {
            Self::File(PathBuf::from(path))
        } else {
            Self::File(PathBuf::from(uri))
        }
    }
}

/// Encoded image formats the loader decodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
}

impl ImageFormat {
    /// Detect format from a file extension or a MIME subtype (`jpeg`, `png`)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "gif" => Some(Self::Gif),
            "bmp" => Some(Self::Bmp),
            _ => None,
        }
    }

    /// Format hint for a file path, `None` when the extension is missing or unknown
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub(crate) fn to_image_format(self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::Gif => image::ImageFormat::Gif,
            Self::Bmp => image::ImageFormat::Bmp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_uri() {
        assert!(matches!(
            ImageSource::from_uri("data:image/png;base64,AAAA"),
            ImageSource::Base64(_)
        ));
        assert_eq!(
            ImageSource::from_uri("file:///tmp/a.png"),
            ImageSource::file("/tmp/a.png")
        );
        assert_eq!(
            ImageSource::from_uri("assets/logo.png"),
            ImageSource::file("assets/logo.png")
        );
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ImageFormat::from_path(Path::new("logo.PNG")),
            Some(ImageFormat::Png)
        );
        assert_eq!(
            ImageFormat::from_path(Path::new("photo.jpeg")),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(ImageFormat::from_path(Path::new("scan.tiff")), None);
        assert_eq!(ImageFormat::from_path(Path::new("README")), None);
    }
}
