//! Decoding image sources into RGBA8 pixels

use base64::Engine;
use tracing::debug;

use crate::error::{ImageError, Result};
use crate::source::{ImageFormat, ImageSource};

/// Decoded RGBA8 image ready to be blitted by a drawing context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl ImageData {
    /// Wrap already decoded RGBA pixels, 4 bytes per pixel
    pub fn from_rgba(pixels: Vec<u8>, width: u32, height: u32) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(ImageError::Decode(format!(
                "{width}x{height} RGBA needs {expected} bytes, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Load and decode an image from a source
    ///
    /// File extensions and data URI MIME types pick the decoder. Sources
    /// without a recognised hint are sniffed from their leading bytes.
    pub fn load(source: ImageSource) -> Result<Self> {
        match source {
            ImageSource::File(path) => {
                let format = ImageFormat::from_path(&path);
                debug!("loading image from {} ({format:?})", path.display());
                let bytes = std::fs::read(&path)
                    .map_err(|e| ImageError::FileLoad(format!("{}: {e}", path.display())))?;
                Self::decode(&bytes, format)
            }
            ImageSource::Base64(data) => Self::from_base64(&data),
        }
    }

    /// Decode plain base64 or a `data:image/<format>;base64,` URI
    pub fn from_base64(data: &str) -> Result<Self> {
        let (format, payload) = match data.strip_prefix("data:") {
            Some(uri) => {
                let (mime, payload) = uri
                    .split_once(";base64,")
                    .ok_or_else(|| ImageError::Base64("Invalid data URI format".to_string()))?;
                let format = mime
                    .strip_prefix("image/")
                    .and_then(ImageFormat::from_extension);
                (format, payload)
            }
            None => (None, data),
        };

        let bytes = base64::engine::general_purpose::STANDARD.decode(payload)?;
        Self::decode(&bytes, format)
    }

    /// Decode encoded bytes, trusting `format` when given
    pub fn decode(bytes: &[u8], format: Option<ImageFormat>) -> Result<Self> {
        let img = match format {
            Some(format) => image::load_from_memory_with_format(bytes, format.to_image_format())?,
            None => image::load_from_memory(bytes)?,
        };
        let rgba = img.into_rgba8();
        let (width, height) = rgba.dimensions();

        Ok(Self {
            pixels: rgba.into_raw(),
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}
