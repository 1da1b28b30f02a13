//! Image error types

use thiserror::Error;

/// Errors raised while loading or decoding an image
#[derive(Error, Debug)]
pub enum ImageError {
    /// Failed to read the image file
    #[error("Failed to load image file: {0}")]
    FileLoad(String),

    /// Invalid base64 payload or data URI
    #[error("Invalid base64 image data: {0}")]
    Base64(String),

    /// The bytes could not be decoded as an image
    #[error("Failed to decode image: {0}")]
    Decode(String),
}

impl From<image::ImageError> for ImageError {
    fn from(err: image::ImageError) -> Self {
        ImageError::Decode(err.to_string())
    }
}

impl From<base64::DecodeError> for ImageError {
    fn from(err: base64::DecodeError) -> Self {
        ImageError::Base64(err.to_string())
    }
}

/// Result type for image operations
pub type Result<T> = std::result::Result<T, ImageError>;
