//! Easel Image
//!
//! Decoded image resources blitted by the `image` element.
//!
//! Images are decoded once, up front, into RGBA8 pixels. The canvas never
//! touches the encoded bytes again; elements hold an [`ImageData`] behind an
//! `Arc` so every repaint reuses the same buffer.
//!
//! # Example
//!
//! ```ignore
//! use easel_image::{ImageData, ImageSource};
//!
//! let data = ImageData::load(ImageSource::file("logo.png"))?;
//! let inline = ImageData::load(ImageSource::Base64("data:image/png;base64,iVBORw0KGgo...".into()))?;
//! ```

mod error;
mod loader;
mod source;

pub use error::{ImageError, Result};
pub use loader::ImageData;
pub use source::{ImageFormat, ImageSource};
