//! Host-side collaborators
//!
//! The canvas never draws pixels itself. A [`Surface`] hands out one drawing
//! context per layer; an [`Exporter`] serializes the composited layers; a
//! [`Host`] receives the exported artifact when the canvas is torn down.

use easel_paint::{DrawContext, PaintContext, Size};

use crate::canvas::Canvas;
use crate::error::Result;
use crate::layer::LayerId;

/// Source of per-layer drawing contexts
pub trait Surface {
    /// Size of the backing store in device pixels
    fn device_size(&self) -> Size;

    /// Create the drawing context for a new layer
    fn create_context(&mut self, layer: LayerId) -> Box<dyn DrawContext>;
}

/// A surface whose layers record paint commands
#[derive(Debug, Clone, Copy)]
pub struct RecordingSurface {
    size: Size,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        Self { size }
    }
}

impl Surface for RecordingSurface {
    fn device_size(&self) -> Size {
        self.size
    }

    fn create_context(&mut self, layer: LayerId) -> Box<dyn DrawContext> {
        tracing::trace!(%layer, "create recording context");
        Box::new(PaintContext::new())
    }
}

/// Serializes a canvas to an artifact, typically encoded image bytes
pub trait Exporter {
    fn export(&self, canvas: &Canvas) -> Result<Vec<u8>>;
}

/// The container that displays a canvas
pub trait Host {
    /// Take ownership of the artifact replacing the canvas
    fn attach(&mut self, artifact: Vec<u8>) -> Result<()>;
}
