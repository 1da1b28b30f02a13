//! Canvas error types

use thiserror::Error;

use crate::element::{ElementId, ElementKind};
use crate::layer::LayerId;

/// Errors raised by canvas operations and render passes
#[derive(Error, Debug)]
pub enum CanvasError {
    /// `create` was given a kind outside the fixed element set
    #[error("'{0}' is not an allowed element kind")]
    InvalidElementKind(String),

    /// A drawing routine ran without geometry it cannot default
    #[error("{kind} element is missing required attribute '{attribute}'")]
    MissingAttribute {
        kind: ElementKind,
        attribute: &'static str,
    },

    /// A color string could not be parsed
    #[error(transparent)]
    InvalidColor(#[from] easel_paint::ParseColorError),

    #[error("layer {0} does not exist")]
    LayerNotFound(LayerId),

    /// The handle was removed or never belonged to this canvas
    #[error("element {0:?} does not exist")]
    ElementNotFound(ElementId),

    #[error("no extension registered as '{0}'")]
    UnknownExtension(String),

    /// An extension rejected its arguments or failed while running
    #[error("extension failed: {0}")]
    Extension(String),

    /// The exporter could not serialize the composited layers
    #[error("export failed: {0}")]
    Export(String),
}

impl CanvasError {
    pub(crate) fn missing(kind: ElementKind, attribute: &'static str) -> Self {
        CanvasError::MissingAttribute { kind, attribute }
    }
}

/// Result type for canvas operations
pub type Result<T> = std::result::Result<T, CanvasError>;
