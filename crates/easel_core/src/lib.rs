//! Easel Core
//!
//! Layered vector drawing on top of an injected drawing context:
//!
//! - **Layers**: each owns a drawing context and a z-ordered element stack
//! - **Elements**: lines, rects, circles, ellipses, polygons, text and images
//! - **Normalization**: logical units mapped onto the device surface
//! - **Z-order**: remove, bump and move, each followed by a full render
//! - **Extensions**: named operations registered by plugins
//!
//! # Example
//!
//! ```rust
//! use easel_core::{Attributes, Canvas, CanvasConfig};
//! use easel_paint::{Color, PaintCommand};
//!
//! let mut canvas = Canvas::recording(CanvasConfig::new(100.0, 100.0));
//! let layer = canvas.new_layer();
//!
//! let back = canvas
//!     .rect(layer, Attributes::new().with_size(50.0, 50.0).with_fill(Color::RED))
//!     .unwrap();
//! canvas
//!     .circle(layer, Attributes::new().with_position(25.0, 25.0).with_radius(10.0))
//!     .unwrap();
//!
//! // Paint the rect over the circle
//! canvas.bump_to_top(back).unwrap();
//!
//! let commands = canvas.layer(layer).unwrap().context().recorded().unwrap();
//! assert_eq!(commands.len(), 2);
//! assert!(matches!(&commands[1], PaintCommand::FillPath { style, .. } if style.color == Color::RED));
//! ```

pub mod attributes;
pub mod canvas;
pub mod config;
pub mod element;
pub mod error;
pub mod extension;
pub mod layer;
pub mod normalize;
pub mod surface;

pub use attributes::Attributes;
pub use canvas::Canvas;
pub use config::CanvasConfig;
pub use element::{Element, ElementId, ElementKind};
pub use error::{CanvasError, Result};
pub use extension::{ExtensionArgs, ExtensionFn, ExtensionRegistry, ExtensionValue};
pub use layer::{Effect, Layer, LayerId, LayerIdGenerator};
pub use normalize::Normalizer;
pub use surface::{Exporter, Host, RecordingSurface, Surface};
