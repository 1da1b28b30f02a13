//! Easel Paint API
//!
//! The drawing vocabulary shared by the canvas and its backends, similar to
//! the HTML canvas 2D context.
//!
//! # Features
//!
//! - Colors with CSS hex and keyword parsing
//! - Path building (move, line, arc, rect, close)
//! - Fill, stroke and text styles
//! - The [`DrawContext`] trait every layer draws through
//! - [`ScopedTransform`] for transforms that always restore
//! - [`PaintContext`], a recording context used headless and in tests

pub mod color;
pub mod context;
pub mod path;
pub mod primitives;
pub mod scoped;

pub use color::{Color, ParseColorError};
pub use context::{
    DrawContext, FillStyle, PaintCommand, PaintContext, StrokeStyle, TextAlign, TextBaseline,
    TextStyle, Transform2D,
};
pub use path::{Path, PathBuilder, PathCommand, Point};
pub use primitives::*;
pub use scoped::{with_transform, ScopedTransform};
