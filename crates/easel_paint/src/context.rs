//! Paint context - the drawing API consumed by the canvas

use std::sync::Arc;

use easel_image::ImageData;

use crate::color::Color;
use crate::path::{Path, Point};

/// Fill style for shapes
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FillStyle {
    pub color: Color,
}

impl Default for FillStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
        }
    }
}

impl From<Color> for FillStyle {
    fn from(color: Color) -> Self {
        Self { color }
    }
}

/// Stroke style; `width` is in device units
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Horizontal text alignment relative to the draw position
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TextAlign {
    #[default]
    Start,
    End,
    Left,
    Right,
    Center,
}

/// Vertical anchor of the text relative to the draw position
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TextBaseline {
    Top,
    Hanging,
    Middle,
    #[default]
    Alphabetic,
    Bottom,
}

/// Text style
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TextStyle {
    /// Font size in device units
    pub size: f32,
    pub family: String,
    pub color: Color,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 16.0,
            family: "sans-serif".to_string(),
            color: Color::BLACK,
            align: TextAlign::Start,
            baseline: TextBaseline::Alphabetic,
        }
    }
}

/// 2D affine transform
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Transform2D {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    pub const fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            e: x,
            f: y,
            ..Self::identity()
        }
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self {
            a: sx,
            d: sy,
            ..Self::identity()
        }
    }

    /// Apply `self` first, then `other`
    pub fn then(&self, other: &Transform2D) -> Transform2D {
        Transform2D {
            a: other.a * self.a + other.c * self.b,
            b: other.b * self.a + other.d * self.b,
            c: other.a * self.c + other.c * self.d,
            d: other.b * self.c + other.d * self.d,
            e: other.a * self.e + other.c * self.f + other.e,
            f: other.b * self.e + other.d * self.f + other.f,
        }
    }

    pub fn transform_point(&self, point: Point) -> Point {
        Point::new(
            self.a * point.x + self.c * point.y + self.e,
            self.b * point.x + self.d * point.y + self.f,
        )
    }
}

/// Drawing context of one layer.
///
/// Everything the canvas draws goes through this trait: a raster backend
/// rasterizes the calls, [`PaintContext`] records them. Coordinates are
/// already in device space when they arrive here.
pub trait DrawContext {
    /// Erase everything drawn since the last clear
    fn clear(&mut self);

    fn fill_path(&mut self, path: &Path, style: &FillStyle);

    fn stroke_path(&mut self, path: &Path, style: &StrokeStyle);

    fn fill_text(&mut self, text: &str, position: Point, style: &TextStyle);

    /// Blit a decoded image with its top-left corner at `position`
    fn draw_image(&mut self, image: &Arc<ImageData>, position: Point);

    /// Multiply a transform onto the current one. Prefer
    /// [`ScopedTransform`](crate::ScopedTransform), which pops on drop.
    fn push_transform(&mut self, transform: Transform2D);

    fn pop_transform(&mut self);

    /// Number of transforms currently pushed
    fn transform_depth(&self) -> usize;

    /// Composite the finished frame. Called once per layer per render pass.
    fn flush(&mut self) {}

    /// Commands drawn since the last clear, for contexts that record them
    fn recorded(&self) -> Option<&[PaintCommand]> {
        None
    }
}

/// A recorded paint command
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "cmd", rename_all = "snake_case"))]
pub enum PaintCommand {
    FillPath {
        path: Path,
        style: FillStyle,
    },
    StrokePath {
        path: Path,
        style: StrokeStyle,
    },
    FillText {
        text: String,
        position: Point,
        style: TextStyle,
    },
    DrawImage {
        position: Point,
        width: u32,
        height: u32,
        #[cfg_attr(feature = "serde", serde(skip_serializing))]
        image: Arc<ImageData>,
    },
    PushTransform {
        transform: Transform2D,
    },
    PopTransform,
}

/// A drawing context that records commands instead of rasterizing them
#[derive(Debug, Default)]
pub struct PaintContext {
    commands: Vec<PaintCommand>,
    transform_stack: Vec<Transform2D>,
    frames: u64,
}

impl PaintContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded commands
    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    /// Take ownership of recorded commands
    pub fn take_commands(&mut self) -> Vec<PaintCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of frames flushed so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// The product of all pushed transforms
    pub fn current_transform(&self) -> Transform2D {
        self.transform_stack
            .iter()
            .rev()
            .fold(Transform2D::identity(), |acc, t| acc.then(t))
    }
}

impl DrawContext for PaintContext {
    fn clear(&mut self) {
        self.commands.clear();
    }

    fn fill_path(&mut self, path: &Path, style: &FillStyle) {
        self.commands.push(PaintCommand::FillPath {
            path: path.clone(),
            style: *style,
        });
    }

    fn stroke_path(&mut self, path: &Path, style: &StrokeStyle) {
        self.commands.push(PaintCommand::StrokePath {
            path: path.clone(),
            style: *style,
        });
    }

    fn fill_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        self.commands.push(PaintCommand::FillText {
            text: text.to_string(),
            position,
            style: style.clone(),
        });
    }

    fn draw_image(&mut self, image: &Arc<ImageData>, position: Point) {
        self.commands.push(PaintCommand::DrawImage {
            position,
            width: image.width(),
            height: image.height(),
            image: Arc::clone(image),
        });
    }

    fn push_transform(&mut self, transform: Transform2D) {
        self.transform_stack.push(transform);
        self.commands.push(PaintCommand::PushTransform { transform });
    }

    fn pop_transform(&mut self) {
        if self.transform_stack.pop().is_none() {
            tracing::warn!("pop_transform called with an empty transform stack");
            return;
        }
        self.commands.push(PaintCommand::PopTransform);
    }

    fn transform_depth(&self) -> usize {
        self.transform_stack.len()
    }

    fn flush(&mut self) {
        self.frames += 1;
    }

    fn recorded(&self) -> Option<&[PaintCommand]> {
        Some(&self.commands)
    }
}
