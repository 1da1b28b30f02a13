//! Element attribute payload
//!
//! One flat record covers every element kind; each drawing routine reads the
//! fields it understands and ignores the rest. Missing optional geometry
//! falls back to the routine's default, missing required geometry fails the
//! render with [`CanvasError::MissingAttribute`](crate::CanvasError).

use std::sync::Arc;

use easel_image::ImageData;
use easel_paint::{Color, Point, TextAlign};

/// Geometry and style of an element, in logical units
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Attributes {
    /// Anchor x: start of a line, corner of a rect, center of a circle
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub radius: Option<f32>,
    #[cfg_attr(feature = "serde", serde(alias = "radiusX"))]
    pub radius_x: Option<f32>,
    #[cfg_attr(feature = "serde", serde(alias = "radiusY"))]
    pub radius_y: Option<f32>,
    /// Line end point
    #[cfg_attr(feature = "serde", serde(alias = "endX"))]
    pub end_x: Option<f32>,
    #[cfg_attr(feature = "serde", serde(alias = "endY"))]
    pub end_y: Option<f32>,
    /// Polygon vertices as `[x, y]` pairs
    pub points: Vec<[f32; 2]>,
    pub text: Option<String>,
    /// Font size
    pub size: Option<f32>,
    /// Font family
    pub font: Option<String>,
    pub align: Option<TextAlign>,
    /// Generic color: the stroke of a line, the fill of text and shapes
    pub color: Option<Color>,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    #[cfg_attr(feature = "serde", serde(alias = "strokeWidth"))]
    pub stroke_width: Option<f32>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub image: Option<Arc<ImageData>>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// The anchor point, (0, 0) when unset
    pub fn origin(&self) -> Point {
        Point::new(self.x.unwrap_or(0.0), self.y.unwrap_or(0.0))
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn with_radii(mut self, radius_x: f32, radius_y: f32) -> Self {
        self.radius_x = Some(radius_x);
        self.radius_y = Some(radius_y);
        self
    }

    pub fn with_end(mut self, x: f32, y: f32) -> Self {
        self.end_x = Some(x);
        self.end_y = Some(y);
        self
    }

    pub fn with_points(mut self, points: impl IntoIterator<Item = [f32; 2]>) -> Self {
        self.points = points.into_iter().collect();
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_font(mut self, family: impl Into<String>) -> Self {
        self.font = Some(family.into());
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = Some(align);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn with_stroke(mut self, color: Color, width: f32) -> Self {
        self.stroke = Some(color);
        self.stroke_width = Some(width);
        self
    }

    pub fn with_image(mut self, image: Arc<ImageData>) -> Self {
        self.image = Some(image);
        self
    }
}
