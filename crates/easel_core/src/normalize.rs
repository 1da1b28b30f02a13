//! Logical-to-device coordinate normalization
//!
//! Every coordinate and extent an element hands to its drawing context goes
//! through a [`Normalizer`] first. The mapping is a pure per-axis scale, so
//! identical inputs give identical device values on every render.

use easel_paint::{Point, Size};

/// Maps logical canvas units onto the device space of a layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    logical: Size,
    device: Size,
}

impl Normalizer {
    pub fn new(logical: Size, device: Size) -> Self {
        Self { logical, device }
    }

    pub fn logical(&self) -> Size {
        self.logical
    }

    pub fn device(&self) -> Size {
        self.device
    }

    /// Horizontal device units per logical unit
    pub fn scale_x(&self) -> f32 {
        ratio(self.device.width, self.logical.width)
    }

    /// Vertical device units per logical unit
    pub fn scale_y(&self) -> f32 {
        ratio(self.device.height, self.logical.height)
    }

    pub fn normalize_x(&self, x: f32) -> f32 {
        x * self.scale_x()
    }

    pub fn normalize_y(&self, y: f32) -> f32 {
        y * self.scale_y()
    }

    pub fn normalize_point(&self, point: Point) -> Point {
        Point::new(self.normalize_x(point.x), self.normalize_y(point.y))
    }

    pub fn normalize_size(&self, size: Size) -> Size {
        Size::new(self.normalize_x(size.width), self.normalize_y(size.height))
    }

    /// Radii and stroke widths follow the horizontal scale
    pub fn normalize_radius(&self, radius: f32) -> f32 {
        self.normalize_x(radius)
    }
}

// A zero logical extent would divide by zero; treat it as identity.
fn ratio(device: f32, logical: f32) -> f32 {
    if logical == 0.0 {
        1.0
    } else {
        device / logical
    }
}
