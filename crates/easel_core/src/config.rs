//! Canvas configuration

use easel_paint::Size;

/// Logical size and device pixel ratio of a canvas.
///
/// Shapes are described in logical units; the device surface is
/// `width * pixel_ratio` by `height * pixel_ratio` pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CanvasConfig {
    /// Logical width
    pub width: f32,
    /// Logical height
    pub height: f32,
    /// Device pixels per logical unit
    pub pixel_ratio: f32,
}

impl Default for CanvasConfig {
    /// 300x150, the default size of an HTML canvas
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 150.0,
            pixel_ratio: 1.0,
        }
    }
}

impl CanvasConfig {
    /// Create a config with the given logical size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Set the device pixel ratio
    pub fn with_pixel_ratio(mut self, ratio: f32) -> Self {
        self.pixel_ratio = ratio;
        self
    }

    pub fn logical_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn device_size(&self) -> Size {
        self.logical_size().scale(self.pixel_ratio)
    }
}
