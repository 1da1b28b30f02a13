//! Scene file handling
//!
//! A scene is a TOML document describing a canvas, its layers and the
//! elements on each layer:
//!
//! ```toml
//! [canvas]
//! width = 200
//! height = 100
//!
//! [[layers]]
//! name = "background"
//!
//! [[layers.elements]]
//! kind = "rect"
//! width = 200
//! height = 100
//! fill = "#202020"
//! ```

use anyhow::{Context, Result};
use easel_core::{Attributes, CanvasConfig};
use easel_image::ImageSource;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Top-level scene description
#[derive(Debug, Default, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub layers: Vec<LayerConfig>,
}

/// One layer, painted in file order
#[derive(Debug, Deserialize)]
pub struct LayerConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub elements: Vec<ElementConfig>,
}

fn default_true() -> bool {
    true
}

/// One element, stacked in file order
#[derive(Debug, Deserialize)]
pub struct ElementConfig {
    /// Element kind name (`rect`, `circle`, ...)
    pub kind: String,
    /// Image source for `image` elements: a file path or a base64 data URI
    #[serde(default)]
    pub src: Option<String>,
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl ElementConfig {
    /// The image source, with relative file paths resolved against `base`
    pub fn image_source(&self, base: &Path) -> Option<ImageSource> {
        let source = ImageSource::from_uri(self.src.as_deref()?);
        Some(match source {
            ImageSource::File(path) if path.is_relative() => ImageSource::File(base.join(path)),
            other => other,
        })
    }
}

impl SceneConfig {
    /// Load a scene from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Scene file {} does not exist", path.display());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Total number of elements across all layers
    pub fn element_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.elements.len()).sum()
    }
}
