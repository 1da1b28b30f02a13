//! The canvas: layers, the element store and the render pipeline
//!
//! Every z-order or geometry mutation ends with a full-frame render, so
//! layer contexts always reflect the current stacks after a successful
//! operation. Creating an element does not render.

use std::fmt;
use std::sync::Arc;

use easel_image::ImageData;
use slotmap::SlotMap;

use crate::attributes::Attributes;
use crate::config::CanvasConfig;
use crate::element::{Element, ElementId, ElementKind};
use crate::error::{CanvasError, Result};
use crate::extension::{ExtensionArgs, ExtensionRegistry, ExtensionValue};
use crate::layer::{Effect, Layer, LayerId, LayerIdGenerator};
use crate::normalize::Normalizer;
use crate::surface::{Exporter, Host, RecordingSurface, Surface};

/// A layered drawing canvas
pub struct Canvas {
    config: CanvasConfig,
    normalizer: Normalizer,
    surface: Box<dyn Surface>,
    layers: Vec<Layer>,
    layer_ids: LayerIdGenerator,
    elements: SlotMap<ElementId, Element>,
    extensions: ExtensionRegistry,
    frames: u64,
}

impl Canvas {
    /// Create a canvas drawing into `surface`
    pub fn new(config: CanvasConfig, surface: impl Surface + 'static) -> Self {
        let normalizer = Normalizer::new(config.logical_size(), surface.device_size());
        tracing::debug!(
            width = config.width,
            height = config.height,
            pixel_ratio = config.pixel_ratio,
            "create canvas"
        );
        Self {
            config,
            normalizer,
            surface: Box::new(surface),
            layers: Vec::new(),
            layer_ids: LayerIdGenerator::new(),
            elements: SlotMap::with_key(),
            extensions: ExtensionRegistry::new(),
            frames: 0,
        }
    }

    /// Create a canvas whose layers record paint commands
    pub fn recording(config: CanvasConfig) -> Self {
        Self::new(config, RecordingSurface::new(config.device_size()))
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Logical width
    pub fn width(&self) -> f32 {
        self.config.width
    }

    /// Logical height
    pub fn height(&self) -> f32 {
        self.config.height
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Number of completed render passes
    pub fn frames(&self) -> u64 {
        self.frames
    }

    // ─────────────────────────────────────────────────────────────────────
    // Layers
    // ─────────────────────────────────────────────────────────────────────

    /// Add an unnamed layer on top of the existing ones
    pub fn new_layer(&mut self) -> LayerId {
        self.add_layer(None)
    }

    pub fn new_layer_named(&mut self, name: impl Into<String>) -> LayerId {
        self.add_layer(Some(name.into()))
    }

    fn add_layer(&mut self, name: Option<String>) -> LayerId {
        let id = self.layer_ids.next();
        let context = self.surface.create_context(id);
        tracing::debug!(layer = %id, name = ?name, "new layer");
        self.layers.push(Layer::new(id, name, context));
        id
    }

    /// Remove a layer together with every element it holds, then render
    pub fn delete_layer(&mut self, id: LayerId) -> Result<()> {
        let index = self.layer_position(id)?;
        let layer = self.layers.remove(index);
        for element in layer.elements() {
            self.elements.remove(*element);
        }
        tracing::debug!(layer = %id, elements = layer.len(), "delete layer");
        self.render()
    }

    /// Layers in paint order, bottom first
    pub fn layers(&self) -> impl Iterator<Item = &Layer> + '_ {
        self.layers.iter()
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id() == id)
    }

    fn layer_position(&self, id: LayerId) -> Result<usize> {
        self.layers
            .iter()
            .position(|layer| layer.id() == id)
            .ok_or(CanvasError::LayerNotFound(id))
    }

    fn layer_mut(&mut self, id: LayerId) -> Result<&mut Layer> {
        self.layers
            .iter_mut()
            .find(|layer| layer.id() == id)
            .ok_or(CanvasError::LayerNotFound(id))
    }

    /// Show or hide a layer, then render
    pub fn set_layer_visible(&mut self, id: LayerId, visible: bool) -> Result<()> {
        self.layer_mut(id)?.set_visible(visible);
        self.render()
    }

    /// Attach an effect painted after the layer's elements
    pub fn add_effect(&mut self, layer: LayerId, effect: impl Effect + 'static) -> Result<()> {
        let layer = self.layer_mut(layer)?;
        tracing::debug!(layer = %layer.id(), effect = effect.name(), "add effect");
        layer.add_effect(Box::new(effect));
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Elements
    // ─────────────────────────────────────────────────────────────────────

    /// Create an element on top of `layer`'s stack
    pub fn create(
        &mut self,
        layer: LayerId,
        kind: ElementKind,
        attributes: Attributes,
    ) -> Result<ElementId> {
        let index = self.layer_position(layer)?;
        let id = self
            .elements
            .insert(Element::new(kind, attributes, layer));
        self.layers[index].push_element(id);
        tracing::debug!(element = ?id, %kind, %layer, "create element");
        Ok(id)
    }

    /// Create an element from its kind name, as found in scene files
    pub fn create_named(
        &mut self,
        layer: LayerId,
        kind: &str,
        attributes: Attributes,
    ) -> Result<ElementId> {
        let kind = kind.parse()?;
        self.create(layer, kind, attributes)
    }

    pub fn line(&mut self, layer: LayerId, attributes: Attributes) -> Result<ElementId> {
        self.create(layer, ElementKind::Line, attributes)
    }

    pub fn rect(&mut self, layer: LayerId, attributes: Attributes) -> Result<ElementId> {
        self.create(layer, ElementKind::Rect, attributes)
    }

    pub fn circle(&mut self, layer: LayerId, attributes: Attributes) -> Result<ElementId> {
        self.create(layer, ElementKind::Circle, attributes)
    }

    pub fn ellipse(&mut self, layer: LayerId, attributes: Attributes) -> Result<ElementId> {
        self.create(layer, ElementKind::Ellipse, attributes)
    }

    pub fn polygon(&mut self, layer: LayerId, attributes: Attributes) -> Result<ElementId> {
        self.create(layer, ElementKind::Polygon, attributes)
    }

    pub fn text(&mut self, layer: LayerId, attributes: Attributes) -> Result<ElementId> {
        self.create(layer, ElementKind::Text, attributes)
    }

    /// Create an image element drawing `image` at the attributes' anchor
    pub fn image(
        &mut self,
        layer: LayerId,
        image: Arc<ImageData>,
        attributes: Attributes,
    ) -> Result<ElementId> {
        self.create(layer, ElementKind::Image, attributes.with_image(image))
    }

    pub fn element(&self, id: ElementId) -> Result<&Element> {
        self.elements.get(id).ok_or(CanvasError::ElementNotFound(id))
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    /// Mutable access to an element's attributes. Changes show up on the
    /// next render.
    pub fn attributes_mut(&mut self, id: ElementId) -> Result<&mut Attributes> {
        self.elements
            .get_mut(id)
            .map(Element::attributes_mut)
            .ok_or(CanvasError::ElementNotFound(id))
    }

    /// Number of live elements across all layers
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Current stack index of `id` within its layer
    pub fn layer_index(&self, id: ElementId) -> Result<usize> {
        let layer = self.element(id)?.layer();
        self.layer(layer)
            .ok_or(CanvasError::LayerNotFound(layer))?
            .index_of(id)
            .ok_or(CanvasError::ElementNotFound(id))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Z-order
    // ─────────────────────────────────────────────────────────────────────

    /// Take `id` out of its layer's stack, returning the layer and the
    /// index it held
    fn detach(&mut self, id: ElementId) -> Result<(LayerId, usize)> {
        let layer = self.element(id)?.layer();
        let index = self
            .layer_mut(layer)?
            .remove_element(id)
            .ok_or(CanvasError::ElementNotFound(id))?;
        Ok((layer, index))
    }

    /// Delete an element, then render. The handle becomes stale.
    pub fn remove(&mut self, id: ElementId) -> Result<()> {
        let (layer, index) = self.detach(id)?;
        self.elements.remove(id);
        tracing::debug!(element = ?id, %layer, index, "remove element");
        self.render()
    }

    /// Move an element `delta` positions up (positive) or down (negative)
    /// its layer's stack, clamped to the stack bounds, then render
    pub fn bump(&mut self, id: ElementId, delta: isize) -> Result<()> {
        let (layer, index) = self.detach(id)?;
        // saturates at 0; the layer clamps the upper end
        let target = index.saturating_add_signed(delta);
        let layer_ref = self.layer_mut(layer)?;
        layer_ref.insert_element(target, id);
        tracing::debug!(element = ?id, %layer, from = index, to = ?layer_ref.index_of(id), "bump element");
        self.render()
    }

    pub fn bump_up(&mut self, id: ElementId) -> Result<()> {
        self.bump(id, 1)
    }

    pub fn bump_down(&mut self, id: ElementId) -> Result<()> {
        self.bump(id, -1)
    }

    /// Move an element to the top of its layer, then render
    pub fn bump_to_top(&mut self, id: ElementId) -> Result<()> {
        let (layer, index) = self.detach(id)?;
        self.layer_mut(layer)?.push_element(id);
        tracing::debug!(element = ?id, %layer, from = index, "bump element to top");
        self.render()
    }

    /// Move an element to the bottom of its layer, then render
    pub fn bump_to_bottom(&mut self, id: ElementId) -> Result<()> {
        let (layer, index) = self.detach(id)?;
        self.layer_mut(layer)?.insert_element(0, id);
        tracing::debug!(element = ?id, %layer, from = index, "bump element to bottom");
        self.render()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Geometry
    // ─────────────────────────────────────────────────────────────────────

    /// Move an element's anchor to (x, y) in logical units, then render
    pub fn move_to(&mut self, id: ElementId, x: f32, y: f32) -> Result<()> {
        let logical = self.config.logical_size();
        let element = self
            .elements
            .get_mut(id)
            .ok_or(CanvasError::ElementNotFound(id))?;
        element.move_anchor(x, y, logical);
        tracing::debug!(element = ?id, x, y, "move element");

        let layer_id = element.layer();
        let layer = self
            .layers
            .iter_mut()
            .find(|layer| layer.id() == layer_id)
            .ok_or(CanvasError::LayerNotFound(layer_id))?;
        element.render(layer.context_mut(), &self.normalizer)?;

        self.render()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────

    /// Repaint every layer from scratch
    pub fn render(&mut self) -> Result<()> {
        for layer in &mut self.layers {
            layer.render(&self.elements, &self.normalizer)?;
        }
        self.frames += 1;
        tracing::trace!(frame = self.frames, layers = self.layers.len(), "rendered");
        Ok(())
    }

    /// Repaint every layer, then hand the finished canvas to `callback`
    pub fn render_with(&mut self, callback: impl FnOnce(&Canvas)) -> Result<()> {
        self.render()?;
        callback(self);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Extensions
    // ─────────────────────────────────────────────────────────────────────

    /// Register an extension under `name`, replacing any previous one
    pub fn register<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&mut Canvas, &ExtensionArgs) -> Result<ExtensionValue> + 'static,
    {
        self.extensions.register(name, f);
    }

    pub fn extensions(&self) -> &ExtensionRegistry {
        &self.extensions
    }

    /// Run the extension registered as `name`
    pub fn invoke(&mut self, name: &str, args: &ExtensionArgs) -> Result<ExtensionValue> {
        let extension = self
            .extensions
            .get(name)
            .ok_or_else(|| CanvasError::UnknownExtension(name.to_string()))?;
        tracing::debug!(extension = name, args = args.len(), "invoke extension");
        extension(self, args)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Teardown
    // ─────────────────────────────────────────────────────────────────────

    /// Export the canvas, drop every layer and element, and hand the
    /// artifact to `host`
    pub fn convert_to_image(&mut self, exporter: &dyn Exporter, host: &mut dyn Host) -> Result<()> {
        let artifact = exporter.export(self)?;
        tracing::debug!(bytes = artifact.len(), layers = self.layers.len(), "convert to image");
        self.layers.clear();
        self.elements.clear();
        host.attach(artifact)
    }
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("config", &self.config)
            .field("layers", &self.layers)
            .field("elements", &self.elements.len())
            .field("extensions", &self.extensions)
            .field("frames", &self.frames)
            .finish()
    }
}
