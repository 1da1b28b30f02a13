//! Layers
//!
//! A layer owns one drawing context and an ordered stack of element handles.
//! Index 0 of the stack is painted first, the last index is painted on top.
//! Effects are painted after every element of the layer.
//!
//! Layers never own element records; those live in the canvas store and the
//! layer stack holds their [`ElementId`]s.

use std::fmt;

use easel_paint::DrawContext;
use slotmap::SlotMap;

use crate::element::{Element, ElementId};
use crate::error::{CanvasError, Result};
use crate::normalize::Normalizer;

// ─────────────────────────────────────────────────────────────────────────────
// Layer Identity
// ─────────────────────────────────────────────────────────────────────────────

/// Unique identifier of a layer within a canvas
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LayerId(pub u64);

impl LayerId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Generator for unique layer IDs
#[derive(Debug)]
pub struct LayerIdGenerator {
    next: u64,
}

impl Default for LayerIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerIdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next(&mut self) -> LayerId {
        let id = LayerId(self.next);
        self.next += 1;
        id
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Effects
// ─────────────────────────────────────────────────────────────────────────────

/// A renderable painted on top of a layer's elements.
///
/// Effects are opaque to the canvas: it only calls [`Effect::render`] once
/// per frame, in insertion order, after the element stack.
pub trait Effect {
    /// Name used in logs
    fn name(&self) -> &str {
        "effect"
    }

    fn render(&self, ctx: &mut dyn DrawContext, normalizer: &Normalizer) -> Result<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Layer
// ─────────────────────────────────────────────────────────────────────────────

/// A drawing surface with its own z-ordered element stack
pub struct Layer {
    id: LayerId,
    name: Option<String>,
    visible: bool,
    elements: Vec<ElementId>,
    effects: Vec<Box<dyn Effect>>,
    context: Box<dyn DrawContext>,
}

impl Layer {
    pub(crate) fn new(id: LayerId, name: Option<String>, context: Box<dyn DrawContext>) -> Self {
        Self {
            id,
            name,
            visible: true,
            elements: Vec::new(),
            effects: Vec::new(),
            context,
        }
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Hidden layers are cleared on render but nothing is drawn into them
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Element handles in paint order, bottom first
    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }

    /// Stack position of `id`, or `None` if it is not in this layer
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|&e| e == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.index_of(id).is_some()
    }

    /// The layer's drawing context, holding the last rendered frame
    pub fn context(&self) -> &dyn DrawContext {
        self.context.as_ref()
    }

    pub(crate) fn context_mut(&mut self) -> &mut dyn DrawContext {
        self.context.as_mut()
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub(crate) fn push_element(&mut self, id: ElementId) {
        self.elements.push(id);
    }

    /// Insert at `index`, clamped to the stack bounds
    pub(crate) fn insert_element(&mut self, index: usize, id: ElementId) {
        let index = index.min(self.elements.len());
        self.elements.insert(index, id);
    }

    /// Remove `id` from the stack, returning the index it held
    pub(crate) fn remove_element(&mut self, id: ElementId) -> Option<usize> {
        let index = self.index_of(id)?;
        self.elements.remove(index);
        Some(index)
    }

    pub(crate) fn add_effect(&mut self, effect: Box<dyn Effect>) {
        self.effects.push(effect);
    }

    /// Repaint the whole layer: clear, elements bottom to top, then effects.
    ///
    /// The first failing element aborts the pass; the context is left with
    /// whatever was drawn before the failure.
    pub(crate) fn render(
        &mut self,
        store: &SlotMap<ElementId, Element>,
        normalizer: &Normalizer,
    ) -> Result<()> {
        self.context.clear();

        if self.visible {
            for &id in &self.elements {
                let element = store.get(id).ok_or(CanvasError::ElementNotFound(id))?;
                element.render(self.context.as_mut(), normalizer)?;
            }
            for effect in &self.effects {
                tracing::trace!(layer = %self.id, effect = effect.name(), "render effect");
                effect.render(self.context.as_mut(), normalizer)?;
            }
        }

        self.context.flush();
        Ok(())
    }
}

impl fmt::Debug for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layer")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("visible", &self.visible)
            .field("elements", &self.elements)
            .field("effects", &self.effects.len())
            .finish()
    }
}
