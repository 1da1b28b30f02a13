//! Named extensions
//!
//! Plugins register operations on a canvas by name. An extension receives
//! the canvas and positional arguments and may create elements, add layers
//! or effects, or return a value to the caller.

use std::fmt;
use std::rc::Rc;

use easel_paint::Color;
use rustc_hash::FxHashMap;

use crate::canvas::Canvas;
use crate::element::ElementId;
use crate::error::{CanvasError, Result};
use crate::layer::LayerId;

/// Signature of a registered extension
pub type ExtensionFn = dyn Fn(&mut Canvas, &ExtensionArgs) -> Result<ExtensionValue>;

/// A value passed to or returned from an extension
#[derive(Clone, Debug, PartialEq)]
pub enum ExtensionValue {
    None,
    Bool(bool),
    Number(f32),
    Text(String),
    Element(ElementId),
    Layer(LayerId),
    Bytes(Vec<u8>),
}

impl From<f32> for ExtensionValue {
    fn from(value: f32) -> Self {
        ExtensionValue::Number(value)
    }
}

impl From<&str> for ExtensionValue {
    fn from(value: &str) -> Self {
        ExtensionValue::Text(value.to_string())
    }
}

impl From<String> for ExtensionValue {
    fn from(value: String) -> Self {
        ExtensionValue::Text(value)
    }
}

impl From<ElementId> for ExtensionValue {
    fn from(value: ElementId) -> Self {
        ExtensionValue::Element(value)
    }
}

impl From<LayerId> for ExtensionValue {
    fn from(value: LayerId) -> Self {
        ExtensionValue::Layer(value)
    }
}

/// Positional extension arguments with typed accessors
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtensionArgs {
    values: Vec<ExtensionValue>,
}

impl ExtensionArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an argument
    pub fn with(mut self, value: impl Into<ExtensionValue>) -> Self {
        self.values.push(value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ExtensionValue> {
        self.values.get(index)
    }

    fn require(&self, index: usize) -> Result<&ExtensionValue> {
        self.values
            .get(index)
            .ok_or_else(|| CanvasError::Extension(format!("missing argument {index}")))
    }

    pub fn number(&self, index: usize) -> Result<f32> {
        match self.require(index)? {
            ExtensionValue::Number(n) => Ok(*n),
            other => Err(mismatch(index, "a number", other)),
        }
    }

    pub fn text(&self, index: usize) -> Result<&str> {
        match self.require(index)? {
            ExtensionValue::Text(s) => Ok(s),
            other => Err(mismatch(index, "text", other)),
        }
    }

    pub fn element(&self, index: usize) -> Result<ElementId> {
        match self.require(index)? {
            ExtensionValue::Element(id) => Ok(*id),
            other => Err(mismatch(index, "an element", other)),
        }
    }

    pub fn layer(&self, index: usize) -> Result<LayerId> {
        match self.require(index)? {
            ExtensionValue::Layer(id) => Ok(*id),
            other => Err(mismatch(index, "a layer", other)),
        }
    }

    /// A text argument parsed as a color
    pub fn color(&self, index: usize) -> Result<Color> {
        Ok(Color::parse(self.text(index)?)?)
    }
}

impl From<Vec<ExtensionValue>> for ExtensionArgs {
    fn from(values: Vec<ExtensionValue>) -> Self {
        Self { values }
    }
}

fn mismatch(index: usize, expected: &str, got: &ExtensionValue) -> CanvasError {
    CanvasError::Extension(format!("argument {index} must be {expected}, got {got:?}"))
}

/// Name-keyed table of extensions
#[derive(Default)]
pub struct ExtensionRegistry {
    entries: FxHashMap<String, Rc<ExtensionFn>>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `f` under `name`, replacing any previous entry
    pub fn register<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&mut Canvas, &ExtensionArgs) -> Result<ExtensionValue> + 'static,
    {
        let name = name.into();
        tracing::debug!(extension = %name, "register extension");
        if self.entries.insert(name.clone(), Rc::new(f)).is_some() {
            tracing::warn!(extension = %name, "replaced existing extension");
        }
    }

    pub fn unregister(&mut self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub(crate) fn get(&self, name: &str) -> Option<Rc<ExtensionFn>> {
        self.entries.get(name).cloned()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_accessors() {
        let args = ExtensionArgs::new().with(2.5_f32).with("#ff0000").with(LayerId::new(3));

        assert_eq!(args.len(), 3);
        assert_eq!(args.number(0).unwrap(), 2.5);
        assert_eq!(args.text(1).unwrap(), "#ff0000");
        assert_eq!(args.color(1).unwrap(), Color::RED);
        assert_eq!(args.layer(2).unwrap(), LayerId::new(3));
    }

    #[test]
    fn test_accessor_errors() {
        let args = ExtensionArgs::from(vec![ExtensionValue::Bool(true), "nope".into()]);

        assert!(matches!(args.number(0), Err(CanvasError::Extension(_))));
        assert!(matches!(args.text(5), Err(CanvasError::Extension(_))));
        assert!(matches!(args.color(1), Err(CanvasError::InvalidColor(_))));
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = ExtensionRegistry::new();
        registry.register("noop", |_, _| Ok(ExtensionValue::None));
        registry.register("noop", |_, _| Ok(ExtensionValue::Bool(true)));
        registry.register("another", |_, _| Ok(ExtensionValue::None));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["another", "noop"]);
        assert!(registry.unregister("another"));
        assert!(!registry.contains("another"));
    }
}
