use std::collections::HashMap;
use std::fmt;

use log::{debug, error};

use crate::layouts::{CheckboxLayout, RadioLayout, ScaleLayout, TextLayout};
use crate::{LayoutContext, QuestionLayout};

/// Error returned by a layout factory.
#[derive(Debug, thiserror::Error)]
pub enum LayoutBuildError {
    /// The layout cannot be used in this environment.
    #[error("Layout unavailable: {0}")]
    Unavailable(String),

    /// Any other construction failure.
    #[error("Layout construction failed: {0}")]
    Backend(#[from] anyhow::Error),
}

/// Creates a fresh layout for one question.
pub type LayoutFactory =
    Box<dyn Fn(&LayoutContext) -> Result<Box<dyn QuestionLayout>, LayoutBuildError>>;

/// Maps record `type` names to layout factories.
#[derive(Default)]
pub struct LayoutRegistry {
    factories: HashMap<String, LayoutFactory>,
}

impl LayoutRegistry {
    /// Create an empty registry. Every record will use the default layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in `text`, `radio`, `checkbox` and `scale` layouts.
    pub fn with_builtin_layouts() -> Self {
        let mut registry = Self::new();
        registry.register_default::<TextLayout>(TextLayout::TYPE);
        registry.register_default::<RadioLayout>(RadioLayout::TYPE);
        registry.register_default::<CheckboxLayout>(CheckboxLayout::TYPE);
        registry.register_default::<ScaleLayout>(ScaleLayout::TYPE);
        registry
    }

    /// Register a factory, replacing any previous one for the same type.
    pub fn register<F>(&mut self, layout_type: impl Into<String>, factory: F)
    where
        F: Fn(&LayoutContext) -> Result<Box<dyn QuestionLayout>, LayoutBuildError> + 'static,
    {
        self.factories.insert(layout_type.into(), Box::new(factory));
    }

    /// Register a layout that is built with `Default::default()`.
    pub fn register_default<L>(&mut self, layout_type: impl Into<String>)
    where
        L: QuestionLayout + Default + 'static,
    {
        self.register(layout_type, |_| {
            Ok(Box::new(L::default()) as Box<dyn QuestionLayout>)
        });
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_layout<F>(mut self, layout_type: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&LayoutContext) -> Result<Box<dyn QuestionLayout>, LayoutBuildError> + 'static,
    {
        self.register(layout_type, factory);
        self
    }

    /// Check if a factory is registered for the type.
    pub fn contains(&self, layout_type: &str) -> bool {
        self.factories.contains_key(layout_type)
    }

    /// All registered type names, sorted.
    pub fn types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// Build a layout for the type.
    ///
    /// Returns `None` if the type is not registered or its factory fails; the
    /// failure is logged.
    pub fn instantiate(
        &self,
        layout_type: &str,
        context: &LayoutContext,
    ) -> Option<Box<dyn QuestionLayout>> {
        let Some(factory) = self.factories.get(layout_type) else {
            debug!("No layout registered for type '{}'", layout_type);
            return None;
        };

        match factory(context) {
            Ok(layout) => Some(layout),
            Err(err) => {
                error!("Failed to build layout for type '{}': {}", layout_type, err);
                None
            }
        }
    }
}

impl fmt::Debug for LayoutRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutRegistry")
            .field("types", &self.types())
            .finish()
    }
}
