//! Evaluation context: variable bindings and resolution mode.

use std::sync::Arc;

use quill_foundation::{QMap, Value};

/// How the current evaluation relates to the live game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Resolution {
    /// Per-use evaluation; tags may read per-use context.
    #[default]
    Live,
    /// Load-time evaluation of static scripts. Tags that need a live caller
    /// refuse to evaluate.
    Static,
}

/// Variable bindings visible to tags, plus the resolution mode.
///
/// Binding names are case-insensitive. Bindings live in a persistent map, so
/// [`TagContext::child`] is O(1) and never leaks definitions back to the parent.
#[derive(Clone, Debug, Default)]
pub struct TagContext {
    definitions: QMap<Arc<str>, Value>,
    resolution: Resolution,
}

impl TagContext {
    /// Creates an empty live context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the sentinel context used to force static scripts at load
    /// time. It carries no bindings.
    #[must_use]
    pub fn static_sentinel() -> Self {
        Self {
            definitions: QMap::new(),
            resolution: Resolution::Static,
        }
    }

    /// Returns the resolution mode.
    #[must_use]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Returns true for the static sentinel context.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.resolution == Resolution::Static
    }

    /// Returns a copy of this context sharing its bindings.
    #[must_use]
    pub fn child(&self) -> Self {
        self.clone()
    }

    /// Binds `name` to `value`, replacing any earlier binding.
    pub fn define(&mut self, name: &str, value: Value) {
        self.definitions = self
            .definitions
            .insert(Arc::from(name.to_lowercase().as_str()), value);
    }

    /// Builder form of [`TagContext::define`].
    #[must_use]
    pub fn with_definition(mut self, name: &str, value: Value) -> Self {
        self.define(name, value);
        self
    }

    /// Looks up a binding.
    #[must_use]
    pub fn definition(&self, name: &str) -> Option<&Value> {
        self.definitions.get(name.to_lowercase().as_str())
    }

    /// Returns every binding, ordered by name.
    pub fn definitions(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.definitions.iter().map(|(k, v)| (&**k, v))
    }
}
