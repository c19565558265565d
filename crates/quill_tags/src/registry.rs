//! Tag handler registry and chain resolution.
//!
//! Handlers are keyed by the category of the value a step is applied to and
//! the step name. Each category module registers its own handlers, so the
//! resolver itself never inspects values beyond asking for their [`Type`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use quill_foundation::{Error, Result, Type, Value};

use crate::chain::{TagChain, TagStep};
use crate::context::TagContext;
use crate::handlers;

/// A tag handler.
///
/// Handlers are shared closures so higher layers can capture their own
/// collaborators, such as a type directory.
pub type TagHandler = Arc<dyn Fn(&TagCall<'_>) -> Result<Value> + Send + Sync>;

/// Everything a handler gets to see for one step.
pub struct TagCall<'a> {
    /// The lowercased step name.
    pub step: &'a str,
    /// The value the step is applied to. [`Value::Null`] for roots.
    pub value: &'a Value,
    /// The evaluated bracket parameter, if one was written.
    pub param: Option<Value>,
    /// The evaluation context.
    pub context: &'a TagContext,
}

impl TagCall<'_> {
    /// Returns the parameter or fails naming the step.
    ///
    /// # Errors
    /// Fails if the step was written without a parameter.
    pub fn param(&self) -> Result<&Value> {
        self.param
            .as_ref()
            .ok_or_else(|| Error::failed(format!("tag '{}' requires a parameter", self.step)))
    }

    /// Returns the parameter rendered as text.
    ///
    /// # Errors
    /// Fails if the step was written without a parameter.
    pub fn param_text(&self) -> Result<String> {
        self.param().map(ToString::to_string)
    }

    /// Returns the parameter as a decimal number.
    ///
    /// # Errors
    /// Fails without a parameter or if it is not numeric.
    pub fn param_float(&self) -> Result<f64> {
        self.param()?.to_float()
    }

    /// Returns the parameter as an integer or decimal, keeping integers integral.
    ///
    /// # Errors
    /// Fails without a parameter or if it is not numeric.
    pub fn param_numeric(&self) -> Result<Value> {
        self.param()?.to_numeric()
    }
}

/// Root providers and per-category step handlers.
///
/// Cloning shares the handlers.
#[derive(Clone, Default)]
pub struct TagRegistry {
    roots: HashMap<String, TagHandler>,
    steps: HashMap<Type, HashMap<String, TagHandler>>,
}

impl TagRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the core handlers for every value category.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        handlers::register_core(&mut registry);
        registry
    }

    /// Registers a root provider, replacing any earlier one of that name.
    pub fn register_root<F>(&mut self, name: &str, handler: F)
    where
        F: Fn(&TagCall<'_>) -> Result<Value> + Send + Sync + 'static,
    {
        self.roots.insert(name.to_lowercase(), Arc::new(handler));
    }

    /// Registers a step handler for values of category `on`.
    ///
    /// Handlers registered for [`Type::Any`] apply to every category that has
    /// no handler of its own under that name.
    pub fn register_step<F>(&mut self, on: Type, name: &str, handler: F)
    where
        F: Fn(&TagCall<'_>) -> Result<Value> + Send + Sync + 'static,
    {
        self.insert_step(on, name, Arc::new(handler));
    }

    /// Registers one step handler for both integers and decimals.
    pub fn register_step_for_numbers<F>(&mut self, name: &str, handler: F)
    where
        F: Fn(&TagCall<'_>) -> Result<Value> + Send + Sync + 'static,
    {
        let handler: TagHandler = Arc::new(handler);
        self.insert_step(Type::Int, name, Arc::clone(&handler));
        self.insert_step(Type::Float, name, handler);
    }

    fn insert_step(&mut self, on: Type, name: &str, handler: TagHandler) {
        self.steps
            .entry(on)
            .or_default()
            .insert(name.to_lowercase(), handler);
    }

    /// Returns true if a root of this name is registered.
    #[must_use]
    pub fn has_root(&self, name: &str) -> bool {
        self.roots.contains_key(&name.to_lowercase())
    }

    /// Finds the handler for `name` applied to a value of category `on`.
    #[must_use]
    pub fn step_handler(&self, on: Type, name: &str) -> Option<&TagHandler> {
        self.steps
            .get(&on)
            .and_then(|table| table.get(name))
            .or_else(|| self.steps.get(&Type::Any).and_then(|table| table.get(name)))
    }

    /// Resolves a compiled chain to a value.
    ///
    /// # Errors
    /// Fails on the first step that has no handler or whose handler fails.
    /// Errors from parameters propagate unchanged.
    pub fn resolve(&self, chain: &TagChain, context: &TagContext) -> Result<Value> {
        let mut value = self.resolve_root(chain.root(), context)?;
        for step in &chain.steps()[1..] {
            let handler = self
                .step_handler(value.value_type(), &step.name)
                .ok_or_else(|| Error::unknown_tag(&step.name, Some(value.value_type())))?;
            let call = TagCall {
                step: &step.name,
                value: &value,
                param: self.evaluate_param(step, context)?,
                context,
            };
            value = handler(&call)?;
        }
        Ok(value)
    }

    fn resolve_root(&self, root: &TagStep, context: &TagContext) -> Result<Value> {
        if root.is_definition() {
            let name = self
                .evaluate_param(root, context)?
                .map(|v| v.to_string())
                .unwrap_or_default();
            return context
                .definition(&name)
                .cloned()
                .ok_or_else(|| Error::failed(format!("no definition named '{name}'")));
        }
        if root.param.is_none() {
            if let Some(bound) = context.definition(&root.name) {
                return Ok(bound.clone());
            }
        }
        let handler = self
            .roots
            .get(&root.name)
            .ok_or_else(|| Error::unknown_tag(&root.name, None))?;
        handler(&TagCall {
            step: &root.name,
            value: &Value::Null,
            param: self.evaluate_param(root, context)?,
            context,
        })
    }

    fn evaluate_param(&self, step: &TagStep, context: &TagContext) -> Result<Option<Value>> {
        step.param
            .as_ref()
            .map(|param| param.evaluate(self, context))
            .transpose()
    }
}

impl fmt::Debug for TagRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut roots: Vec<_> = self.roots.keys().collect();
        roots.sort();
        let steps: usize = self.steps.values().map(HashMap::len).sum();
        f.debug_struct("TagRegistry")
            .field("roots", &roots)
            .field("steps", &steps)
            .finish()
    }
}
