//! Property keys: which names a script may set and how values are converted.
//!
//! Script authors write key names loosely (`Max Health`, `max-health`), so
//! names are normalized to lowercase snake case before lookup. A few names
//! are reserved because the resolver handles them itself; they can never be
//! registered as properties.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use quill_foundation::{Error, Result, Value};

/// Keys handled directly by the resolver.
pub const RESERVED_KEYS: [&str; 3] = ["orientation", "rotation", "clear_ai_tasks"];

/// Normalizes a key name: trimmed, lowercased, spaces and dashes become `_`.
#[must_use]
pub fn normalize_key(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

/// Returns true if `name` is one of the [`RESERVED_KEYS`].
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    RESERVED_KEYS.contains(&normalize_key(name).as_str())
}

/// The value shape a property expects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    /// `true` / `false`.
    Boolean,
    /// Whole number.
    Integer,
    /// Integer or decimal.
    Number,
    /// Plain text.
    Text,
    /// Rich text; plain input is read as legacy colour codes.
    FormattedText,
    /// List whose elements all have the inner shape.
    List(Box<Shape>),
    /// Text-keyed map.
    Map,
    /// Anything, unchanged.
    Any,
}

impl Shape {
    /// Converts a value to this shape.
    ///
    /// # Errors
    /// Returns a type mismatch if the value cannot take this shape.
    pub fn convert(&self, value: &Value) -> Result<Value> {
        match self {
            Self::Boolean => value.to_boolean().map(Value::Bool),
            Self::Integer => value.to_int().map(Value::Int),
            Self::Number => value.to_numeric(),
            Self::Text => Ok(match value {
                Value::Text(_) => value.clone(),
                other => Value::text(other.to_string()),
            }),
            Self::FormattedText => Ok(Value::FormattedText(value.to_formatted())),
            Self::List(inner) => value
                .to_list()?
                .iter()
                .map(|item| inner.convert(item))
                .collect::<Result<_>>()
                .map(Value::List),
            Self::Map => value.to_map().map(Value::Map),
            Self::Any => Ok(value.clone()),
        }
    }
}

/// Custom conversion for keys whose values do not fit a [`Shape`].
pub type Converter = Arc<dyn Fn(&Value) -> Result<Value> + Send + Sync>;

#[derive(Clone)]
enum Conversion {
    Shape(Shape),
    Custom(Converter),
}

/// A registered property key.
#[derive(Clone)]
pub struct KeyDescriptor {
    name: String,
    conversion: Conversion,
}

impl KeyDescriptor {
    /// Creates a key converted by shape.
    #[must_use]
    pub fn new(name: &str, shape: Shape) -> Self {
        Self {
            name: normalize_key(name),
            conversion: Conversion::Shape(shape),
        }
    }

    /// Creates a key with its own converter.
    #[must_use]
    pub fn custom<F>(name: &str, converter: F) -> Self
    where
        F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: normalize_key(name),
            conversion: Conversion::Custom(Arc::new(converter)),
        }
    }

    /// Returns the normalized key name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the shape, or `None` for custom converters.
    #[must_use]
    pub fn shape(&self) -> Option<&Shape> {
        match &self.conversion {
            Conversion::Shape(shape) => Some(shape),
            Conversion::Custom(_) => None,
        }
    }

    /// Converts a value for this key.
    ///
    /// # Errors
    /// Returns the conversion failure.
    pub fn convert(&self, value: &Value) -> Result<Value> {
        match &self.conversion {
            Conversion::Shape(shape) => shape.convert(value),
            Conversion::Custom(converter) => converter(value),
        }
    }
}

impl fmt::Debug for KeyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.conversion {
            Conversion::Shape(shape) => write!(f, "{}: {shape:?}", self.name),
            Conversion::Custom(_) => write!(f, "{}: custom", self.name),
        }
    }
}

/// Table of property keys.
#[derive(Clone, Debug, Default)]
pub struct PropertyKeyMapper {
    keys: HashMap<String, KeyDescriptor>,
}

impl PropertyKeyMapper {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table with the common entity properties.
    #[must_use]
    pub fn standard() -> Self {
        let mut mapper = Self::new();
        let catalog = [
            ("display_name", Shape::FormattedText),
            ("max_health", Shape::Number),
            ("health", Shape::Number),
            ("fire_ticks", Shape::Integer),
            ("is_sheared", Shape::Boolean),
            ("glowing", Shape::Boolean),
            ("invisible", Shape::Boolean),
            ("custom_name_visible", Shape::Boolean),
            ("persists", Shape::Boolean),
            ("age", Shape::Integer),
            ("ai_enabled", Shape::Boolean),
            ("silent", Shape::Boolean),
            ("gravity", Shape::Boolean),
            ("equipment", Shape::Map),
            ("passengers", Shape::List(Box::new(Shape::Text))),
        ];
        for (name, shape) in catalog {
            mapper.keys.insert(name.to_string(), KeyDescriptor::new(name, shape));
        }
        mapper
    }

    /// Registers a key, replacing one of the same name.
    ///
    /// # Errors
    /// Fails for reserved key names.
    pub fn register(&mut self, descriptor: KeyDescriptor) -> Result<()> {
        if is_reserved(&descriptor.name) {
            return Err(Error::invalid_property(format!(
                "'{}' is reserved and cannot be registered",
                descriptor.name
            )));
        }
        self.keys.insert(descriptor.name.clone(), descriptor);
        Ok(())
    }

    /// Finds a key by name.
    #[must_use]
    pub fn key_for(&self, name: &str) -> Option<&KeyDescriptor> {
        self.keys.get(&normalize_key(name))
    }

    /// Finds a key by name.
    ///
    /// # Errors
    /// Fails for unknown and reserved names.
    pub fn lookup(&self, name: &str) -> Result<&KeyDescriptor> {
        if is_reserved(name) {
            return Err(Error::invalid_property(format!(
                "'{}' is handled by the resolver and is not a property",
                normalize_key(name)
            )));
        }
        self.key_for(name).ok_or_else(|| {
            Error::invalid_property(format!("key '{}' does not seem to exist", name.trim()))
        })
    }

    /// Converts a value through a key's shape or converter.
    ///
    /// # Errors
    /// Returns a type mismatch if the value cannot be converted.
    pub fn convert(&self, descriptor: &KeyDescriptor, value: &Value) -> Result<Value> {
        descriptor.convert(value)
    }

    /// Looks up `name` and converts `value` for it.
    ///
    /// # Errors
    /// Fails for unknown keys or values that cannot be converted.
    pub fn apply(&self, name: &str, value: &Value) -> Result<(String, Value)> {
        let descriptor = self.lookup(name)?;
        let converted = self.convert(descriptor, value)?;
        Ok((descriptor.name.clone(), converted))
    }

    /// Returns the number of registered keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if no keys are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
