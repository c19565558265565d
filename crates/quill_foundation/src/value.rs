//! Core value type produced by tag evaluation.

use std::fmt;
use std::sync::Arc;

use crate::collections::{QMap, QVec};
use crate::entity::{EntityTypeId, Rotation};
use crate::error::Error;
use crate::text::FormattedText;
use crate::types::Type;
use crate::Result;

/// Core value type for all Quill data.
///
/// Values are immutable and cheaply cloneable. Lists and maps use
/// structural sharing via persistent data structures.
#[derive(Clone)]
pub enum Value {
    /// The null value (represents absence).
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Plain text.
    Text(Arc<str>),
    /// Rich text.
    FormattedText(Arc<FormattedText>),
    /// Persistent list.
    List(QVec<Value>),
    /// Persistent map with text keys.
    Map(QMap<Arc<str>, Value>),
    /// Native entity type.
    EntityType(EntityTypeId),
    /// Reference to an entity script by its registered name.
    Script(Arc<str>),
    /// Orientation.
    Rotation(Rotation),
}

impl Value {
    /// Creates a text value.
    #[must_use]
    pub fn text(s: impl AsRef<str>) -> Self {
        Self::Text(s.as_ref().into())
    }

    /// Creates a script reference.
    #[must_use]
    pub fn script(name: impl AsRef<str>) -> Self {
        Self::Script(name.as_ref().into())
    }

    /// Creates a map value from key/value pairs.
    #[must_use]
    pub fn map_of<K: AsRef<str>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (Arc::from(k.as_ref()), v))
                .collect(),
        )
    }

    /// Returns the category of this value.
    #[must_use]
    pub fn value_type(&self) -> Type {
        match self {
            Self::Null => Type::Null,
            Self::Bool(_) => Type::Bool,
            Self::Int(_) => Type::Int,
            Self::Float(_) => Type::Float,
            Self::Text(_) => Type::Text,
            Self::FormattedText(_) => Type::FormattedText,
            Self::List(_) => Type::List,
            Self::Map(_) => Type::Map,
            Self::EntityType(_) => Type::EntityType,
            Self::Script(_) => Type::Script,
            Self::Rotation(_) => Type::Rotation,
        }
    }

    /// Returns true if this value is null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Attempts to extract a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to extract an integer value.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a number as f64 (converts int to float).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a text reference.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Script(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract a list reference.
    #[must_use]
    pub const fn as_list(&self) -> Option<&QVec<Value>> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    /// Attempts to extract a map reference.
    #[must_use]
    pub const fn as_map(&self) -> Option<&QMap<Arc<str>, Value>> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Attempts to extract an entity type.
    #[must_use]
    pub const fn as_entity_type(&self) -> Option<&EntityTypeId> {
        match self {
            Self::EntityType(id) => Some(id),
            _ => None,
        }
    }

    // =========================================================================
    // Conversions
    // =========================================================================
    // Script values usually arrive as text; these accept either the native
    // variant or text that spells it.

    /// Converts to a boolean. Accepts `true`/`false` text in any case.
    ///
    /// # Errors
    /// Returns a type mismatch for anything else.
    pub fn to_boolean(&self) -> Result<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            Self::Text(s) if s.trim().eq_ignore_ascii_case("true") => Ok(true),
            Self::Text(s) if s.trim().eq_ignore_ascii_case("false") => Ok(false),
            other => Err(Error::type_mismatch(Type::Bool, other.value_type())),
        }
    }

    /// Converts to an integer. Accepts integral decimals and numeric text.
    ///
    /// Decimals outside the `i64` range are rejected rather than clamped.
    ///
    /// # Errors
    /// Returns a type mismatch for anything else.
    pub fn to_int(&self) -> Result<i64> {
        match self {
            Self::Int(n) => Ok(*n),
            Self::Float(n) => {
                integral(*n).ok_or_else(|| Error::type_mismatch(Type::Int, Type::Float))
            }
            Self::Text(s) => {
                let trimmed = s.trim();
                trimmed
                    .parse::<i64>()
                    .ok()
                    .or_else(|| trimmed.parse::<f64>().ok().and_then(integral))
                    .ok_or_else(|| Error::type_mismatch(Type::Int, Type::Text))
            }
            other => Err(Error::type_mismatch(Type::Int, other.value_type())),
        }
    }

    /// Converts to a decimal number. Accepts integers and numeric text.
    ///
    /// # Errors
    /// Returns a type mismatch for anything else.
    pub fn to_float(&self) -> Result<f64> {
        match self {
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| Error::type_mismatch(Type::Float, Type::Text)),
            other => other
                .as_number()
                .ok_or_else(|| Error::type_mismatch(Type::Float, other.value_type())),
        }
    }

    /// Converts to a number, keeping integers integral.
    ///
    /// # Errors
    /// Returns a type mismatch if the value is not numeric.
    pub fn to_numeric(&self) -> Result<Value> {
        match self {
            Self::Int(_) | Self::Float(_) => Ok(self.clone()),
            Self::Text(s) => match s.trim().parse::<i64>() {
                Ok(n) => Ok(Self::Int(n)),
                Err(_) => self.to_float().map(Self::Float),
            },
            other => Err(Error::type_mismatch(Type::Float, other.value_type())),
        }
    }

    /// Converts to a list. Text is split on `|`; empty text is an empty list.
    ///
    /// # Errors
    /// Returns a type mismatch for values that are neither lists nor text.
    pub fn to_list(&self) -> Result<QVec<Value>> {
        match self {
            Self::List(v) => Ok(v.clone()),
            Self::Text(s) => Ok(Self::parse_list(s)),
            other => Err(Error::type_mismatch(Type::List, other.value_type())),
        }
    }

    /// Converts to a map. Text is parsed as `key:value|key:value`.
    ///
    /// # Errors
    /// Returns a type mismatch for values that are neither maps nor
    /// well-formed map text.
    pub fn to_map(&self) -> Result<QMap<Arc<str>, Value>> {
        match self {
            Self::Map(m) => Ok(m.clone()),
            Self::Text(s) => {
                Self::parse_map(s).ok_or_else(|| Error::type_mismatch(Type::Map, Type::Text))
            }
            other => Err(Error::type_mismatch(Type::Map, other.value_type())),
        }
    }

    /// Converts to rich text. Non-rich values are parsed as legacy-coloured text.
    #[must_use]
    pub fn to_formatted(&self) -> Arc<FormattedText> {
        match self {
            Self::FormattedText(t) => Arc::clone(t),
            other => Arc::new(FormattedText::from_legacy(&other.to_string())),
        }
    }

    /// Converts to a rotation. Accepts `pitch,yaw,roll` text or a list of numbers.
    ///
    /// # Errors
    /// Returns a type mismatch for anything else.
    pub fn to_rotation(&self) -> Result<Rotation> {
        match self {
            Self::Rotation(r) => Ok(*r),
            Self::Text(s) => {
                Rotation::parse(s).ok_or_else(|| Error::type_mismatch(Type::Rotation, Type::Text))
            }
            Self::List(items) if (1..=3).contains(&items.len()) => {
                let mut parts = [0.0; 3];
                for (slot, item) in parts.iter_mut().zip(items.iter()) {
                    *slot = item.to_float()?;
                }
                Ok(Rotation::new(parts[0], parts[1], parts[2]))
            }
            other => Err(Error::type_mismatch(Type::Rotation, other.value_type())),
        }
    }

    /// Parses `a|b|c` into a list of text values.
    #[must_use]
    pub fn parse_list(input: &str) -> QVec<Value> {
        if input.is_empty() {
            return QVec::new();
        }
        input.split('|').map(Value::text).collect()
    }

    /// Parses `key:value|key:value` into a map of text values.
    ///
    /// Keys are trimmed and lowercased. Returns `None` if an entry has no `:`.
    #[must_use]
    pub fn parse_map(input: &str) -> Option<QMap<Arc<str>, Value>> {
        if input.trim().is_empty() {
            return Some(QMap::new());
        }
        input
            .split('|')
            .map(|entry| {
                let (key, value) = entry.split_once(':')?;
                Some((Arc::from(key.trim().to_lowercase().as_str()), Value::text(value)))
            })
            .collect()
    }
}

// Implement PartialEq manually to handle float comparison
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Text(a), Self::Text(b)) | (Self::Script(a), Self::Script(b)) => a == b,
            (Self::FormattedText(a), Self::FormattedText(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::EntityType(a), Self::EntityType(b)) => a == b,
            (Self::Rotation(a), Self::Rotation(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n:?}"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::FormattedText(t) => write!(f, "FormattedText({:?})", t.to_string()),
            Self::List(v) => write!(f, "{v:?}"),
            Self::Map(m) => write!(f, "{m:?}"),
            Self::EntityType(id) => write!(f, "{id:?}"),
            Self::Script(name) => write!(f, "Script({name})"),
            Self::Rotation(r) => write!(f, "Rotation({r})"),
        }
    }
}

/// 2^63, the first decimal above the `i64` range.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Returns `n` as an integer if it is whole and fits in an `i64`.
#[allow(clippy::cast_possible_truncation)]
fn integral(n: f64) -> Option<i64> {
    (n.fract() == 0.0 && (-I64_LIMIT..I64_LIMIT).contains(&n)).then(|| n as i64)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Text(s) | Self::Script(s) => write!(f, "{s}"),
            Self::FormattedText(t) => write!(f, "{t}"),
            Self::List(v) => {
                for (i, item) in v.iter().enumerate() {
                    if i > 0 {
                        write!(f, "|")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Self::Map(m) => {
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 {
                        write!(f, "|")?;
                    }
                    write!(f, "{k}:{v}")?;
                }
                Ok(())
            }
            Self::EntityType(id) => write!(f, "{id}"),
            Self::Rotation(r) => write!(f, "{r}"),
        }
    }
}

// Convenience From implementations

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s.into())
    }
}

impl From<EntityTypeId> for Value {
    fn from(id: EntityTypeId) -> Self {
        Self::EntityType(id)
    }
}

impl From<FormattedText> for Value {
    fn from(text: FormattedText) -> Self {
        Self::FormattedText(Arc::new(text))
    }
}

impl From<Rotation> for Value {
    fn from(r: Rotation) -> Self {
        Self::Rotation(r)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}
