//! Value categories.
//!
//! A [`Type`] names the runtime category of a [`crate::Value`]. Tag handlers are
//! registered per category, and conversion failures report the category they
//! expected and the one they found.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Runtime category of a value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Type {
    /// The null category (only value: null).
    Null,
    /// Boolean.
    Bool,
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// Plain text.
    Text,
    /// Rich text with colours and styles.
    FormattedText,
    /// Ordered list.
    List,
    /// Map from text keys to values.
    Map,
    /// Native entity type identifier.
    EntityType,
    /// Reference to an entity script.
    Script,
    /// Orientation (pitch, yaw, roll).
    Rotation,
    /// Matches every category. Handlers registered here apply to all values.
    Any,
}

impl Type {
    /// Every concrete category, excluding [`Type::Any`].
    pub const CONCRETE: [Type; 11] = [
        Type::Null,
        Type::Bool,
        Type::Int,
        Type::Float,
        Type::Text,
        Type::FormattedText,
        Type::List,
        Type::Map,
        Type::EntityType,
        Type::Script,
        Type::Rotation,
    ];

    /// Returns the lowercase name used in messages and by the `type` tag.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Int => "integer",
            Self::Float => "decimal",
            Self::Text => "text",
            Self::FormattedText => "formatted text",
            Self::List => "list",
            Self::Map => "map",
            Self::EntityType => "entity type",
            Self::Script => "script",
            Self::Rotation => "rotation",
            Self::Any => "any",
        }
    }

    /// Returns true for the two numeric categories.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
