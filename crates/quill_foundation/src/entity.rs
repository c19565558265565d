//! Native entity type identifiers and orientations.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a native entity type, such as `minecraft:zombie`.
///
/// Identifiers are always stored lowercase and fully qualified.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityTypeId {
    /// Namespace the type belongs to (e.g. `minecraft`).
    pub namespace: Arc<str>,
    /// Path of the type inside its namespace (e.g. `zombie`).
    pub path: Arc<str>,
}

impl EntityTypeId {
    /// Creates an identifier from an explicit namespace and path.
    #[must_use]
    pub fn new(namespace: &str, path: &str) -> Self {
        Self {
            namespace: namespace.to_lowercase().into(),
            path: path.to_lowercase().into(),
        }
    }

    /// Parses `namespace:path`, applying `default_namespace` when the input
    /// has no namespace.
    ///
    /// Returns `None` for empty input or an empty component.
    #[must_use]
    pub fn parse(input: &str, default_namespace: &str) -> Option<Self> {
        let input = input.trim();
        let (namespace, path) = match input.split_once(':') {
            Some((ns, path)) => (ns, path),
            None => (default_namespace, input),
        };
        if namespace.is_empty() || path.is_empty() || path.contains(':') {
            return None;
        }
        Some(Self::new(namespace, path))
    }
}

impl fmt::Debug for EntityTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityTypeId({}:{})", self.namespace, self.path)
    }
}

impl fmt::Display for EntityTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

/// Orientation applied to a spawned entity.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rotation {
    /// Rotation around the lateral axis, in degrees.
    pub pitch: f64,
    /// Rotation around the vertical axis, in degrees.
    pub yaw: f64,
    /// Rotation around the longitudinal axis, in degrees.
    pub roll: f64,
}

impl Rotation {
    /// Creates a rotation.
    #[must_use]
    pub const fn new(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Parses `pitch,yaw,roll`. Missing trailing components default to zero.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let mut parts = [0.0; 3];
        let mut count = 0;
        for piece in input.split(',') {
            if count == 3 {
                return None;
            }
            parts[count] = piece.trim().parse().ok()?;
            count += 1;
        }
        Some(Self::new(parts[0], parts[1], parts[2]))
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.pitch, self.yaw, self.roll)
    }
}
