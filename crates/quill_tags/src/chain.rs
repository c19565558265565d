//! Compiled tag chains.

use std::fmt;

use crate::argument::Argument;

/// One step of a tag chain: a name and an optional bracket parameter.
#[derive(Clone, PartialEq)]
pub struct TagStep {
    /// Lowercased step name. Empty for a `[name]` definition root.
    pub name: String,
    /// The bracket parameter, compiled as a nested argument.
    pub param: Option<Argument>,
}

impl TagStep {
    /// Returns true if this step reads a variable binding (`<[name]>`).
    #[must_use]
    pub fn is_definition(&self) -> bool {
        self.name.is_empty() && self.param.is_some()
    }
}

impl fmt::Debug for TagStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.param {
            Some(param) => write!(f, "{}[{}]", self.name, param.source()),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A dotted tag such as `number[3].add[<[bonus]>]`.
///
/// The first step selects the root value, every later step transforms it.
#[derive(Clone, PartialEq)]
pub struct TagChain {
    source: String,
    steps: Vec<TagStep>,
}

impl TagChain {
    pub(crate) fn new(source: &str, steps: Vec<TagStep>) -> Self {
        Self {
            source: source.to_string(),
            steps,
        }
    }

    /// Returns the tag text between the angle brackets.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the steps. Never empty.
    #[must_use]
    pub fn steps(&self) -> &[TagStep] {
        &self.steps
    }

    /// Returns the root step.
    #[must_use]
    pub fn root(&self) -> &TagStep {
        &self.steps[0]
    }
}

impl fmt::Debug for TagChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.source)
    }
}
