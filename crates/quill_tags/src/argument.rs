//! Compiled arguments.
//!
//! An [`Argument`] is built once from raw script text and evaluated any number
//! of times. Evaluation never mutates the argument.

use std::fmt;
use std::sync::Arc;

use quill_foundation::{Error, Result, Value};

use crate::chain::TagChain;
use crate::context::TagContext;
use crate::parser::Splitter;
use crate::registry::TagRegistry;

/// One piece of an argument.
#[derive(Clone, Debug, PartialEq)]
pub enum Segment {
    /// Text copied through unchanged.
    Literal(String),
    /// A tag resolved at evaluation time.
    Tag(TagChain),
}

/// Raw script text compiled into literal and tag segments.
///
/// Cloning is cheap; compiled segments are shared.
#[derive(Clone, PartialEq)]
pub struct Argument {
    source: Arc<str>,
    segments: Arc<[Segment]>,
}

impl Argument {
    /// Compiles raw text.
    ///
    /// # Errors
    /// Returns a parse error for malformed tags (stray `]`, text after a
    /// closing `]`, empty step names, a trailing `.`) and for tags nested
    /// more than 128 parameters deep.
    pub fn compile(raw: &str) -> Result<Self> {
        Self::compile_at(raw, 0, 0)
    }

    /// Compiles text that starts at byte `offset` of an enclosing argument,
    /// inside `depth` tag parameters.
    pub(crate) fn compile_at(raw: &str, offset: usize, depth: usize) -> Result<Self> {
        let segments = Splitter::new(raw, offset, depth).split()?;
        Ok(Self {
            source: raw.into(),
            segments: segments.into(),
        })
    }

    /// Returns the original text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the compiled segments.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns true if the argument contains no tags.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, Segment::Literal(_)))
    }

    /// Evaluates the argument.
    ///
    /// An argument made of exactly one tag returns that tag's value as-is,
    /// so maps, booleans and other typed values survive. Anything else is
    /// concatenated into text.
    ///
    /// # Errors
    /// The first failing tag aborts evaluation with a tag resolution error
    /// wrapping the original failure.
    pub fn evaluate(&self, tags: &TagRegistry, context: &TagContext) -> Result<Value> {
        match &*self.segments {
            [] => Ok(Value::text("")),
            [Segment::Literal(text)] => Ok(Value::text(text)),
            [Segment::Tag(chain)] => resolve(chain, tags, context),
            segments => {
                let mut out = String::with_capacity(self.source.len());
                for segment in segments {
                    match segment {
                        Segment::Literal(text) => out.push_str(text),
                        Segment::Tag(chain) => {
                            out.push_str(&resolve(chain, tags, context)?.to_string());
                        }
                    }
                }
                Ok(Value::Text(out.into()))
            }
        }
    }

    /// Evaluates the argument and renders the result as text.
    ///
    /// # Errors
    /// Propagates evaluation errors.
    pub fn evaluate_text(&self, tags: &TagRegistry, context: &TagContext) -> Result<String> {
        self.evaluate(tags, context).map(|v| v.to_string())
    }
}

fn resolve(chain: &TagChain, tags: &TagRegistry, context: &TagContext) -> Result<Value> {
    tags.resolve(chain, context)
        .map_err(|e| Error::tag_resolution(chain.source(), e))
}

impl fmt::Debug for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Argument({:?})", self.source)
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}
