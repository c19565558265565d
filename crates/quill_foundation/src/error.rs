//! Error types for the Quill system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Every evaluation and resolution step returns [`crate::Result`]; the first
//! error aborts the whole operation.

use std::fmt;

use thiserror::Error;

use crate::types::Type;

/// The main error type for Quill operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: Type, actual: Type) -> Self {
        Self::new(ErrorKind::TypeMismatch { expected, actual })
    }

    /// Wraps an error raised while evaluating the tag written as `tag`.
    #[must_use]
    pub fn tag_resolution(tag: impl Into<String>, source: Error) -> Self {
        Self::new(ErrorKind::TagResolution {
            tag: tag.into(),
            source: Box::new(source),
        })
    }

    /// Creates a free-form failure, used by tag handlers.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Creates an unknown tag error. `on` is `None` for the root namespace.
    #[must_use]
    pub fn unknown_tag(tag: impl Into<String>, on: Option<Type>) -> Self {
        Self::new(ErrorKind::UnknownTag {
            tag: tag.into(),
            on: on.map_or_else(|| "root".to_string(), |t| t.name().to_string()),
        })
    }

    /// Creates an invalid property error.
    #[must_use]
    pub fn invalid_property(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidProperty(message.into()))
    }

    /// Creates a missing base error.
    #[must_use]
    pub fn missing_base(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingBase(message.into()))
    }

    /// Creates a task type error.
    #[must_use]
    pub fn task_type(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TaskType(message.into()))
    }

    /// Creates a malformed script error.
    #[must_use]
    pub fn malformed_script(script: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedScript {
            script: script.into(),
            message: message.into(),
        })
    }

    /// Creates a parse error at a byte position of the argument text.
    #[must_use]
    pub fn parse(message: impl Into<String>, position: usize) -> Self {
        Self::new(ErrorKind::Parse {
            message: message.into(),
            position,
        })
    }

    /// Returns the kind of the error that started this failure, looking
    /// through any tag resolution wrappers.
    #[must_use]
    pub fn innermost(&self) -> &ErrorKind {
        let mut current = self;
        while let ErrorKind::TagResolution { source, .. } = &current.kind {
            current = source;
        }
        &current.kind
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A tag step or its parameter failed.
    #[error("tag <{tag}> failed: {source}")]
    TagResolution {
        /// Source text of the failing tag.
        tag: String,
        /// The originating failure.
        source: Box<Error>,
    },

    /// No handler exists for a step against the value it was applied to.
    #[error("unknown tag '{tag}' on {on}")]
    UnknownTag {
        /// The unresolved step name.
        tag: String,
        /// The value category it was attempted against.
        on: String,
    },

    /// Property key not known, or a reserved key used where it cannot be.
    #[error("invalid property: {0}")]
    InvalidProperty(String),

    /// A value could not be converted to the expected shape.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected category.
        expected: Type,
        /// The category encountered.
        actual: Type,
    },

    /// The base of an entity script names neither a type nor a script.
    #[error("missing base: {0}")]
    MissingBase(String),

    /// Unregistered AI task type or a task missing a required parameter.
    #[error("task type error: {0}")]
    TaskType(String),

    /// A script inherits from itself, directly or indirectly.
    #[error("cyclic inheritance: {}", chain.join(" -> "))]
    CyclicInheritance {
        /// The inheritance chain that closed the cycle.
        chain: Vec<String>,
    },

    /// A script definition cannot be used at all.
    #[error("malformed script '{script}': {message}")]
    MalformedScript {
        /// The script name.
        script: String,
        /// What is wrong with it.
        message: String,
    },

    /// Argument text could not be compiled.
    #[error("parse error at {position}: {message}")]
    Parse {
        /// Description of the problem.
        message: String,
        /// Byte offset in the argument text.
        position: usize,
    },

    /// A spawn location cannot be used.
    #[error("invalid location: {0}")]
    InvalidLocation(String),

    /// Internal error or free-form tag failure.
    #[error("{0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Script or key the error belongs to.
    pub source: Option<String>,
    /// Stack of resolution frames, outermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "in {source}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
