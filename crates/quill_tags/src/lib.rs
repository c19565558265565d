//! Argument compiler, tag chain resolver, and core tag handlers for Quill.
//!
//! This crate provides:
//! - [`Argument`] - Raw script text compiled into literal and tag segments
//! - [`TagChain`] - A dotted, bracket-parameterised tag such as `<[base].get[health]>`
//! - [`TagRegistry`] - Root providers and per-category step handlers
//! - [`TagContext`] - Variable bindings plus the live/static resolution mode
//!
//! # Example
//!
//! ```
//! use quill_tags::{Argument, TagContext, TagRegistry};
//! use quill_foundation::Value;
//!
//! let tags = TagRegistry::standard();
//! let arg = Argument::compile("<number[40].add[2]>").unwrap();
//! let value = arg.evaluate(&tags, &TagContext::new()).unwrap();
//! assert_eq!(value, Value::Int(42));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod argument;
mod chain;
mod context;
pub mod handlers;
mod parser;
mod registry;

pub use argument::{Argument, Segment};
pub use chain::{TagChain, TagStep};
pub use context::{Resolution, TagContext};
pub use registry::{TagCall, TagHandler, TagRegistry};
