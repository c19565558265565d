//! Core values, types, errors, and persistent collections for Quill.
//!
//! This crate provides:
//! - [`Value`] - The typed value every tag evaluates to
//! - [`Type`] - Value categories used for tag dispatch and conversion errors
//! - [`EntityTypeId`] / [`Rotation`] - Native entity type identifiers and orientations
//! - [`FormattedText`] - Rich text parsed from legacy colour codes
//! - [`Error`] - Rich error types with context
//! - Persistent collections ([`QVec`], [`QMap`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod collections;
mod entity;
mod error;
mod text;
mod types;
mod value;

pub use collections::{QMap, QVec};
pub use entity::{EntityTypeId, Rotation};
pub use error::{Error, ErrorContext, ErrorKind};
pub use text::{Color, FormattedText, TextSpan};
pub use types::Type;
pub use value::Value;

/// Result type used throughout Quill.
pub type Result<T> = std::result::Result<T, Error>;
