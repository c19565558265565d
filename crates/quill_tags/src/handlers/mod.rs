//! Core tag handlers, organized by value category:
//! - `roots`: root providers (`text`, `number`, `map`, escapes, ...)
//! - `any`: steps valid on every value
//! - `text`: text manipulation
//! - `number`: arithmetic and comparison
//! - `logic`: boolean steps
//! - `collection`: list and map steps
//! - `rich`: formatted text and rotation steps
//!
//! Higher layers add their own categories by registering into the same
//! [`TagRegistry`].

mod any;
mod collection;
mod logic;
mod number;
mod rich;
mod roots;
mod text;

use quill_foundation::{Error, Result, Type, Value};

use crate::registry::TagRegistry;

/// Registers every core root and step handler.
pub fn register_core(tags: &mut TagRegistry) {
    roots::register(tags);
    any::register(tags);
    text::register(tags);
    number::register(tags);
    logic::register(tags);
    collection::register(tags);
    rich::register(tags);
}

/// Borrows a text value or reports what was found instead.
fn expect_text(value: &Value) -> Result<&str> {
    value
        .as_str()
        .ok_or_else(|| Error::type_mismatch(Type::Text, value.value_type()))
}
