//! Steps valid on every value.

use quill_foundation::{Type, Value};

use crate::registry::TagRegistry;

pub(crate) fn register(tags: &mut TagRegistry) {
    tags.register_step(Type::Any, "to_text", |call| {
        Ok(Value::text(call.value.to_string()))
    });
    tags.register_step(Type::Any, "type", |call| {
        Ok(Value::text(call.value.value_type().name()))
    });
    tags.register_step(Type::Any, "is_null", |call| Ok(Value::Bool(call.value.is_null())));
}
