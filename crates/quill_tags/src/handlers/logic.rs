//! Boolean steps.

use quill_foundation::{Type, Value};

use crate::registry::TagRegistry;

pub(crate) fn register(tags: &mut TagRegistry) {
    tags.register_step(Type::Bool, "not", |call| {
        Ok(Value::Bool(!call.value.to_boolean()?))
    });
    tags.register_step(Type::Bool, "and", |call| {
        let other = call.param()?.to_boolean()?;
        Ok(Value::Bool(call.value.to_boolean()? && other))
    });
    tags.register_step(Type::Bool, "or", |call| {
        let other = call.param()?.to_boolean()?;
        Ok(Value::Bool(call.value.to_boolean()? || other))
    });
}
