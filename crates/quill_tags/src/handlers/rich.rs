//! Formatted text and rotation steps.

use quill_foundation::{Error, Rotation, Type, Value};

use crate::registry::{TagCall, TagRegistry};

fn rotation(call: &TagCall<'_>) -> quill_foundation::Result<Rotation> {
    match call.value {
        Value::Rotation(r) => Ok(*r),
        other => Err(Error::type_mismatch(Type::Rotation, other.value_type())),
    }
}

pub(crate) fn register(tags: &mut TagRegistry) {
    tags.register_step(Type::FormattedText, "plain", |call| {
        Ok(Value::text(call.value.to_formatted().plain()))
    });
    tags.register_step(Type::FormattedText, "length", |call| {
        let count = call.value.to_formatted().plain().chars().count();
        Ok(Value::Int(i64::try_from(count).unwrap_or(i64::MAX)))
    });

    tags.register_step(Type::Rotation, "pitch", |call| {
        Ok(Value::Float(rotation(call)?.pitch))
    });
    tags.register_step(Type::Rotation, "yaw", |call| Ok(Value::Float(rotation(call)?.yaw)));
    tags.register_step(Type::Rotation, "roll", |call| Ok(Value::Float(rotation(call)?.roll)));
}
