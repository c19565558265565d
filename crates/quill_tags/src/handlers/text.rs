//! Text steps.
//!
//! Comparisons ignore case, matching how script authors write names.

use quill_foundation::{QVec, Type, Value};

use super::expect_text;
use crate::registry::TagRegistry;

pub(crate) fn register(tags: &mut TagRegistry) {
    tags.register_step(Type::Text, "length", |call| {
        let text = expect_text(call.value)?;
        Ok(Value::Int(i64::try_from(text.chars().count()).unwrap_or(i64::MAX)))
    });

    tags.register_step(Type::Text, "to_upper", |call| {
        Ok(Value::text(expect_text(call.value)?.to_uppercase()))
    });

    tags.register_step(Type::Text, "to_lower", |call| {
        Ok(Value::text(expect_text(call.value)?.to_lowercase()))
    });

    tags.register_step(Type::Text, "contains", |call| {
        let text = expect_text(call.value)?.to_lowercase();
        let needle = call.param_text()?.to_lowercase();
        Ok(Value::Bool(text.contains(&needle)))
    });

    tags.register_step(Type::Text, "equals", |call| {
        let text = expect_text(call.value)?;
        Ok(Value::Bool(text.eq_ignore_ascii_case(&call.param_text()?)))
    });

    tags.register_step(Type::Text, "as_number", |call| call.value.to_numeric());

    tags.register_step(Type::Text, "as_boolean", |call| {
        call.value.to_boolean().map(Value::Bool)
    });

    // Without a separator, splits on whitespace.
    tags.register_step(Type::Text, "split", |call| {
        let text = expect_text(call.value)?;
        let parts: QVec<Value> = match &call.param {
            Some(sep) => {
                let sep = sep.to_string();
                if sep.is_empty() {
                    text.chars().map(|c| Value::text(c.to_string())).collect()
                } else {
                    text.split(sep.as_str()).map(Value::text).collect()
                }
            }
            None => text.split_whitespace().map(Value::text).collect(),
        };
        Ok(Value::List(parts))
    });
}
