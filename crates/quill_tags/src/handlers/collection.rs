//! List and map steps.

use std::sync::Arc;

use quill_foundation::{Error, QMap, QVec, Result, Type, Value};

use crate::registry::{TagCall, TagRegistry};

fn list<'a>(call: &'a TagCall<'_>) -> Result<&'a QVec<Value>> {
    call.value
        .as_list()
        .ok_or_else(|| Error::type_mismatch(Type::List, call.value.value_type()))
}

fn map<'a>(call: &'a TagCall<'_>) -> Result<&'a QMap<Arc<str>, Value>> {
    call.value
        .as_map()
        .ok_or_else(|| Error::type_mismatch(Type::Map, call.value.value_type()))
}

fn size(len: usize) -> Value {
    Value::Int(i64::try_from(len).unwrap_or(i64::MAX))
}

fn register_list(tags: &mut TagRegistry) {
    tags.register_step(Type::List, "size", |call| Ok(size(list(call)?.len())));

    // Positions are 1-based.
    tags.register_step(Type::List, "get", |call| {
        let items = list(call)?;
        let index = call.param()?.to_int()?;
        usize::try_from(index)
            .ok()
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| items.get(i))
            .cloned()
            .ok_or_else(|| {
                Error::failed(format!(
                    "index {index} is out of range for a list of {}",
                    items.len()
                ))
            })
    });

    tags.register_step(Type::List, "first", |call| {
        Ok(list(call)?.first().cloned().unwrap_or(Value::Null))
    });
    tags.register_step(Type::List, "last", |call| {
        Ok(list(call)?.last().cloned().unwrap_or(Value::Null))
    });

    tags.register_step(Type::List, "contains", |call| {
        let needle = call.param_text()?;
        let found = list(call)?
            .iter()
            .any(|item| item.to_string().eq_ignore_ascii_case(&needle));
        Ok(Value::Bool(found))
    });

    tags.register_step(Type::List, "separated_by", |call| {
        let separator = call.param_text()?;
        let parts: Vec<String> = list(call)?.iter().map(ToString::to_string).collect();
        Ok(Value::text(parts.join(&separator)))
    });
}

fn register_map(tags: &mut TagRegistry) {
    // Keys are stored lowercased; a missing key reads as null.
    tags.register_step(Type::Map, "get", |call| {
        let key = call.param_text()?.to_lowercase();
        Ok(map(call)?.get(key.as_str()).cloned().unwrap_or(Value::Null))
    });

    tags.register_step(Type::Map, "size", |call| Ok(size(map(call)?.len())));

    tags.register_step(Type::Map, "keys", |call| {
        Ok(Value::List(map(call)?.keys().map(Value::text).collect()))
    });

    tags.register_step(Type::Map, "contains_key", |call| {
        let key = call.param_text()?.to_lowercase();
        Ok(Value::Bool(map(call)?.contains_key(key.as_str())))
    });
}

pub(crate) fn register(tags: &mut TagRegistry) {
    register_list(tags);
    register_map(tags);
}
