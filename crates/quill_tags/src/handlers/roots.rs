//! Root providers.

use quill_foundation::{Error, QMap, QVec, Value};

use crate::registry::TagRegistry;

/// Characters that cannot be written literally inside a tag.
const ESCAPES: [(&str, &str); 6] = [
    ("&lt", "<"),
    ("&gt", ">"),
    ("&lb", "["),
    ("&rb", "]"),
    ("&pipe", "|"),
    ("&dot", "."),
];

pub(crate) fn register(tags: &mut TagRegistry) {
    tags.register_root("text", |call| {
        Ok(call
            .param
            .as_ref()
            .map_or_else(|| Value::text(""), |p| Value::text(p.to_string())))
    });

    tags.register_root("number", |call| call.param_numeric());

    tags.register_root("boolean", |call| call.param()?.to_boolean().map(Value::Bool));

    tags.register_root("list", |call| match &call.param {
        Some(param) => param.to_list().map(Value::List),
        None => Ok(Value::List(QVec::new())),
    });

    tags.register_root("map", |call| match &call.param {
        Some(param) => param.to_map().map(Value::Map),
        None => Ok(Value::Map(QMap::new())),
    });

    tags.register_root("formatted_text", |call| {
        Ok(Value::FormattedText(call.param()?.to_formatted()))
    });

    tags.register_root("rotation", |call| {
        call.param()?.to_rotation().map(Value::Rotation)
    });

    tags.register_root("null", |_| Ok(Value::Null));

    // Per-use bindings. Static scripts are resolved once at load with no
    // caller, so there is nothing to read.
    tags.register_root("context", |call| {
        if call.context.is_static() {
            return Err(Error::failed(
                "tag 'context' cannot be used while resolving a static script",
            ));
        }
        let name = call.param_text()?;
        Ok(call.context.definition(&name).cloned().unwrap_or(Value::Null))
    });

    for (name, replacement) in ESCAPES {
        tags.register_root(name, move |_| Ok(Value::text(replacement)));
    }
}
