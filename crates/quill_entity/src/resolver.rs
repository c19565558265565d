//! Resolution of entity scripts into templates.
//!
//! Resolution walks the inheritance chain depth first: a script's base is
//! resolved completely before any of its own fields are evaluated, and the
//! base's properties are bound as `<[base]>` while they are. The first
//! failure anywhere aborts the whole resolution and no partial template is
//! returned.

use std::sync::Arc;

use quill_foundation::{EntityTypeId, Error, ErrorKind, QMap, Result, Value};
use quill_tags::TagContext;
use tracing::trace;

use crate::directory::TypeCategory;
use crate::keys::normalize_key;
use crate::registry::{in_script, Environment, ScriptRegistry};
use crate::script::EntityScript;
use crate::template::{AiTask, EntityTemplate};

/// What an entity type reference names.
#[derive(Clone, Debug, PartialEq)]
pub enum EntityTypeRef {
    /// A native entity type.
    Native(EntityTypeId),
    /// A copy of an entity script's template.
    Script(EntityTemplate),
}

impl EntityTypeRef {
    /// Returns the native type, following scripts to their root.
    #[must_use]
    pub fn native_type(&self) -> &EntityTypeId {
        match self {
            Self::Native(id) => id,
            Self::Script(template) => template.native_type(),
        }
    }
}

/// Resolves scripts against a registry.
#[derive(Clone, Copy, Debug)]
pub struct TemplateResolver<'a> {
    registry: &'a ScriptRegistry,
    env: &'a Environment,
}

impl<'a> TemplateResolver<'a> {
    /// Creates a resolver.
    #[must_use]
    pub fn new(registry: &'a ScriptRegistry, env: &'a Environment) -> Self {
        Self { registry, env }
    }

    /// Resolves the script `name` into a template.
    ///
    /// Static scripts return a copy of their cached template. Resolving a
    /// static script under the static sentinel context fills the cache.
    ///
    /// # Errors
    /// Fails if the script is unknown or any step of its resolution fails.
    pub fn resolve(&self, name: &str, context: &TagContext) -> Result<EntityTemplate> {
        let script = self.script(name)?;
        self.resolve_script(script, context, &mut Vec::new())
    }

    /// Resolves an entity type reference. Native types are tried first, so a
    /// script sharing a native type's name is never reached this way.
    ///
    /// # Errors
    /// Fails if `id` names neither, or if the script fails to resolve.
    pub fn resolve_entity_type(&self, id: &str, context: &TagContext) -> Result<EntityTypeRef> {
        self.resolve_reference(id, context, &mut Vec::new())
    }

    fn script(&self, name: &str) -> Result<&'a Arc<EntityScript>> {
        self.registry
            .get(name)
            .ok_or_else(|| Error::missing_base(format!("no entity script named '{}'", name.trim())))
    }

    fn resolve_reference(
        &self,
        id: &str,
        context: &TagContext,
        chain: &mut Vec<Arc<str>>,
    ) -> Result<EntityTypeRef> {
        if let Some(native) = self.env.types.lookup(TypeCategory::Entity, id) {
            return Ok(EntityTypeRef::Native(native));
        }
        match self.registry.get(id) {
            Some(script) => self
                .resolve_script(script, context, chain)
                .map(EntityTypeRef::Script),
            None => Err(Error::missing_base(format!(
                "no entity type or script found for id '{}'",
                id.trim()
            ))),
        }
    }

    fn resolve_script(
        &self,
        script: &EntityScript,
        context: &TagContext,
        chain: &mut Vec<Arc<str>>,
    ) -> Result<EntityTemplate> {
        if let Some(cached) = script.cached() {
            return Ok(cached.clone());
        }

        let name: Arc<str> = script.name().into();
        if chain.contains(&name) || chain.len() >= self.env.config.max_inheritance_depth {
            let mut cycle: Vec<String> = chain.iter().map(ToString::to_string).collect();
            cycle.push(name.to_string());
            return Err(Error::new(ErrorKind::CyclicInheritance { chain: cycle }));
        }

        chain.push(name);
        let result = self.build(script, context, chain);
        chain.pop();
        let template = result?;

        if script.is_static() && context.is_static() {
            script.cache(template.clone());
        }
        Ok(template)
    }

    fn build(
        &self,
        script: &EntityScript,
        context: &TagContext,
        chain: &mut Vec<Arc<str>>,
    ) -> Result<EntityTemplate> {
        let name = script.name();
        let tags = &self.env.tags;
        let config = &self.env.config;
        let mut context = context.child();

        let base = script
            .base()
            .evaluate_text(tags, &context)
            .map_err(|e| in_script(e, name, "base"))?;
        trace!("Resolving entity script {} on base {}", name, base);

        let mut template = match self.resolve_reference(&base, &context, chain) {
            Ok(EntityTypeRef::Native(id)) => {
                context.define("base", Value::EntityType(id.clone()));
                EntityTemplate::native(id)
            }
            Ok(EntityTypeRef::Script(parent)) => {
                context.define("base", parent.properties_view());
                EntityTemplate::inheriting(parent)
            }
            Err(err) => return Err(in_script(err, name, "base")),
        };
        template.set_source_script(name);

        if let Some(display_name) = script.display_name() {
            let value = display_name
                .evaluate(tags, &context)
                .map_err(|e| in_script(e, name, "display name"))?;
            template.set_property("display_name", Value::FormattedText(value.to_formatted()));
        }

        for (key, arg) in script.keys() {
            let frame = format!("keys.{key}");
            let value = arg
                .evaluate(tags, &context)
                .map_err(|e| in_script(e, name, &frame))?;
            self.apply_key(&mut template, key, &value)
                .map_err(|e| in_script(e, name, &frame))?;
        }

        for (flag, arg) in script.flags() {
            let value = arg
                .evaluate(tags, &context)
                .map_err(|e| in_script(e, name, &format!("flags.{flag}")))?;
            template.set_flag(flag, value);
        }

        let plain = match script.plain() {
            Some(arg) => arg
                .evaluate(tags, &context)
                .and_then(|v| v.to_boolean())
                .map_err(|e| in_script(e, name, "plain"))?,
            None => false,
        };
        if plain {
            template.remove_flag(&config.script_flag);
        } else {
            template.set_flag(&config.script_flag, Value::script(name));
        }

        for task in script.tasks() {
            let frame = format!("ai tasks.{}", task.task_type);
            let task_type = self.env.tasks.handler_for(&task.task_type).ok_or_else(|| {
                in_script(
                    Error::task_type(format!("unknown AI task type '{}'", task.task_type)),
                    name,
                    &frame,
                )
            })?;
            let mut params = QMap::new();
            for (param, arg) in &task.params {
                let value = arg
                    .evaluate(tags, &context)
                    .map_err(|e| in_script(e, name, &frame))?;
                params = params.insert(Arc::clone(param), value);
            }
            task_type
                .validate(&params)
                .map_err(|e| in_script(e, name, &frame))?;
            template.push_task(AiTask {
                task_type: Arc::clone(&task.task_type),
                params,
            });
        }

        template.set_static(script.is_static());
        Ok(template)
    }

    /// Applies one `keys` entry. `orientation`, `rotation` and
    /// `clear_ai_tasks` act on the template directly; everything else must
    /// be a registered property.
    fn apply_key(&self, template: &mut EntityTemplate, key: &str, value: &Value) -> Result<()> {
        match normalize_key(key).as_str() {
            "orientation" | "rotation" => template.set_rotation(value.to_rotation()?),
            "clear_ai_tasks" => {
                if value.to_boolean()? {
                    template.clear_tasks();
                }
            }
            _ => {
                let (key, converted) = self.env.keys.apply(key, value)?;
                template.set_property(&key, converted);
            }
        }
        Ok(())
    }
}
