//! Spawn planning.
//!
//! A spawn names an entity type or script, a location and optional extra
//! properties. [`SpawnPlanner::plan`] turns that into a [`SpawnPlan`]; the
//! host's [`Spawner`] does the actual instantiation.

use std::fmt;
use std::sync::Arc;

use quill_foundation::{Error, ErrorKind, QMap, Result, Value};
use quill_tags::TagContext;
use tracing::debug;

use crate::directory::TypeCategory;
use crate::keys::normalize_key;
use crate::registry::{Environment, ScriptRegistry};
use crate::resolver::TemplateResolver;
use crate::template::EntityTemplate;

/// Where to spawn.
#[derive(Clone, Debug, PartialEq)]
pub struct Location {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
    /// World name. A location without a world cannot be spawned into.
    pub world: Option<String>,
}

impl Location {
    /// Creates a location in a world.
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64, world: &str) -> Self {
        Self {
            x,
            y,
            z,
            world: Some(world.to_string()),
        }
    }

    /// Creates a location with no world.
    #[must_use]
    pub fn detached(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            world: None,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)?;
        if let Some(world) = &self.world {
            write!(f, ",{world}")?;
        }
        Ok(())
    }
}

/// Host collaborator that creates live entities.
pub trait Spawner {
    /// Spawns `template` at `location`. Returns a handle to the new entity,
    /// or `None` if the host blocked the spawn.
    fn spawn(&mut self, template: &EntityTemplate, location: &Location) -> Option<Value>;
}

/// Result of executing a plan.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnOutcome {
    /// Whether the host spawned the entity.
    pub success: bool,
    /// The spawned entity, when it was spawned.
    pub entity: Option<Value>,
}

impl SpawnOutcome {
    /// The bindings a spawn leaves behind: `spawn_success` always,
    /// `spawn_entity` only when the spawn passed.
    #[must_use]
    pub fn definitions(&self) -> Vec<(&'static str, Value)> {
        let mut out = vec![("spawn_success", Value::Bool(self.success))];
        if let (true, Some(entity)) = (self.success, &self.entity) {
            out.push(("spawn_entity", entity.clone()));
        }
        out
    }

    /// Binds [`SpawnOutcome::definitions`] into a context.
    pub fn define_in(&self, context: &mut TagContext) {
        for (name, value) in self.definitions() {
            context.define(name, value);
        }
    }
}

/// Where a plan's template came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpawnSource {
    /// A native entity type.
    Native,
    /// An entity script, by name.
    Script(String),
}

/// A validated spawn, ready to execute.
#[derive(Clone, Debug)]
pub struct SpawnPlan {
    id: String,
    source: SpawnSource,
    template: EntityTemplate,
    extra: QMap<Arc<str>, Value>,
}

impl SpawnPlan {
    /// Returns the id the spawn was requested with.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns where the template came from.
    #[must_use]
    pub fn source(&self) -> &SpawnSource {
        &self.source
    }

    /// Returns the template that will be spawned, extra properties applied.
    #[must_use]
    pub fn template(&self) -> &EntityTemplate {
        &self.template
    }

    /// Returns the validated extra properties.
    #[must_use]
    pub fn extra(&self) -> &QMap<Arc<str>, Value> {
        &self.extra
    }

    /// Renders the plan for debug output.
    #[must_use]
    pub fn describe(&self, location: &Location) -> String {
        let extra = Value::Map(self.extra.clone());
        match &self.source {
            SpawnSource::Native => format!(
                "Spawning an entity of type {} with the following properties: {extra} at location {location}",
                self.id
            ),
            SpawnSource::Script(name) => format!(
                "Spawning an entity from script {name} with the following additional properties: {extra} at location {location}"
            ),
        }
    }

    /// Hands the plan to the host.
    ///
    /// # Errors
    /// Fails if the location has no world.
    pub fn execute(&self, spawner: &mut dyn Spawner, location: &Location) -> Result<SpawnOutcome> {
        if location.world.is_none() {
            return Err(Error::new(ErrorKind::InvalidLocation(format!(
                "location {location} has no world"
            ))));
        }
        debug!("{}", self.describe(location));
        let entity = spawner.spawn(&self.template, location);
        let outcome = SpawnOutcome {
            success: entity.is_some(),
            entity,
        };
        debug!(
            "Spawning {}!",
            if outcome.success { "succeeded" } else { "was blocked" }
        );
        Ok(outcome)
    }
}

/// Builds spawn plans from ids and extra properties.
#[derive(Clone, Copy, Debug)]
pub struct SpawnPlanner<'a> {
    registry: &'a ScriptRegistry,
    env: &'a Environment,
}

impl<'a> SpawnPlanner<'a> {
    /// Creates a planner.
    #[must_use]
    pub fn new(registry: &'a ScriptRegistry, env: &'a Environment) -> Self {
        Self { registry, env }
    }

    /// Plans a spawn of `id`, a native type or an entity script.
    ///
    /// # Errors
    /// Fails if `id` names neither, if the script fails to resolve, or if an
    /// extra property is unknown or cannot be converted.
    pub fn plan(
        &self,
        id: &str,
        extra: Option<&QMap<Arc<str>, Value>>,
        context: &TagContext,
    ) -> Result<SpawnPlan> {
        let (source, mut template) =
            if let Some(native) = self.env.types.lookup(TypeCategory::Entity, id) {
                (SpawnSource::Native, EntityTemplate::native(native))
            } else if let Some(script) = self.registry.get(id) {
                let template = TemplateResolver::new(self.registry, self.env)
                    .resolve(script.name(), context)?;
                (SpawnSource::Script(script.name().to_string()), template)
            } else {
                return Err(Error::missing_base(format!(
                    "no entity types nor scripts found for id '{}'",
                    id.trim()
                )));
            };

        let mut applied = QMap::new();
        for (key, value) in extra.into_iter().flat_map(QMap::iter) {
            match normalize_key(key).as_str() {
                "orientation" | "rotation" => template.set_rotation(value.to_rotation()?),
                _ => {
                    let descriptor = self.env.keys.key_for(key).ok_or_else(|| {
                        Error::invalid_property(format!("invalid property '{key}' in spawn"))
                    })?;
                    let converted = self.env.keys.convert(descriptor, value)?;
                    template.set_property(descriptor.name(), converted);
                }
            }
            applied = applied.insert(Arc::clone(key), value.clone());
        }

        Ok(SpawnPlan {
            id: id.trim().to_string(),
            source,
            template,
            extra: applied,
        })
    }
}
