//! Host collaborators: native type and AI task catalogs.
//!
//! The engine never owns the catalog of native types or AI tasks. It asks a
//! [`NativeTypeDirectory`] and a [`TaskTypeDirectory`]; [`TypeTable`] and
//! [`TaskTable`] are in-memory implementations for hosts without their own.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use quill_foundation::{EntityTypeId, Error, QMap, Result, Type, Value};
use quill_tags::TagRegistry;

use crate::config::EngineConfig;

/// The kinds of native type a host can be asked about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    /// Living and non-living entities.
    Entity,
    /// Item types.
    Item,
    /// Block types.
    Block,
}

/// Resolves native type names to identifiers.
pub trait NativeTypeDirectory: Send + Sync {
    /// Looks up `name` in `category`. Unqualified names take the host's
    /// default namespace.
    fn lookup(&self, category: TypeCategory, name: &str) -> Option<EntityTypeId>;
}

/// In-memory [`NativeTypeDirectory`].
#[derive(Clone, Debug)]
pub struct TypeTable {
    default_namespace: String,
    types: HashMap<TypeCategory, HashSet<EntityTypeId>>,
}

impl TypeTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new(default_namespace: &str) -> Self {
        Self {
            default_namespace: default_namespace.to_lowercase(),
            types: HashMap::new(),
        }
    }

    /// Creates an empty table using the configured default namespace.
    #[must_use]
    pub fn for_config(config: &EngineConfig) -> Self {
        Self::new(&config.default_namespace)
    }

    /// Creates a table of entity types.
    #[must_use]
    pub fn with_entity_types<'a>(
        default_namespace: &str,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut table = Self::new(default_namespace);
        for name in names {
            table.register(TypeCategory::Entity, name);
        }
        table
    }

    /// Registers a type. Returns false if the name is malformed.
    pub fn register(&mut self, category: TypeCategory, name: &str) -> bool {
        match EntityTypeId::parse(name, &self.default_namespace) {
            Some(id) => {
                self.types.entry(category).or_default().insert(id);
                true
            }
            None => false,
        }
    }

    /// Returns the number of types in a category.
    #[must_use]
    pub fn len(&self, category: TypeCategory) -> usize {
        self.types.get(&category).map_or(0, HashSet::len)
    }
}

impl NativeTypeDirectory for TypeTable {
    fn lookup(&self, category: TypeCategory, name: &str) -> Option<EntityTypeId> {
        let id = EntityTypeId::parse(name, &self.default_namespace)?;
        self.types
            .get(&category)
            .is_some_and(|set| set.contains(&id))
            .then_some(id)
    }
}

/// An AI task type and the parameters it cannot do without.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskType {
    name: String,
    required: Vec<String>,
}

impl TaskType {
    /// Creates a task type with no required parameters.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_lowercase(),
            required: Vec::new(),
        }
    }

    /// Builder method to add a required parameter.
    #[must_use]
    pub fn with_required(mut self, param: &str) -> Self {
        self.required.push(param.to_lowercase());
        self
    }

    /// Returns the task type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the required parameter names.
    #[must_use]
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Checks that every required parameter is present.
    ///
    /// # Errors
    /// Returns a task type error naming the first missing parameter.
    pub fn validate(&self, params: &QMap<Arc<str>, Value>) -> Result<()> {
        match self.required.iter().find(|p| !params.contains_key(p.as_str())) {
            Some(missing) => Err(Error::task_type(format!(
                "AI task '{}' requires parameter '{missing}'",
                self.name
            ))),
            None => Ok(()),
        }
    }
}

/// Resolves AI task type names.
pub trait TaskTypeDirectory: Send + Sync {
    /// Returns the task type registered under `name`, case-insensitively.
    fn handler_for(&self, name: &str) -> Option<&TaskType>;
}

/// In-memory [`TaskTypeDirectory`].
#[derive(Clone, Debug, Default)]
pub struct TaskTable {
    tasks: HashMap<String, TaskType>,
}

impl TaskTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a task type, replacing one of the same name.
    pub fn register(&mut self, task: TaskType) {
        self.tasks.insert(task.name.clone(), task);
    }

    /// Builder form of [`TaskTable::register`].
    #[must_use]
    pub fn with(mut self, task: TaskType) -> Self {
        self.register(task);
        self
    }
}

impl TaskTypeDirectory for TaskTable {
    fn handler_for(&self, name: &str) -> Option<&TaskType> {
        self.tasks.get(&name.to_lowercase())
    }
}

impl fmt::Debug for dyn NativeTypeDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NativeTypeDirectory")
    }
}

impl fmt::Debug for dyn TaskTypeDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TaskTypeDirectory")
    }
}

/// Registers the entity tags: the `entity_type[name]` root, the `name`,
/// `namespace` and `full_name` steps on entity types, and `name` on script
/// references.
pub fn register_entity_tags(tags: &mut TagRegistry, types: Arc<dyn NativeTypeDirectory>) {
    tags.register_root("entity_type", move |call| {
        let name = call.param_text()?;
        types
            .lookup(TypeCategory::Entity, &name)
            .map(Value::EntityType)
            .ok_or_else(|| Error::failed(format!("no entity type named '{name}'")))
    });

    tags.register_step(Type::EntityType, "name", |call| {
        entity_type(call.value).map(|id| Value::text(&id.path))
    });
    tags.register_step(Type::EntityType, "namespace", |call| {
        entity_type(call.value).map(|id| Value::text(&id.namespace))
    });
    tags.register_step(Type::EntityType, "full_name", |call| {
        entity_type(call.value).map(|id| Value::text(id.to_string()))
    });

    tags.register_step(Type::Script, "name", |call| match call.value {
        Value::Script(name) => Ok(Value::Text(Arc::clone(name))),
        other => Err(Error::type_mismatch(Type::Script, other.value_type())),
    });
}

fn entity_type(value: &Value) -> Result<&EntityTypeId> {
    value
        .as_entity_type()
        .ok_or_else(|| Error::type_mismatch(Type::EntityType, value.value_type()))
}
