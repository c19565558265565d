//! Entity templates: the resolved, spawnable form of an entity script.
//!
//! Every field is a persistent collection, so cloning a template is O(1)
//! and a clone never observes changes made through another clone. The
//! static cache hands out clones on every read.

use std::fmt;
use std::fmt::Write as _;
use std::sync::Arc;

use quill_foundation::{EntityTypeId, QMap, QVec, Rotation, Value};

/// One AI task attached to a template.
#[derive(Clone, Debug, PartialEq)]
pub struct AiTask {
    /// Registered task type name.
    pub task_type: Arc<str>,
    /// Evaluated parameters, keyed by lowercase name.
    pub params: QMap<Arc<str>, Value>,
}

impl fmt::Display for AiTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.task_type)?;
        if !self.params.is_empty() {
            write!(f, "[{}]", Value::Map(self.params.clone()))?;
        }
        Ok(())
    }
}

/// What a template is built on.
#[derive(Clone, Debug, PartialEq)]
pub enum TemplateBase {
    /// A native entity type.
    Native(EntityTypeId),
    /// The resolved template of another script.
    Inherited(Arc<EntityTemplate>),
}

/// A resolved entity description, ready to spawn.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityTemplate {
    base: TemplateBase,
    source_script: Option<Arc<str>>,
    properties: QMap<Arc<str>, Value>,
    flags: QMap<Arc<str>, Value>,
    tasks: QVec<AiTask>,
    rotation: Option<Rotation>,
    is_static: bool,
}

impl EntityTemplate {
    /// Creates an empty template of a native type.
    #[must_use]
    pub fn native(id: EntityTypeId) -> Self {
        Self {
            base: TemplateBase::Native(id),
            source_script: None,
            properties: QMap::new(),
            flags: QMap::new(),
            tasks: QVec::new(),
            rotation: None,
            is_static: false,
        }
    }

    /// Creates a template that starts with everything `parent` has.
    #[must_use]
    pub fn inheriting(parent: EntityTemplate) -> Self {
        Self {
            properties: parent.properties.clone(),
            flags: parent.flags.clone(),
            tasks: parent.tasks.clone(),
            rotation: parent.rotation,
            source_script: None,
            is_static: false,
            base: TemplateBase::Inherited(Arc::new(parent)),
        }
    }

    /// Returns the base.
    #[must_use]
    pub fn base(&self) -> &TemplateBase {
        &self.base
    }

    /// Returns the native type at the end of the inheritance chain.
    #[must_use]
    pub fn native_type(&self) -> &EntityTypeId {
        let mut current = self;
        loop {
            match &current.base {
                TemplateBase::Native(id) => return id,
                TemplateBase::Inherited(parent) => current = &**parent,
            }
        }
    }

    /// Returns the parent template, if built on a script.
    #[must_use]
    pub fn parent(&self) -> Option<&EntityTemplate> {
        match &self.base {
            TemplateBase::Native(_) => None,
            TemplateBase::Inherited(parent) => Some(&**parent),
        }
    }

    /// Returns the names of the scripts in the inheritance chain, nearest first.
    pub fn ancestry(&self) -> impl Iterator<Item = &str> {
        std::iter::successors(self.parent(), |t| t.parent()).filter_map(EntityTemplate::source_script)
    }

    /// Returns the script that produced this template.
    #[must_use]
    pub fn source_script(&self) -> Option<&str> {
        self.source_script.as_deref()
    }

    /// Records the script that produced this template.
    pub fn set_source_script(&mut self, name: &str) {
        self.source_script = Some(name.into());
    }

    /// Returns the script named by the identity flag `flag`, if set.
    #[must_use]
    pub fn script_identity(&self, flag: &str) -> Option<&str> {
        match self.flags.get(flag)? {
            Value::Script(name) => Some(&**name),
            _ => None,
        }
    }

    /// Returns a property.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Returns all properties.
    #[must_use]
    pub fn properties(&self) -> &QMap<Arc<str>, Value> {
        &self.properties
    }

    /// Sets a property, replacing an inherited value.
    pub fn set_property(&mut self, key: &str, value: Value) {
        self.properties = self.properties.insert(key.into(), value);
    }

    /// Returns a flag.
    #[must_use]
    pub fn flag(&self, name: &str) -> Option<&Value> {
        self.flags.get(name)
    }

    /// Returns all flags.
    #[must_use]
    pub fn flags(&self) -> &QMap<Arc<str>, Value> {
        &self.flags
    }

    /// Sets a flag, replacing an inherited value.
    pub fn set_flag(&mut self, name: &str, value: Value) {
        self.flags = self.flags.insert(name.into(), value);
    }

    /// Removes a flag.
    pub fn remove_flag(&mut self, name: &str) {
        self.flags = self.flags.remove(name);
    }

    /// Returns the AI tasks in order.
    #[must_use]
    pub fn tasks(&self) -> &QVec<AiTask> {
        &self.tasks
    }

    /// Appends an AI task.
    pub fn push_task(&mut self, task: AiTask) {
        self.tasks = self.tasks.push_back(task);
    }

    /// Drops every AI task, inherited ones included.
    pub fn clear_tasks(&mut self) {
        self.tasks = QVec::new();
    }

    /// Returns the orientation.
    #[must_use]
    pub fn rotation(&self) -> Option<Rotation> {
        self.rotation
    }

    /// Sets the orientation.
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = Some(rotation);
    }

    /// Returns true if the template came from a static script.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Marks the template as coming from a static script.
    pub fn set_static(&mut self, is_static: bool) {
        self.is_static = is_static;
    }

    /// The map bound as `base` while a child script resolves: every
    /// property plus `type`.
    #[must_use]
    pub fn properties_view(&self) -> Value {
        Value::Map(
            self.properties
                .insert("type".into(), Value::EntityType(self.native_type().clone())),
        )
    }

    /// Renders the template for debug output.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut out = self.native_type().to_string();
        if let Some(script) = &self.source_script {
            let _ = write!(out, " from script {script}");
        }
        let ancestry: Vec<_> = self.ancestry().collect();
        if !ancestry.is_empty() {
            let _ = write!(out, " (inherits {})", ancestry.join(" <- "));
        }
        let _ = write!(out, "; properties: {}", Value::Map(self.properties.clone()));
        let _ = write!(out, "; flags: {}", Value::Map(self.flags.clone()));
        if !self.tasks.is_empty() {
            let tasks: Vec<_> = self.tasks.iter().map(ToString::to_string).collect();
            let _ = write!(out, "; ai tasks: {}", tasks.join(", "));
        }
        if let Some(rotation) = self.rotation {
            let _ = write!(out, "; rotation: {rotation}");
        }
        out
    }
}
