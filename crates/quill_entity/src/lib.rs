//! Entity scripts, template resolution, and spawn planning for Quill.
//!
//! This crate provides:
//! - [`ScriptSource`] / [`EntityScript`] - Script definitions, raw and compiled
//! - [`ScriptRegistry`] - Loaded scripts, with static scripts resolved at load
//! - [`TemplateResolver`] - Inheritance-aware resolution into [`EntityTemplate`]s
//! - [`PropertyKeyMapper`] - Property names and value conversion
//! - [`SpawnPlanner`] - Turning an id plus extra properties into a spawn
//!
//! Native entity types and AI task types belong to the host; they reach the
//! engine through [`NativeTypeDirectory`] and [`TaskTypeDirectory`].
//!
//! # Example
//!
//! ```
//! use quill_entity::{
//!     Environment, ScriptRegistry, ScriptSource, TaskTable, TemplateResolver, TypeTable,
//! };
//! use quill_foundation::Value;
//! use quill_tags::TagContext;
//!
//! let env = Environment::new(
//!     TypeTable::with_entity_types("minecraft", ["zombie"]),
//!     TaskTable::new(),
//! );
//! let mut registry = ScriptRegistry::new();
//! registry.load(
//!     [ScriptSource::new("goblin").with_base("zombie").with_key("max_health", "40")],
//!     &env,
//! );
//!
//! let goblin = TemplateResolver::new(&registry, &env)
//!     .resolve("goblin", &TagContext::new())
//!     .unwrap();
//! assert_eq!(goblin.property("max_health"), Some(&Value::Int(40)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
mod directory;
mod keys;
mod registry;
mod resolver;
mod script;
mod spawn;
mod template;

pub use config::EngineConfig;
pub use directory::{
    NativeTypeDirectory, TaskTable, TaskType, TaskTypeDirectory, TypeCategory, TypeTable,
    register_entity_tags,
};
pub use keys::{
    Converter, KeyDescriptor, PropertyKeyMapper, RESERVED_KEYS, Shape, is_reserved, normalize_key,
};
pub use registry::{Environment, LoadFailure, LoadReport, ScriptRegistry};
pub use resolver::{EntityTypeRef, TemplateResolver};
pub use script::{Caching, CompiledTask, EntityScript, ScriptSource, TaskSource};
pub use spawn::{Location, SpawnOutcome, SpawnPlan, SpawnPlanner, SpawnSource, Spawner};
pub use template::{AiTask, EntityTemplate, TemplateBase};
