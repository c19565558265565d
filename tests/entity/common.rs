//! Shared fixtures for the entity tests.

use quill_entity::{
    Environment, ScriptRegistry, ScriptSource, TaskTable, TaskType, TaskSource, TypeTable,
};

/// An environment with a handful of native types and AI tasks.
pub fn environment() -> Environment {
    Environment::new(
        TypeTable::with_entity_types(
            "minecraft",
            ["zombie", "skeleton", "sheep", "husk", "villager"],
        ),
        TaskTable::new()
            .with(TaskType::new("wander").with_required("speed"))
            .with(TaskType::new("follow").with_required("target"))
            .with(TaskType::new("attack")),
    )
}

/// The goblin family used across tests.
pub fn goblins() -> Vec<ScriptSource> {
    vec![
        ScriptSource::new("Goblin")
            .with_base("zombie")
            .with_display_name("&2Goblin")
            .with_key("max_health", "40")
            .with_flag("tribe", "moss")
            .with_task(TaskSource::new("wander").with_param("speed", "1.2")),
        ScriptSource::new("Elite_Goblin")
            .with_base("goblin")
            .with_display_name("&4<[base].get[display_name].plain> Elite")
            .with_key("max_health", "<[base].get[max_health].multiply[2]>")
            .with_task(TaskSource::new("attack")),
        ScriptSource::new("goblin_totem")
            .with_base("villager")
            .with_static("true")
            .with_key("ai_enabled", "false")
            .with_key("orientation", "0,180,0"),
    ]
}

/// Loads `sources`, panicking if any fail.
pub fn load_clean(sources: Vec<ScriptSource>, env: &Environment) -> ScriptRegistry {
    let mut registry = ScriptRegistry::new();
    let report = registry.load(sources, env);
    assert!(report.is_clean(), "unexpected failures: {:?}", report.failures);
    registry
}
