//! Integration tests for SpawnPlanner

use std::sync::Arc;

use quill_entity::{EntityTemplate, Location, SpawnPlanner, SpawnSource, Spawner};
use quill_foundation::{ErrorKind, QMap, Rotation, Value};
use quill_tags::{Argument, TagContext};

use crate::common::{environment, goblins, load_clean};

/// Records spawns and hands out numbered handles.
#[derive(Default)]
struct World {
    spawned: Vec<(EntityTemplate, Location)>,
}

impl Spawner for World {
    fn spawn(&mut self, template: &EntityTemplate, location: &Location) -> Option<Value> {
        self.spawned.push((template.clone(), location.clone()));
        Some(Value::text(format!("entity-{}", self.spawned.len())))
    }
}

fn extra(entries: &[(&str, &str)]) -> QMap<Arc<str>, Value> {
    entries
        .iter()
        .map(|(k, v)| (Arc::from(*k), Value::text(*v)))
        .collect()
}

#[test]
fn spawn_script_with_overrides() {
    let env = environment();
    let registry = load_clean(goblins(), &env);
    let plan = SpawnPlanner::new(&registry, &env)
        .plan(
            "elite_goblin",
            Some(&extra(&[("Max Health", "120"), ("rotation", "0,45,0")])),
            &TagContext::new(),
        )
        .unwrap();

    assert_eq!(plan.id(), "elite_goblin");
    assert_eq!(plan.source(), &SpawnSource::Script("elite_goblin".into()));
    assert_eq!(plan.template().property("max_health"), Some(&Value::Int(120)));
    assert_eq!(plan.template().rotation(), Some(Rotation::new(0.0, 45.0, 0.0)));
    assert_eq!(plan.extra().len(), 2);

    let mut world = World::default();
    let here = Location::new(10.0, 64.0, -3.0, "overworld");
    let outcome = plan.execute(&mut world, &here).unwrap();
    assert!(outcome.success);
    assert_eq!(world.spawned.len(), 1);
    assert_eq!(world.spawned[0].1, here);
    assert_eq!(world.spawned[0].0.script_identity("_d2_script"), Some("elite_goblin"));
}

#[test]
fn spawn_outcome_feeds_later_tags() {
    let env = environment();
    let registry = load_clean(goblins(), &env);
    let plan = SpawnPlanner::new(&registry, &env)
        .plan("villager", None, &TagContext::new())
        .unwrap();
    assert_eq!(plan.source(), &SpawnSource::Native);

    let outcome = plan
        .execute(&mut World::default(), &Location::new(0.0, 0.0, 0.0, "overworld"))
        .unwrap();
    let mut ctx = TagContext::new();
    outcome.define_in(&mut ctx);

    let text = Argument::compile("<[spawn_success]> <[spawn_entity]>")
        .unwrap()
        .evaluate_text(&env.tags, &ctx)
        .unwrap();
    assert_eq!(text, "true entity-1");
}

#[test]
fn native_types_win_over_scripts() {
    let env = environment();
    let registry = load_clean(
        vec![quill_entity::ScriptSource::new("husk")
            .with_base("zombie")
            .with_key("max_health", "5")],
        &env,
    );
    let plan = SpawnPlanner::new(&registry, &env)
        .plan("husk", None, &TagContext::new())
        .unwrap();
    assert_eq!(plan.source(), &SpawnSource::Native);
    assert!(plan.template().property("max_health").is_none());
}

#[test]
fn spawn_rejects_bad_input() {
    let env = environment();
    let registry = load_clean(goblins(), &env);
    let planner = SpawnPlanner::new(&registry, &env);

    let err = planner.plan("troll", None, &TagContext::new()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingBase(ref m) if m.contains("'troll'")));

    let err = planner
        .plan("goblin", Some(&extra(&[("max_health", "lots")])), &TagContext::new())
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));

    let plan = planner.plan("goblin", None, &TagContext::new()).unwrap();
    let err = plan
        .execute(&mut World::default(), &Location::detached(0.0, 0.0, 0.0))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidLocation(_)));
}

#[test]
fn describe_mentions_location() {
    let env = environment();
    let registry = load_clean(goblins(), &env);
    let plan = SpawnPlanner::new(&registry, &env)
        .plan("sheep", Some(&extra(&[("is_sheared", "true")])), &TagContext::new())
        .unwrap();
    let text = plan.describe(&Location::new(1.0, 2.0, 3.0, "overworld"));
    assert!(text.contains("sheep"));
    assert!(text.contains("is_sheared:true"));
    assert!(text.ends_with("at location 1,2,3,overworld"));
}
