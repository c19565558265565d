//! Integration tests for TemplateResolver

use quill_entity::{
    EntityTypeRef, KeyDescriptor, PropertyKeyMapper, ScriptSource, Shape, TemplateBase,
    TemplateResolver,
};
use quill_foundation::{EntityTypeId, ErrorKind, Rotation, Type, Value};
use quill_tags::TagContext;

use crate::common::{environment, goblins, load_clean};

// =============================================================================
// Goblins
// =============================================================================

#[test]
fn goblin_template() {
    let env = environment();
    let registry = load_clean(goblins(), &env);
    let goblin = TemplateResolver::new(&registry, &env)
        .resolve("goblin", &TagContext::new())
        .unwrap();

    assert_eq!(goblin.native_type(), &EntityTypeId::new("minecraft", "zombie"));
    assert!(matches!(goblin.base(), TemplateBase::Native(_)));
    assert_eq!(goblin.source_script(), Some("goblin"));
    assert_eq!(goblin.property("max_health"), Some(&Value::Int(40)));
    assert_eq!(goblin.flag("tribe"), Some(&Value::text("moss")));
    assert_eq!(goblin.script_identity("_d2_script"), Some("goblin"));
    assert_eq!(goblin.tasks().len(), 1);
}

#[test]
fn elite_goblin_builds_on_goblin() {
    let env = environment();
    let registry = load_clean(goblins(), &env);
    let elite = TemplateResolver::new(&registry, &env)
        .resolve("Elite_Goblin", &TagContext::new())
        .unwrap();

    assert_eq!(elite.property("max_health"), Some(&Value::Int(80)));
    let display = elite.property("display_name").unwrap();
    assert_eq!(display.value_type(), Type::FormattedText);
    assert_eq!(display.to_formatted().plain(), "Goblin Elite");

    // Inherited flag, own identity, inherited task followed by its own.
    assert_eq!(elite.flag("tribe"), Some(&Value::text("moss")));
    assert_eq!(elite.script_identity("_d2_script"), Some("elite_goblin"));
    let tasks: Vec<_> = elite.tasks().iter().map(|t| t.task_type.to_string()).collect();
    assert_eq!(tasks, vec!["wander", "attack"]);
    assert_eq!(elite.ancestry().collect::<Vec<_>>(), vec!["goblin"]);
}

#[test]
fn static_template_from_resolver_is_a_copy() {
    let env = environment();
    let registry = load_clean(goblins(), &env);
    let resolver = TemplateResolver::new(&registry, &env);

    let mut first = resolver.resolve("goblin_totem", &TagContext::new()).unwrap();
    assert_eq!(first.rotation(), Some(Rotation::new(0.0, 180.0, 0.0)));
    first.set_rotation(Rotation::new(1.0, 2.0, 3.0));

    let second = resolver.resolve("goblin_totem", &TagContext::new()).unwrap();
    assert_eq!(second.rotation(), Some(Rotation::new(0.0, 180.0, 0.0)));
}

// =============================================================================
// Context
// =============================================================================

#[test]
fn dynamic_scripts_read_caller_bindings() {
    let env = environment();
    let registry = load_clean(
        vec![ScriptSource::new("scaled")
            .with_base("zombie")
            .with_key("max_health", "<context[level].multiply[10]>")
            .with_flag("summoner", "<context[player]>")],
        &env,
    );
    let resolver = TemplateResolver::new(&registry, &env);
    let ctx = TagContext::new()
        .with_definition("level", Value::Int(3))
        .with_definition("player", Value::text("Steve"));

    let scaled = resolver.resolve("scaled", &ctx).unwrap();
    assert_eq!(scaled.property("max_health"), Some(&Value::Int(30)));
    assert_eq!(scaled.flag("summoner"), Some(&Value::text("Steve")));
}

#[test]
fn dynamic_ancestors_are_rewalked_per_context() {
    let env = environment();
    let registry = load_clean(
        vec![
            ScriptSource::new("pack_leader")
                .with_base("zombie")
                .with_key("max_health", "<context[level].multiply[10]>"),
            ScriptSource::new("pack_member")
                .with_base("pack_leader")
                .with_key("fire_ticks", "<[base].get[max_health].divide[10]>"),
        ],
        &env,
    );
    let resolver = TemplateResolver::new(&registry, &env);
    let at = |level: i64| {
        resolver
            .resolve("pack_member", &TagContext::new().with_definition("level", Value::Int(level)))
            .unwrap()
    };

    let weak = at(1);
    let strong = at(9);
    assert_eq!(weak.property("max_health"), Some(&Value::Int(10)));
    assert_eq!(strong.property("max_health"), Some(&Value::Int(90)));
    assert_eq!(weak.property("fire_ticks"), Some(&Value::Int(1)));
    assert_eq!(strong.property("fire_ticks"), Some(&Value::Int(9)));
    assert_eq!(strong.ancestry().collect::<Vec<_>>(), vec!["pack_leader"]);
}

#[test]
fn dynamic_child_of_static_parent_copies_the_cache() {
    let env = environment();
    let registry = load_clean(
        vec![
            ScriptSource::new("banner")
                .with_base("villager")
                .with_static("true")
                .with_key("max_health", "20"),
            ScriptSource::new("banner_bearer")
                .with_base("banner")
                .with_key("fire_ticks", "<context[burn]>"),
        ],
        &env,
    );
    assert!(!registry.get("banner_bearer").unwrap().is_static());
    let resolver = TemplateResolver::new(&registry, &env);
    let burning = |ticks: i64| {
        resolver
            .resolve("banner_bearer", &TagContext::new().with_definition("burn", Value::Int(ticks)))
            .unwrap()
    };

    let first = burning(7);
    let second = burning(3);
    assert_eq!(first.property("fire_ticks"), Some(&Value::Int(7)));
    assert_eq!(second.property("fire_ticks"), Some(&Value::Int(3)));
    assert_eq!(second.property("max_health"), Some(&Value::Int(20)));

    let cached = registry.get("banner").unwrap().cached().unwrap();
    assert_eq!(cached.property("fire_ticks"), None);
    assert_eq!(cached.property("max_health"), Some(&Value::Int(20)));
}

#[test]
fn base_can_be_computed() {
    let env = environment();
    let registry = load_clean(
        vec![ScriptSource::new("shifty").with_base("<context[form]>")],
        &env,
    );
    let resolver = TemplateResolver::new(&registry, &env);

    let husk = resolver
        .resolve("shifty", &TagContext::new().with_definition("form", Value::text("husk")))
        .unwrap();
    assert_eq!(husk.native_type().path.as_ref(), "husk");

    let err = resolver.resolve("shifty", &TagContext::new()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingBase(_)));
}

// =============================================================================
// Custom collaborators
// =============================================================================

#[test]
fn custom_property_keys() {
    let mut keys = PropertyKeyMapper::standard();
    keys.register(KeyDescriptor::new("loot_table", Shape::Text)).unwrap();
    keys.register(KeyDescriptor::custom("speed", |value| {
        let speed = value.to_float()?;
        Ok(Value::Float(speed.clamp(0.0, 1.0)))
    }))
    .unwrap();
    assert!(keys.register(KeyDescriptor::new("Rotation", Shape::Any)).is_err());

    let env = environment().with_keys(keys);
    let registry = load_clean(
        vec![ScriptSource::new("runner")
            .with_base("zombie")
            .with_key("Loot Table", "goblin_drops")
            .with_key("speed", "4")],
        &env,
    );
    let runner = TemplateResolver::new(&registry, &env)
        .resolve("runner", &TagContext::new())
        .unwrap();
    assert_eq!(runner.property("loot_table"), Some(&Value::text("goblin_drops")));
    assert_eq!(runner.property("speed"), Some(&Value::Float(1.0)));
}

#[test]
fn custom_tags_reach_scripts() {
    let mut env = environment();
    env.tags.register_root("difficulty", |_| Ok(Value::Int(3)));
    let registry = load_clean(
        vec![ScriptSource::new("hard")
            .with_base("zombie")
            .with_key("max_health", "<difficulty.multiply[20]>")],
        &env,
    );
    let hard = TemplateResolver::new(&registry, &env)
        .resolve("hard", &TagContext::new())
        .unwrap();
    assert_eq!(hard.property("max_health"), Some(&Value::Int(60)));
}

#[test]
fn entity_tags() {
    let env = environment();
    let registry = load_clean(
        vec![
            ScriptSource::new("mimic")
                .with_base("<entity_type[sheep].full_name>")
                .with_flag("disguise", "<[base].namespace>"),
            ScriptSource::new("copycat")
                .with_base("mimic")
                .with_flag("copied", "<[base].get[type].full_name.to_upper>"),
        ],
        &env,
    );
    let resolver = TemplateResolver::new(&registry, &env);

    let mimic = resolver.resolve("mimic", &TagContext::new()).unwrap();
    assert_eq!(mimic.native_type().path.as_ref(), "sheep");
    assert_eq!(mimic.flag("disguise"), Some(&Value::text("minecraft")));

    let copycat = resolver.resolve("copycat", &TagContext::new()).unwrap();
    assert_eq!(copycat.flag("copied"), Some(&Value::text("MINECRAFT:SHEEP")));
    assert_eq!(copycat.native_type().path.as_ref(), "sheep");
}

#[test]
fn entity_type_references() {
    let env = environment();
    let registry = load_clean(goblins(), &env);
    let resolver = TemplateResolver::new(&registry, &env);

    match resolver.resolve_entity_type("elite_goblin", &TagContext::new()).unwrap() {
        EntityTypeRef::Script(template) => {
            assert_eq!(template.property("max_health"), Some(&Value::Int(80)));
        }
        EntityTypeRef::Native(id) => panic!("expected a script, got {id}"),
    }
    assert!(matches!(
        resolver.resolve_entity_type("skeleton", &TagContext::new()).unwrap(),
        EntityTypeRef::Native(_)
    ));
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn errors_name_the_script_and_field() {
    let env = environment();
    let registry = load_clean(
        vec![
            ScriptSource::new("parent").with_base("zombie").with_key("fire_ticks", "<number[1].divide[0]>"),
            ScriptSource::new("child").with_base("parent"),
        ],
        &env,
    );
    let err = TemplateResolver::new(&registry, &env)
        .resolve("child", &TagContext::new())
        .unwrap_err();

    let context = err.context.as_ref().unwrap();
    assert_eq!(context.source.as_deref(), Some("parent"));
    assert_eq!(context.stack, vec!["keys.fire_ticks".to_string()]);
    assert!(err.to_string().contains("division by zero"));
}

#[test]
fn unknown_script() {
    let env = environment();
    let registry = load_clean(goblins(), &env);
    let err = TemplateResolver::new(&registry, &env)
        .resolve("hobgoblin", &TagContext::new())
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingBase(ref m) if m.contains("hobgoblin")));
}
