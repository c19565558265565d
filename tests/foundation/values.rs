//! Integration tests for Value conversions
//!
//! Script values mostly arrive as text; these cover how text is read as the
//! typed shapes tags and properties need.

use quill_foundation::{EntityTypeId, Rotation, Type, Value};

// =============================================================================
// Categories
// =============================================================================

#[test]
fn value_types() {
    assert_eq!(Value::Null.value_type(), Type::Null);
    assert_eq!(Value::Bool(true).value_type(), Type::Bool);
    assert_eq!(Value::Int(1).value_type(), Type::Int);
    assert_eq!(Value::Float(1.5).value_type(), Type::Float);
    assert_eq!(Value::text("a").value_type(), Type::Text);
    assert_eq!(Value::script("goblin").value_type(), Type::Script);
    assert_eq!(
        Value::EntityType(EntityTypeId::new("minecraft", "zombie")).value_type(),
        Type::EntityType
    );
}

#[test]
fn type_names() {
    assert_eq!(Type::Bool.name(), "boolean");
    assert_eq!(Type::Float.name(), "decimal");
    assert_eq!(Type::EntityType.to_string(), "entity type");
    assert!(!Type::CONCRETE.contains(&Type::Any));
}

// =============================================================================
// Conversions
// =============================================================================

#[test]
fn boolean_from_text() {
    assert!(Value::text(" TRUE ").to_boolean().unwrap());
    assert!(!Value::text("false").to_boolean().unwrap());
    assert!(Value::text("yes").to_boolean().is_err());
    assert!(Value::Int(1).to_boolean().is_err());
}

#[test]
fn integers_from_text_and_decimals() {
    assert_eq!(Value::text("42").to_int().unwrap(), 42);
    assert_eq!(Value::text("40.0").to_int().unwrap(), 40);
    assert_eq!(Value::Float(3.0).to_int().unwrap(), 3);
    assert!(Value::Float(3.5).to_int().is_err());
    assert!(Value::text("forty").to_int().is_err());
}

#[test]
fn numeric_keeps_integers_integral() {
    assert_eq!(Value::text("7").to_numeric().unwrap(), Value::Int(7));
    assert_eq!(Value::text("7.25").to_numeric().unwrap(), Value::Float(7.25));
    assert!(Value::Bool(true).to_numeric().is_err());
}

#[test]
fn lists_and_maps_from_text() {
    let list = Value::text("a|b|c").to_list().unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list.get(1), Some(&Value::text("b")));
    assert!(Value::text("").to_list().unwrap().is_empty());

    let map = Value::text("Head:helmet|chest:plate").to_map().unwrap();
    assert_eq!(map.get("head"), Some(&Value::text("helmet")));
    assert_eq!(map.len(), 2);
    assert!(Value::text("no colon here").to_map().is_err());
}

#[test]
fn rotation_from_text_and_list() {
    assert_eq!(
        Value::text("10, 20, 30").to_rotation().unwrap(),
        Rotation::new(10.0, 20.0, 30.0)
    );
    assert_eq!(
        Value::text("45").to_rotation().unwrap(),
        Rotation::new(45.0, 0.0, 0.0)
    );
    let list = Value::from(vec![Value::Int(1), Value::Float(2.5)]);
    assert_eq!(list.to_rotation().unwrap(), Rotation::new(1.0, 2.5, 0.0));
    assert!(Value::text("1,2,3,4").to_rotation().is_err());
}

#[test]
fn formatted_from_any_value() {
    let text = Value::text("&aGreen").to_formatted();
    assert_eq!(text.plain(), "Green");
    let number = Value::Int(5).to_formatted();
    assert_eq!(number.plain(), "5");
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn display_joins_collections() {
    let list = Value::from(vec!["a", "b"]);
    assert_eq!(list.to_string(), "a|b");

    let map = Value::map_of([("b", Value::Int(2)), ("a", Value::Int(1))]);
    assert_eq!(map.to_string(), "a:1|b:2");

    assert_eq!(Value::Null.to_string(), "null");
}

#[test]
fn entity_type_ids() {
    let id = EntityTypeId::parse(" Zombie ", "minecraft").unwrap();
    assert_eq!(id.to_string(), "minecraft:zombie");
    assert_eq!(EntityTypeId::parse("mod:drake", "minecraft").unwrap().namespace.as_ref(), "mod");
    assert!(EntityTypeId::parse("", "minecraft").is_none());
    assert!(EntityTypeId::parse("a:b:c", "minecraft").is_none());
}
