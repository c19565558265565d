//! Integration tests for Argument compilation and evaluation

use quill_foundation::{ErrorKind, Type, Value};
use quill_tags::{Argument, Segment, TagContext, TagRegistry};

fn eval(source: &str) -> Value {
    Argument::compile(source)
        .unwrap()
        .evaluate(&TagRegistry::standard(), &TagContext::new())
        .unwrap()
}

// =============================================================================
// Compilation
// =============================================================================

#[test]
fn literal_text_is_constant() {
    let arg = Argument::compile("forty").unwrap();
    assert!(arg.is_constant());
    assert_eq!(arg.source(), "forty");
    assert_eq!(arg.to_string(), "forty");
}

#[test]
fn mixed_text_compiles_to_segments() {
    let arg = Argument::compile("Hello <[name]>, you have <number[3]> lives").unwrap();
    assert!(!arg.is_constant());
    let tags = arg
        .segments()
        .iter()
        .filter(|s| matches!(s, Segment::Tag(_)))
        .count();
    assert_eq!(tags, 2);
}

#[test]
fn malformed_tags_fail_to_compile() {
    for source in ["<text]x>", "<text[a]b>", "<text[a].>", "<a..b>"] {
        let err = Argument::compile(source).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Parse { .. }), "{source}");
    }
}

#[test]
fn unmatched_angle_is_text() {
    assert_eq!(eval("3 < 4"), Value::text("3 < 4"));
    assert_eq!(eval("<>"), Value::text("<>"));
}

// =============================================================================
// Evaluation
// =============================================================================

#[test]
fn single_tag_keeps_its_type() {
    assert_eq!(eval("<number[40]>"), Value::Int(40));
    assert_eq!(eval("<boolean[true]>"), Value::Bool(true));
    assert_eq!(eval("<list[a|b]>").value_type(), Type::List);
}

#[test]
fn mixed_arguments_render_text() {
    assert_eq!(eval("hp: <number[40].add[2]>"), Value::text("hp: 42"));
    assert_eq!(eval(""), Value::text(""));
}

#[test]
fn parameters_nest() {
    assert_eq!(
        eval("<number[<number[2].multiply[<number[3]>]>].add[1]>"),
        Value::Int(7)
    );
}

#[test]
fn evaluation_is_repeatable() {
    let tags = TagRegistry::standard();
    let arg = Argument::compile("<context[level].multiply[10]>").unwrap();
    for level in 1..=3 {
        let ctx = TagContext::new().with_definition("level", Value::Int(level));
        assert_eq!(arg.evaluate(&tags, &ctx).unwrap(), Value::Int(level * 10));
    }
}

#[test]
fn failures_are_wrapped_with_tag_text() {
    let err = Argument::compile("<number[1].divide[0]>")
        .unwrap()
        .evaluate(&TagRegistry::standard(), &TagContext::new())
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TagResolution { ref tag, .. } if tag == "number[1].divide[0]"));
    assert!(err.to_string().contains("division by zero"));
}

#[test]
fn evaluate_text_renders() {
    let text = Argument::compile("<number[1.5].round>")
        .unwrap()
        .evaluate_text(&TagRegistry::standard(), &TagContext::new())
        .unwrap();
    assert_eq!(text, "2");
}
