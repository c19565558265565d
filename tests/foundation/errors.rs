//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use quill_foundation::{Error, ErrorContext, ErrorKind, Type};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_type_mismatch() {
    let err = Error::type_mismatch(Type::Int, Type::Text);
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
    let msg = format!("{err}");
    assert!(msg.contains("integer"));
    assert!(msg.contains("text"));
}

#[test]
fn error_unknown_tag_names_category() {
    let err = Error::unknown_tag("shout", Some(Type::Text));
    assert_eq!(err.to_string(), "unknown tag 'shout' on text");

    let err = Error::unknown_tag("nothing", None);
    assert_eq!(err.to_string(), "unknown tag 'nothing' on root");
}

#[test]
fn error_malformed_script() {
    let err = Error::malformed_script("goblin", "base key is missing");
    assert!(matches!(err.kind, ErrorKind::MalformedScript { .. }));
    assert_eq!(err.to_string(), "malformed script 'goblin': base key is missing");
}

#[test]
fn error_cyclic_inheritance_shows_chain() {
    let err = Error::new(ErrorKind::CyclicInheritance {
        chain: vec!["a".into(), "b".into(), "a".into()],
    });
    assert_eq!(err.to_string(), "cyclic inheritance: a -> b -> a");
}

#[test]
fn error_parse_position() {
    let err = Error::parse("unexpected ']'", 7);
    assert!(matches!(err.kind, ErrorKind::Parse { position: 7, .. }));
}

// =============================================================================
// Wrapping
// =============================================================================

#[test]
fn tag_resolution_wraps_source() {
    let inner = Error::invalid_property("key 'wingspan' does not seem to exist");
    let err = Error::tag_resolution("number[x]", inner);
    let msg = err.to_string();
    assert!(msg.starts_with("tag <number[x]> failed"));
    assert!(msg.contains("wingspan"));
}

#[test]
fn innermost_looks_through_wrappers() {
    let inner = Error::missing_base("no entity script named 'x'");
    let err = Error::tag_resolution("outer", Error::tag_resolution("inner", inner));
    assert!(matches!(err.innermost(), ErrorKind::MissingBase(_)));

    let plain = Error::failed("boom");
    assert!(matches!(plain.innermost(), ErrorKind::Internal(_)));
}

// =============================================================================
// Context
// =============================================================================

#[test]
fn context_display() {
    let ctx = ErrorContext::new()
        .with_source("goblin")
        .with_frame("keys.max_health");
    let rendered = ctx.to_string();
    assert!(rendered.starts_with("in goblin"));
    assert!(rendered.contains("  in keys.max_health"));
}

#[test]
fn error_keeps_context() {
    let err = Error::task_type("unknown AI task type 'dance'")
        .with_context(ErrorContext::new().with_source("dancer"));
    assert_eq!(err.context.unwrap().source.as_deref(), Some("dancer"));
}
