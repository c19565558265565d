//! Integration tests for FormattedText
//!
//! Tests legacy colour code parsing and rendering.

use quill_foundation::{Color, FormattedText, Value};

#[test]
fn section_sign_and_ampersand_are_equivalent() {
    let amp = FormattedText::from_legacy("&6Gold");
    let section = FormattedText::from_legacy("§6Gold");
    assert_eq!(amp, section);
    assert_eq!(amp.spans()[0].color, Some(Color::Gold));
}

#[test]
fn reset_clears_styles() {
    let text = FormattedText::from_legacy("&c&lBold&rplain");
    assert_eq!(text.spans().len(), 2);
    assert!(text.spans()[0].bold);
    assert_eq!(text.spans()[1].color, None);
    assert!(!text.spans()[1].bold);
    assert_eq!(text.plain(), "Boldplain");
}

#[test]
fn uppercase_codes_are_recognised() {
    let text = FormattedText::from_legacy("&AGreen");
    assert_eq!(text.spans()[0].color, Some(Color::Green));
}

#[test]
fn colour_codes_round_trip() {
    for code in "0123456789abcdef".chars() {
        let color = Color::from_code(code).unwrap();
        assert_eq!(color.code(), code);
    }
    assert!(Color::from_code('g').is_none());
}

#[test]
fn empty_input_has_one_empty_span() {
    let text = FormattedText::from_legacy("");
    assert_eq!(text.spans().len(), 1);
    assert_eq!(text.plain(), "");
}

#[test]
fn formatted_value_displays_legacy_form() {
    let value = Value::FormattedText(FormattedText::from_legacy("&aGoblin").into());
    assert_eq!(value.to_string(), "&aGoblin");
}
