use super::ParseErrorPrinter;
use crate::parser::{ParseError, ParseErrorKind, ParseMetadata};

#[test]
fn renders_kind_and_chunk() {
    let error = ParseError::new(ParseErrorKind::UnbalancedDelimiters, "(a [b");

    let rendered = ParseErrorPrinter::new(&error).render();

    assert!(rendered.contains("unbalanced delimiters"));
    assert!(rendered.contains("(a [b"));
}

#[test]
fn renders_metadata_location() {
    let error = ParseError::new(ParseErrorKind::TrailingEscape, "lights\\").with_metadata(
        ParseMetadata {
            file_name: Some("lights.json".into()),
            line_number: Some(7),
            intent_name: Some("TurnOn".into()),
        },
    );

    let rendered = ParseErrorPrinter::new(&error).render();

    assert!(rendered.contains("lights.json"));
    assert!(rendered.contains("TurnOn"));
    assert!(rendered.contains('7'));
}
