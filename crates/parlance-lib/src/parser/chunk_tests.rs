use super::chunk::{ChunkKind, next_chunk, remove_delimiters, remove_escapes};
use super::error::ParseErrorKind;

fn chunk(text: &str) -> super::chunk::ParseChunk<'_> {
    next_chunk(text)
        .expect("scannable input")
        .expect("non-empty input")
}

#[test]
fn exhausted_input() {
    assert_eq!(next_chunk("").unwrap(), None);
    assert_eq!(next_chunk("   ").unwrap(), None);
}

#[test]
fn word_spans_whitespace() {
    let c = chunk("turn on the lights");
    assert_eq!(c.kind, ChunkKind::Word);
    assert_eq!(c.text, "turn on the lights");
    assert_eq!(c.end_index, 18);
}

#[test]
fn word_stops_at_delimiter_keeping_trailing_space() {
    let c = chunk("turn off {area}");
    assert_eq!(c.kind, ChunkKind::Word);
    assert_eq!(c.text, "turn off ");
    assert_eq!(c.end_index, 9);
}

#[test]
fn leading_whitespace_is_skipped_but_counted() {
    let c = chunk("  foo");
    assert_eq!(c.text, "foo");
    assert_eq!(c.end_index, 5);
}

#[test]
fn alt_separator() {
    let c = chunk("| rest");
    assert_eq!(c.kind, ChunkKind::Alt);
    assert_eq!(c.text, "|");
    assert_eq!(c.end_index, 1);
}

#[test]
fn group_balances_same_kind_nesting() {
    let c = chunk("(a (b) c) tail");
    assert_eq!(c.kind, ChunkKind::Group);
    assert_eq!(c.text, "(a (b) c)");
    assert_eq!(c.end_index, 9);
}

#[test]
fn other_delimiters_are_content_inside_a_group() {
    let c = chunk("(a [b] {c})");
    assert_eq!(c.kind, ChunkKind::Group);
    assert_eq!(c.text, "(a [b] {c})");
}

#[test]
fn optional_and_list_and_rule_chunks() {
    assert_eq!(chunk("[the] x").kind, ChunkKind::Opt);
    assert_eq!(chunk("{area} x").kind, ChunkKind::List);
    assert_eq!(chunk("<area> x").kind, ChunkKind::Rule);
}

#[test]
fn escaped_delimiter_stays_in_word() {
    let c = chunk(r"a\(b c");
    assert_eq!(c.kind, ChunkKind::Word);
    assert_eq!(c.text, r"a\(b c");
}

#[test]
fn unbalanced_group_is_an_error() {
    let error = next_chunk("(a (b)").expect_err("missing closer");
    assert_eq!(error.kind, ParseErrorKind::UnbalancedDelimiters);
}

#[test]
fn stray_closer_is_an_error() {
    let error = next_chunk(") x").expect_err("no opener");
    assert_eq!(error.kind, ParseErrorKind::UnexpectedClose);
}

#[test]
fn trailing_escape_is_an_error() {
    let error = next_chunk(r"ab\").expect_err("dangling escape");
    assert_eq!(error.kind, ParseErrorKind::TrailingEscape);
}

#[test]
fn escape_removal() {
    assert_eq!(remove_escapes(r"a\(b\\c"), r"a(b\c");
    assert_eq!(remove_escapes("plain"), "plain");
}

#[test]
fn delimiter_removal() {
    assert_eq!(remove_delimiters("(a|b)"), "a|b");
    assert_eq!(remove_delimiters("{}"), "");
}
