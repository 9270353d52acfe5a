use parlance_core::expression::{Expression, ListReference, RuleReference, Sequence};

use super::error::ParseErrorKind;
use super::parse::parse_sentence;

fn root_items(text: &str) -> Vec<Expression> {
    let sentence = parse_sentence(text).expect("valid template");
    match sentence.expression {
        Expression::Sequence(Sequence { items, .. }) => items,
        other => panic!("sentence root is always a sequence, got {other:?}"),
    }
}

#[test]
fn plain_sentence_is_one_chunk() {
    assert_eq!(
        root_items("turn on the lights"),
        vec![Expression::text("turn on the lights")]
    );
}

#[test]
fn sentence_records_its_source() {
    let sentence = parse_sentence("turn on {area}").unwrap();
    assert_eq!(sentence.text.as_deref(), Some("turn on {area}"));
}

#[test]
fn optional_becomes_alternative_with_omit_branch() {
    assert_eq!(
        root_items("turn on [the] lights"),
        vec![
            Expression::text("turn on "),
            Expression::alternative(vec![
                Expression::group(vec![Expression::text("the")]),
                Expression::text(""),
            ]),
            Expression::text("lights"),
        ]
    );
}

#[test]
fn group_alternation_wraps_branches() {
    assert_eq!(
        root_items("give me the penn(y|ies)"),
        vec![
            Expression::text("give me the penn"),
            Expression::alternative(vec![
                Expression::group(vec![Expression::text("y")]),
                Expression::group(vec![Expression::text("ies")]),
            ]),
        ]
    );
}

#[test]
fn word_continues_directly_after_group() {
    assert_eq!(
        root_items("(start|stopp)ed"),
        vec![
            Expression::alternative(vec![
                Expression::group(vec![Expression::text("start")]),
                Expression::group(vec![Expression::text("stopp")]),
            ]),
            Expression::text("ed"),
        ]
    );
}

#[test]
fn top_level_alternation_promotes_the_root() {
    let sentence = parse_sentence("on|off").unwrap();
    assert_eq!(
        sentence.expression,
        Expression::alternative(vec![
            Expression::group(vec![Expression::text("on")]),
            Expression::group(vec![Expression::text("off")]),
        ])
    );
}

#[test]
fn branch_words_keep_trailing_space() {
    assert_eq!(
        root_items("set brightness to ( minimum | lowest)"),
        vec![
            Expression::text("set brightness to "),
            Expression::alternative(vec![
                Expression::group(vec![Expression::text("minimum ")]),
                Expression::group(vec![Expression::text("lowest")]),
            ]),
        ]
    );
}

#[test]
fn list_reference_defaults_slot_name() {
    assert_eq!(
        root_items("turn off {area}"),
        vec![
            Expression::text("turn off "),
            Expression::List(ListReference::new("area", "area")),
        ]
    );
}

#[test]
fn list_reference_with_explicit_slot() {
    assert_eq!(
        root_items("{area:zone}"),
        vec![Expression::List(ListReference::new("area", "zone"))]
    );
}

#[test]
fn rule_reference() {
    assert_eq!(
        root_items("turn off <area>"),
        vec![
            Expression::text("turn off "),
            Expression::Rule(RuleReference::new("area")),
        ]
    );
}

#[test]
fn escapes_are_removed_from_words() {
    assert_eq!(
        root_items(r"press \[enter\]"),
        vec![Expression::text("press [enter]")]
    );
}

#[test]
fn input_is_trimmed() {
    assert_eq!(
        root_items("  turn on the lights  "),
        vec![Expression::text("turn on the lights")]
    );
}

#[test]
fn unbalanced_template_is_an_error() {
    let error = parse_sentence("turn (on").expect_err("missing closer");
    assert_eq!(error.kind, ParseErrorKind::UnbalancedDelimiters);
}

#[test]
fn empty_list_reference_is_an_error() {
    let error = parse_sentence("turn off {}").expect_err("empty reference");
    assert_eq!(error.kind, ParseErrorKind::EmptyReference);
}

#[test]
fn empty_slot_name_is_an_error() {
    let error = parse_sentence("{area:}").expect_err("empty slot name");
    assert_eq!(error.kind, ParseErrorKind::EmptyReference);
}

#[test]
fn empty_rule_reference_is_an_error() {
    let error = parse_sentence("run <>").expect_err("empty reference");
    assert_eq!(error.kind, ParseErrorKind::EmptyReference);
}

#[test]
fn parse_error_display_names_the_chunk() {
    let error = parse_sentence("turn (on").unwrap_err();
    insta::assert_snapshot!(error.to_string(), @r#"unbalanced delimiters in "(on""#);
}
