use crate::expression::{Expression, Sequence, SequenceKind, TextChunk};

#[test]
fn empty_chunk() {
    assert!(TextChunk::empty().is_empty());
    assert!(!TextChunk::new("x").is_empty());
}

#[test]
fn ensure_alternative_wraps_items_into_first_branch() {
    let mut seq = Sequence::group(vec![Expression::text("a"), Expression::text("b")]);

    seq.ensure_alternative();

    assert_eq!(seq.kind, SequenceKind::Alternative);
    assert_eq!(
        seq.items,
        vec![Expression::group(vec![
            Expression::text("a"),
            Expression::text("b"),
        ])]
    );
}

#[test]
fn ensure_alternative_is_idempotent() {
    let mut seq = Sequence::alternative(vec![Expression::group(vec![Expression::text("a")])]);
    let before = seq.clone();

    seq.ensure_alternative();

    assert_eq!(seq, before);
}

#[test]
fn ensure_alternative_on_empty_group() {
    let mut seq = Sequence::group(Vec::new());

    seq.ensure_alternative();

    assert_eq!(seq.items, vec![Expression::group(Vec::new())]);
}
