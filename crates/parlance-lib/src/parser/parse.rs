//! Folding a chunk stream into an expression tree.

use parlance_core::expression::{
    Expression, ListReference, RuleReference, Sentence, Sequence, SequenceKind, TextChunk,
};

use super::chunk::{ChunkKind, ParseChunk, next_chunk, remove_delimiters, remove_escapes};
use super::error::{ParseError, ParseErrorKind};

/// Parses a template sentence.
///
/// The text is trimmed and treated as the body of a group, so a bare
/// sentence and `(sentence)` produce the same tree.
pub fn parse_sentence(text: &str) -> Result<Sentence, ParseError> {
    let wrapped = format!("({})", text.trim());
    let chunk = ParseChunk {
        kind: ChunkKind::Group,
        text: &wrapped,
        end_index: wrapped.len(),
    };
    let sequence = parse_group_or_alt(&chunk)?;
    Ok(Sentence::new(
        Expression::Sequence(sequence),
        Some(text.to_string()),
    ))
}

/// Maps a single chunk to an expression.
pub fn parse_expression(chunk: &ParseChunk<'_>) -> Result<Expression, ParseError> {
    match chunk.kind {
        ChunkKind::Word => Ok(Expression::Text(TextChunk::new(remove_escapes(chunk.text)))),
        ChunkKind::Group => Ok(Expression::Sequence(parse_group_or_alt(chunk)?)),
        ChunkKind::Opt => {
            // [x] is (x|): force alternative form, then add the omit branch.
            let mut sequence = parse_group_or_alt(chunk)?;
            sequence.ensure_alternative();
            sequence.items.push(Expression::Text(TextChunk::empty()));
            Ok(Expression::Sequence(sequence))
        }
        ChunkKind::List => {
            let interior = remove_delimiters(chunk.text);
            let (list_name, slot_name) = match interior.split_once(':') {
                Some((list_name, slot_name)) => (list_name, slot_name),
                None => (interior, interior),
            };
            if list_name.is_empty() || slot_name.is_empty() {
                return Err(ParseError::new(ParseErrorKind::EmptyReference, chunk.text));
            }
            Ok(Expression::List(ListReference::new(list_name, slot_name)))
        }
        ChunkKind::Rule => {
            let rule_name = remove_delimiters(chunk.text);
            if rule_name.is_empty() {
                return Err(ParseError::new(ParseErrorKind::EmptyReference, chunk.text));
            }
            Ok(Expression::Rule(RuleReference::new(rule_name)))
        }
        ChunkKind::Alt => Err(ParseError::new(ParseErrorKind::UnexpectedChunk, chunk.text)),
    }
}

/// Parses the body of a group or optional chunk.
///
/// Items accumulate into a group until the first `|`, which promotes the
/// sequence to an alternative; from then on items append to the most recent
/// branch and each further `|` opens a fresh one.
fn parse_group_or_alt(seq_chunk: &ParseChunk<'_>) -> Result<Sequence, ParseError> {
    if !matches!(seq_chunk.kind, ChunkKind::Group | ChunkKind::Opt) {
        return Err(ParseError::new(
            ParseErrorKind::UnexpectedChunk,
            seq_chunk.text,
        ));
    }

    let mut sequence = Sequence::group(Vec::new());
    let mut remaining = remove_delimiters(seq_chunk.text);

    while let Some(item_chunk) = next_chunk(remaining)? {
        match item_chunk.kind {
            ChunkKind::Alt => {
                sequence.ensure_alternative();
                sequence.items.push(Expression::group(Vec::new()));
            }
            _ => {
                let item = parse_expression(&item_chunk)?;
                if sequence.kind == SequenceKind::Alternative {
                    if sequence.items.is_empty() {
                        sequence.items.push(Expression::group(Vec::new()));
                    }
                    match sequence.items.last_mut() {
                        Some(Expression::Sequence(branch)) => branch.items.push(item),
                        _ => unreachable!("alternative branches are always sequences"),
                    }
                } else {
                    sequence.items.push(item);
                }
            }
        }

        let rest = remaining[item_chunk.end_index..].trim_start();
        if rest == remaining {
            return Err(ParseError::new(ParseErrorKind::NoProgress, seq_chunk.text));
        }
        remaining = rest;
    }

    Ok(sequence)
}
