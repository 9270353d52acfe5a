//! The non-deterministic expression evaluator.
//!
//! [`match_expression`] enumerates every context reachable by consuming
//! input through an expression. The stream is pull-based: alternatives and
//! slot-list values branch on demand, so a caller that stops at the first
//! complete match never pays for the branches behind it. Groups fold their
//! working set left-to-right and short-circuit as soon as it empties.
//! Enumeration order is deterministic: left-to-right, branches in
//! declaration order.

use std::iter;
use std::rc::Rc;

use serde_json::Value;

use parlance_core::expression::{
    Expression, ListReference, RuleReference, Sequence, SequenceKind, TextChunk,
};
use parlance_core::text::{punctuation_to_space, strip_whitespace};

use crate::intents::{RangeSlotList, SlotList, TextSlotList};

use super::context::{MatchContext, MatchEntity, MatchSettings};
use super::error::MatchError;

/// How deep `<rule>` expansion may nest before matching gives up.
const EXPANSION_DEPTH_LIMIT: usize = 64;

pub(crate) type MatchResults<'a> = Box<dyn Iterator<Item = Result<MatchContext, MatchError>> + 'a>;

/// Yields every context reachable by consuming input from `context.text`
/// through `expression`.
///
/// A missing list or rule surfaces as an `Err` item; it aborts the whole
/// recognition, not just one branch.
pub fn match_expression<'a>(
    settings: &MatchSettings<'a>,
    context: MatchContext,
    expression: &'a Expression,
) -> impl Iterator<Item = Result<MatchContext, MatchError>> + 'a {
    match_shared(Rc::new(settings.clone()), context, expression, 0)
}

/// Entry point for callers that keep one settings allocation alive across
/// many sentences. Branch iterators own a handle to the settings, so the
/// stream outlives the borrow it was built from.
pub(crate) fn match_shared<'a>(
    settings: Rc<MatchSettings<'a>>,
    context: MatchContext,
    expression: &'a Expression,
    depth: usize,
) -> MatchResults<'a> {
    match expression {
        Expression::Text(chunk) => match match_text_chunk(&settings, context, chunk) {
            Some(next) => Box::new(iter::once(Ok(next))),
            None => Box::new(iter::empty()),
        },
        Expression::Sequence(sequence) => match_sequence(settings, context, sequence, depth),
        Expression::List(list_ref) => match_list(settings, context, list_ref, depth),
        Expression::Rule(rule_ref) => match_rule(settings, context, rule_ref, depth),
    }
}

/// A text chunk consumes a literal prefix of the input, with two
/// relaxations: leading whitespace is insignificant at a word boundary, and
/// a failed match is retried once with punctuation runs turned into spaces.
fn match_text_chunk(
    settings: &MatchSettings<'_>,
    context: MatchContext,
    chunk: &TextChunk,
) -> Option<MatchContext> {
    let (chunk_text, context_text) = if settings.ignore_whitespace {
        (strip_whitespace(&chunk.text), strip_whitespace(&context.text))
    } else if context.is_start_of_word {
        (
            chunk.text.trim_start().to_string(),
            context.text.trim_start().to_string(),
        )
    } else {
        (chunk.text.clone(), context.text.clone())
    };

    if chunk.is_empty() {
        // The "omit" branch of an optional.
        return Some(context);
    }

    if let Some(rest) = context_text.strip_prefix(&chunk_text) {
        return Some(MatchContext {
            text: rest.to_string(),
            // The unstripped chunk decides the boundary: a template chunk
            // ending in a space puts the next match at a word start.
            is_start_of_word: chunk.text.ends_with(' '),
            entities: context.entities,
            intent_context: context.intent_context,
        });
    }

    if !chunk_text.is_empty() && chunk_text.chars().all(char::is_whitespace) {
        // A whitespace-only chunk that found no whitespace is a free
        // boundary crossing: consume nothing, mark the word start.
        return Some(MatchContext {
            text: context_text,
            is_start_of_word: true,
            entities: context.entities,
            intent_context: context.intent_context,
        });
    }

    let depunctuated = punctuation_to_space(&context.text);
    if let Some(rest) = depunctuated.trim_start().strip_prefix(&chunk_text) {
        return Some(MatchContext {
            text: rest.to_string(),
            is_start_of_word: context.is_start_of_word,
            entities: context.entities,
            intent_context: context.intent_context,
        });
    }

    None
}

fn match_sequence<'a>(
    settings: Rc<MatchSettings<'a>>,
    context: MatchContext,
    sequence: &'a Sequence,
    depth: usize,
) -> MatchResults<'a> {
    match sequence.kind {
        // Any branch may match; branches are explored on demand.
        SequenceKind::Alternative => Box::new(sequence.items.iter().flat_map(move |item| {
            match_shared(Rc::clone(&settings), context.clone(), item, depth)
        })),
        // Every item must match: fold the working set through the items.
        // An empty group leaves the working set untouched, so it matches
        // the empty string.
        SequenceKind::Group => {
            let mut contexts = vec![context];
            for item in &sequence.items {
                let mut next_contexts = Vec::new();
                for group_context in contexts {
                    for result in match_shared(Rc::clone(&settings), group_context, item, depth) {
                        match result {
                            Ok(item_context) => next_contexts.push(item_context),
                            Err(error) => return Box::new(iter::once(Err(error))),
                        }
                    }
                }
                contexts = next_contexts;
                if contexts.is_empty() {
                    break;
                }
            }
            Box::new(contexts.into_iter().map(Ok))
        }
    }
}

fn match_list<'a>(
    settings: Rc<MatchSettings<'a>>,
    context: MatchContext,
    list_ref: &'a ListReference,
    depth: usize,
) -> MatchResults<'a> {
    let Some(slot_list) = settings.slot_lists.get(list_ref.list_name.as_str()).copied() else {
        return Box::new(iter::once(Err(MatchError::MissingList(
            list_ref.list_name.clone(),
        ))));
    };

    match slot_list {
        SlotList::Text(list) => match_text_list(settings, context, list_ref, list, depth),
        SlotList::Range(range) => match_range_list(context, list_ref, *range),
    }
}

/// Tries every list value against the input, on demand. Each value that
/// consumes a prefix becomes a branch carrying the captured entity.
fn match_text_list<'a>(
    settings: Rc<MatchSettings<'a>>,
    context: MatchContext,
    list_ref: &'a ListReference,
    list: &'a TextSlotList,
    depth: usize,
) -> MatchResults<'a> {
    if context.text.is_empty() {
        return Box::new(iter::empty());
    }

    Box::new(list.values.iter().flat_map(move |slot_value| {
        let context = context.clone();
        let branches = match_shared(
            Rc::clone(&settings),
            context.clone(),
            &slot_value.text_in,
            depth,
        );
        branches.map(move |result| {
            result.map(|value_context| {
                let mut entities = context.entities.clone();
                entities.push(MatchEntity {
                    name: list_ref.slot_name.clone(),
                    value: slot_value.value_out.clone(),
                    text: consumed_text(&context.text, &value_context.text),
                });

                match &slot_value.context {
                    // The value's own context entries win on collision.
                    Some(extra) => {
                        let mut intent_context = context.intent_context.clone();
                        for (key, value) in extra {
                            intent_context.insert(key.clone(), value.clone());
                        }
                        MatchContext {
                            text: value_context.text,
                            entities,
                            intent_context,
                            is_start_of_word: context.is_start_of_word,
                        }
                    }
                    None => MatchContext {
                        text: value_context.text,
                        entities,
                        intent_context: value_context.intent_context,
                        is_start_of_word: context.is_start_of_word,
                    },
                }
            })
        })
    }))
}

/// The input span a slot value consumed: the original text minus the
/// remainder the value left behind.
fn consumed_text(original: &str, remaining: &str) -> String {
    if remaining.is_empty() {
        return original.to_string();
    }
    let mut end = original.len().saturating_sub(remaining.len());
    while end > 0 && !original.is_char_boundary(end) {
        end -= 1;
    }
    original[..end].to_string()
}

/// Matches a leading integer against the range. The digits are consumed;
/// the captured text is the first whitespace-delimited token of the input.
fn match_range_list<'a>(
    context: MatchContext,
    list_ref: &'a ListReference,
    range: RangeSlotList,
) -> MatchResults<'a> {
    if context.text.is_empty() {
        return Box::new(iter::empty());
    }
    let Some((number_start, number_end)) = leading_integer(&context.text) else {
        return Box::new(iter::empty());
    };
    let Ok(number) = context.text[number_start..number_end].parse::<i64>() else {
        return Box::new(iter::empty());
    };
    if !range.contains(number) {
        return Box::new(iter::empty());
    }

    let captured = context
        .text
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string();
    let remaining = context.text[number_end..].to_string();
    let mut entities = context.entities;
    entities.push(MatchEntity {
        name: list_ref.slot_name.clone(),
        value: Value::from(number),
        text: captured,
    });

    Box::new(iter::once(Ok(MatchContext {
        text: remaining,
        entities,
        intent_context: context.intent_context,
        is_start_of_word: context.is_start_of_word,
    })))
}

/// Spans the integer of `^\s*-?[0-9]+`, if present.
fn leading_integer(text: &str) -> Option<(usize, usize)> {
    let rest = text.trim_start();
    let start = text.len() - rest.len();
    let bytes = rest.as_bytes();
    let mut index = usize::from(bytes.first() == Some(&b'-'));
    let digits_start = index;
    while index < bytes.len() && bytes[index].is_ascii_digit() {
        index += 1;
    }
    (index > digits_start).then_some((start, start + index))
}

/// A rule reference inlines the rule's expression at the reference site,
/// sharing the caller's context.
fn match_rule<'a>(
    settings: Rc<MatchSettings<'a>>,
    context: MatchContext,
    rule_ref: &'a RuleReference,
    depth: usize,
) -> MatchResults<'a> {
    let Some(sentence) = settings
        .expansion_rules
        .get(rule_ref.rule_name.as_str())
        .copied()
    else {
        return Box::new(iter::once(Err(MatchError::MissingRule(
            rule_ref.rule_name.clone(),
        ))));
    };

    if depth >= EXPANSION_DEPTH_LIMIT {
        return Box::new(iter::once(Err(MatchError::ExpansionTooDeep(
            rule_ref.rule_name.clone(),
        ))));
    }

    match_shared(settings, context, &sentence.expression, depth + 1)
}
