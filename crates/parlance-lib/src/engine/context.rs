//! Matcher state: the snapshots that branch, and the read-only settings.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use parlance_core::expression::Sentence;
use parlance_core::text::strip_punctuation;

use crate::intents::SlotList;

/// A named entity captured from a `{slot_list}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchEntity {
    pub name: String,
    pub value: Value,
    /// The exact input text consumed to produce this capture. Empty for
    /// fixed slots injected by intent data.
    pub text: String,
}

/// Read-only lookups available while matching.
///
/// Borrows the catalogue; expression trees and slot lists are never copied
/// into the matcher.
#[derive(Debug, Clone, Default)]
pub struct MatchSettings<'a> {
    pub slot_lists: IndexMap<&'a str, &'a SlotList>,
    pub expansion_rules: IndexMap<&'a str, &'a Sentence>,
    pub ignore_whitespace: bool,
}

/// Snapshot of matcher progress.
///
/// Each alternative branch gets its own copy and evolves independently; the
/// entity list and context map only ever grow at the end.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchContext {
    /// Input text remaining to be consumed.
    pub text: String,
    /// Entities captured so far, in capture order.
    pub entities: Vec<MatchEntity>,
    /// Context items from the caller, plus any acquired from slot values.
    pub intent_context: IndexMap<String, Value>,
    /// Whether the remaining text starts at a word boundary.
    pub is_start_of_word: bool,
}

impl MatchContext {
    pub fn new(text: String, intent_context: IndexMap<String, Value>) -> Self {
        Self {
            text,
            entities: Vec::new(),
            intent_context,
            is_start_of_word: true,
        }
    }

    /// A completed match: nothing left but whitespace and punctuation.
    pub fn is_match(&self) -> bool {
        strip_punctuation(&self.text).trim().is_empty()
    }
}
