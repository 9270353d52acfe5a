//! Recognition driver: preprocess input, try every intent in catalogue
//! order, filter by context, emit results.

use std::iter;
use std::rc::Rc;

use indexmap::IndexMap;
use serde_json::Value;

use parlance_core::expression::Sentence;
use parlance_core::text::{normalize_text, normalize_whitespace, strip_whitespace};

use crate::intents::{Intent, IntentData, Intents, SlotList};

use super::context::{MatchContext, MatchEntity, MatchSettings};
use super::matcher::{MatchResults, match_expression, match_shared};

/// Overrides for [`is_match`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchOptions<'a> {
    pub slot_lists: Option<&'a IndexMap<String, SlotList>>,
    pub expansion_rules: Option<&'a IndexMap<String, Sentence>>,
    pub skip_words: Option<&'a [String]>,
    pub intent_context: Option<&'a IndexMap<String, Value>>,
    pub ignore_whitespace: bool,
}

/// Overrides for [`recognize`] and [`recognize_all`].
///
/// Caller-provided slot lists and expansion rules are merged over the
/// catalogue's; the caller wins on name collision. Skip words combine.
#[derive(Debug, Clone)]
pub struct RecognizeOptions<'a> {
    pub slot_lists: Option<&'a IndexMap<String, SlotList>>,
    pub expansion_rules: Option<&'a IndexMap<String, Sentence>>,
    pub skip_words: Option<&'a [String]>,
    pub intent_context: Option<&'a IndexMap<String, Value>>,
    /// Response key used when the matched intent data carries none.
    pub default_response: Option<String>,
}

impl Default for RecognizeOptions<'_> {
    fn default() -> Self {
        Self {
            slot_lists: None,
            expansion_rules: None,
            skip_words: None,
            intent_context: None,
            default_response: Some("default".to_string()),
        }
    }
}

/// Result of recognition.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizeResult<'a> {
    pub intent: &'a Intent,
    /// Captured entities by name; on duplicate names the last capture wins.
    pub entities: IndexMap<String, MatchEntity>,
    /// Every captured entity in capture order, duplicates included.
    pub entities_list: Vec<MatchEntity>,
    /// Response key.
    pub response: Option<String>,
}

/// First match of the input against the catalogue, if any.
pub fn recognize<'a>(
    text: &str,
    intents: &'a Intents,
    options: RecognizeOptions<'a>,
) -> crate::Result<Option<RecognizeResult<'a>>> {
    recognize_all(text, intents, options).next().transpose()
}

/// Lazily enumerates every match of the input against the catalogue.
///
/// Results follow catalogue order: intents in declaration order, sentences
/// in declaration order within each intent, matcher branches in grammar
/// order. Branches are pulled from the matcher one at a time, so stopping
/// after the first result leaves the rest of the search unexplored.
pub fn recognize_all<'a>(
    text: &str,
    intents: &'a Intents,
    options: RecognizeOptions<'a>,
) -> RecognizeAll<'a> {
    let mut skip_words: Vec<&str> = Vec::new();
    if let Some(extra) = options.skip_words {
        skip_words.extend(extra.iter().map(String::as_str));
    }
    skip_words.extend(intents.skip_words.iter().map(String::as_str));

    let text = prepare_input(text, &skip_words, intents.settings.ignore_whitespace);

    let mut slot_lists: IndexMap<&'a str, &'a SlotList> = intents
        .slot_lists
        .iter()
        .map(|(name, list)| (name.as_str(), list))
        .collect();
    if let Some(extra) = options.slot_lists {
        for (name, list) in extra {
            slot_lists.insert(name.as_str(), list);
        }
    }

    let mut expansion_rules: IndexMap<&'a str, &'a Sentence> = intents
        .expansion_rules
        .iter()
        .map(|(name, sentence)| (name.as_str(), sentence))
        .collect();
    if let Some(extra) = options.expansion_rules {
        for (name, sentence) in extra {
            expansion_rules.insert(name.as_str(), sentence);
        }
    }

    RecognizeAll {
        text,
        settings: Rc::new(MatchSettings {
            slot_lists,
            expansion_rules,
            ignore_whitespace: intents.settings.ignore_whitespace,
        }),
        intent_context: options.intent_context.cloned().unwrap_or_default(),
        default_response: options.default_response,
        intents: intents.intents.values(),
        current_intent: None,
        current_data: None,
        data_index: 0,
        sentence_index: 0,
        pending: Box::new(iter::empty()),
        done: false,
    }
}

/// First context that completely consumes the input against one sentence.
pub fn is_match<'a>(
    text: &str,
    sentence: &'a Sentence,
    options: MatchOptions<'a>,
) -> crate::Result<Option<MatchContext>> {
    let skip_words: Vec<&str> = options
        .skip_words
        .map(|words| words.iter().map(String::as_str).collect())
        .unwrap_or_default();
    let text = prepare_input(text, &skip_words, options.ignore_whitespace);

    let settings = MatchSettings {
        slot_lists: options
            .slot_lists
            .map(|lists| {
                lists
                    .iter()
                    .map(|(name, list)| (name.as_str(), list))
                    .collect()
            })
            .unwrap_or_default(),
        expansion_rules: options
            .expansion_rules
            .map(|rules| {
                rules
                    .iter()
                    .map(|(name, rule)| (name.as_str(), rule))
                    .collect()
            })
            .unwrap_or_default(),
        ignore_whitespace: options.ignore_whitespace,
    };

    let initial = MatchContext::new(text, options.intent_context.cloned().unwrap_or_default());
    for result in match_expression(&settings, initial, &sentence.expression) {
        let context = result?;
        if context.is_match() {
            return Ok(Some(context));
        }
    }
    Ok(None)
}

/// Normalize, drop skip words, then either strip all whitespace or append
/// the artificial trailing word boundary.
fn prepare_input(text: &str, skip_words: &[&str], ignore_whitespace: bool) -> String {
    let mut text = normalize_text(text).trim().to_string();
    if !skip_words.is_empty() {
        text = remove_skip_words(&text, skip_words);
    }
    if ignore_whitespace {
        strip_whitespace(&text)
    } else {
        text.push(' ');
        text
    }
}

/// Skip words are removed longest first; shorter ones may be prefixes of
/// longer ones.
fn remove_skip_words(text: &str, skip_words: &[&str]) -> String {
    let mut skip_words = skip_words.to_vec();
    skip_words.sort_by_key(|word| std::cmp::Reverse(word.len()));

    let mut text = text.to_string();
    for word in skip_words {
        let word = normalize_text(word);
        if word.is_empty() {
            continue;
        }
        text = remove_whole_word(&text, &word);
    }
    normalize_whitespace(&text).trim().to_string()
}

/// Removes every whole-word occurrence: neighbors on both sides must not be
/// word characters.
fn remove_whole_word(text: &str, word: &str) -> String {
    fn is_word_char(c: char) -> bool {
        c.is_alphanumeric() || c == '_'
    }

    let mut result = String::with_capacity(text.len());
    let mut remainder = text;
    loop {
        let Some(index) = remainder.find(word) else {
            result.push_str(remainder);
            return result;
        };
        let end = index + word.len();
        let before = if index == 0 {
            result.chars().next_back()
        } else {
            remainder[..index].chars().next_back()
        };
        let after = remainder[end..].chars().next();
        if !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char) {
            result.push_str(&remainder[..index]);
        } else {
            result.push_str(&remainder[..end]);
        }
        remainder = &remainder[end..];
    }
}

/// Iterator over recognition results.
///
/// Holds the matcher's live branch stream for the current sentence and
/// pulls one candidate context per step; nothing is buffered ahead of the
/// caller. A matcher error (missing list or rule) yields one `Err` and then
/// fuses the iterator.
pub struct RecognizeAll<'a> {
    text: String,
    settings: Rc<MatchSettings<'a>>,
    intent_context: IndexMap<String, Value>,
    default_response: Option<String>,
    intents: indexmap::map::Values<'a, String, Intent>,
    current_intent: Option<&'a Intent>,
    current_data: Option<&'a IntentData>,
    data_index: usize,
    sentence_index: usize,
    pending: MatchResults<'a>,
    done: bool,
}

impl<'a> Iterator for RecognizeAll<'a> {
    type Item = crate::Result<RecognizeResult<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            while let Some(result) = self.pending.next() {
                let context = match result {
                    Ok(context) => context,
                    Err(error) => {
                        self.done = true;
                        return Some(Err(error.into()));
                    }
                };
                if !context.is_match() {
                    continue;
                }
                let data = self
                    .current_data
                    .expect("pending contexts imply current intent data");
                if excludes_context_rejects(data, &context)
                    || requires_context_rejects(data, &context)
                {
                    continue;
                }
                return Some(Ok(self.result_for(context, data)));
            }

            let Some(sentence) = self.advance() else {
                self.done = true;
                return None;
            };

            let initial = MatchContext::new(self.text.clone(), self.intent_context.clone());
            self.pending = match_shared(
                Rc::clone(&self.settings),
                initial,
                &sentence.expression,
                0,
            );
        }
    }
}

impl<'a> RecognizeAll<'a> {
    /// Steps to the next sentence in catalogue order.
    fn advance(&mut self) -> Option<&'a Sentence> {
        loop {
            let Some(intent) = self.current_intent else {
                self.current_intent = Some(self.intents.next()?);
                self.data_index = 0;
                self.sentence_index = 0;
                continue;
            };
            let Some(data) = intent.data.get(self.data_index) else {
                self.current_intent = None;
                continue;
            };
            let Some(sentence) = data.sentences.get(self.sentence_index) else {
                self.data_index += 1;
                self.sentence_index = 0;
                continue;
            };
            self.sentence_index += 1;
            self.current_data = Some(data);
            return Some(sentence);
        }
    }

    fn result_for(&self, context: MatchContext, data: &'a IntentData) -> RecognizeResult<'a> {
        let intent = self
            .current_intent
            .expect("current data implies current intent");

        let mut entities_list = context.entities;
        for (name, value) in &data.slots {
            entities_list.push(MatchEntity {
                name: name.clone(),
                value: value.clone(),
                text: String::new(),
            });
        }

        let mut entities = IndexMap::with_capacity(entities_list.len());
        for entity in &entities_list {
            entities.insert(entity.name.clone(), entity.clone());
        }

        RecognizeResult {
            intent,
            entities,
            entities_list,
            response: data.response.clone().or_else(|| self.default_response.clone()),
        }
    }
}

/// Any excluded entry that holds rejects the match.
fn excludes_context_rejects(data: &IntentData, context: &MatchContext) -> bool {
    data.excludes_context
        .iter()
        .any(|(key, excluded)| context_value_matches(context.intent_context.get(key), excluded))
}

/// Every required entry must hold. A `null` requirement accepts any value
/// as long as one is set.
fn requires_context_rejects(data: &IntentData, context: &MatchContext) -> bool {
    data.requires_context.iter().any(|(key, required)| {
        let actual = context.intent_context.get(key);
        if required.is_null() {
            return actual.unwrap_or(&Value::Null).is_null();
        }
        !context_value_matches(actual, required)
    })
}

/// Equality, or membership when the expected value is an array.
fn context_value_matches(actual: Option<&Value>, expected: &Value) -> bool {
    let actual = actual.unwrap_or(&Value::Null);
    actual == expected || expected.as_array().is_some_and(|values| values.contains(actual))
}
