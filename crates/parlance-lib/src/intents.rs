//! Intent catalogue: intents, slot lists and expansion rules.
//!
//! Two layers:
//! - **Deserialization layer**: 1:1 serde mapping of the JSON catalogue
//!   document (`Raw*` types)
//! - **Analysis layer**: templates parsed into expression trees, ready for
//!   matching
//!
//! All collections are insertion-ordered, so recognition enumerates intents
//! and slot values in declaration order.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use parlance_core::expression::{Expression, Sentence, TextChunk};

use crate::parser::{ParseError, ParseMetadata, parse_sentence};

// ============================================================================
// Analysis Layer
// ============================================================================

/// Matcher-wide settings from the catalogue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct IntentsSettings {
    /// Drop all whitespace from templates and input before matching.
    #[serde(default)]
    pub ignore_whitespace: bool,
}

/// One value a [`TextSlotList`] can capture.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSlotValue {
    /// Expression the input is matched against.
    pub text_in: Expression,
    /// Value reported for the captured entity.
    pub value_out: Value,
    /// Extra intent context merged in on match; these entries win on
    /// key collision.
    pub context: Option<IndexMap<String, Value>>,
}

/// Named list of textual values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextSlotList {
    pub values: Vec<TextSlotValue>,
}

impl TextSlotList {
    /// Builds a list whose values are their own reported values.
    ///
    /// With `allow_template` each string is parsed as a template, so
    /// `light[s]` matches both `light` and `lights`. Without it the string
    /// is a literal and only matches itself.
    pub fn from_strings<I, S>(strings: I, allow_template: bool) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values = strings
            .into_iter()
            .map(|text| {
                let text = text.as_ref();
                Ok(TextSlotValue {
                    text_in: value_expression(text, allow_template)?,
                    value_out: Value::String(text.to_string()),
                    context: None,
                })
            })
            .collect::<Result<Vec<_>, ParseError>>()?;
        Ok(Self { values })
    }

    /// Builds a list mapping matched text to explicit output values.
    pub fn from_tuples<I, S>(tuples: I, allow_template: bool) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: AsRef<str>,
    {
        let values = tuples
            .into_iter()
            .map(|(text, value_out)| {
                Ok(TextSlotValue {
                    text_in: value_expression(text.as_ref(), allow_template)?,
                    value_out,
                    context: None,
                })
            })
            .collect::<Result<Vec<_>, ParseError>>()?;
        Ok(Self { values })
    }
}

fn value_expression(text: &str, allow_template: bool) -> Result<Expression, ParseError> {
    if allow_template {
        Ok(parse_sentence(text)?.expression)
    } else {
        Ok(Expression::Text(TextChunk::new(text)))
    }
}

/// Named integer range, `start..=stop` stepped from `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSlotList {
    pub start: i64,
    pub stop: i64,
    pub step: i64,
}

impl RangeSlotList {
    pub fn new(start: i64, stop: i64) -> Self {
        Self {
            start,
            stop,
            step: 1,
        }
    }

    pub fn with_step(mut self, step: i64) -> Self {
        debug_assert!(step >= 1, "range step must be positive");
        self.step = step;
        self
    }

    pub fn contains(&self, value: i64) -> bool {
        if value < self.start || value > self.stop {
            return false;
        }
        self.step == 1 || (value - self.start) % self.step == 0
    }
}

/// A named set of values a `{list}` reference captures from.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotList {
    Text(TextSlotList),
    Range(RangeSlotList),
}

/// One group of sentences within an intent, with its match conditions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntentData {
    pub sentences: Vec<Sentence>,
    /// Fixed entities injected into every match of these sentences.
    pub slots: IndexMap<String, Value>,
    /// Context entries that must hold for a match to count.
    pub requires_context: IndexMap<String, Value>,
    /// Context entries that reject a match when they hold.
    pub excludes_context: IndexMap<String, Value>,
    /// Response key; the recognizer falls back to its default when absent.
    pub response: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Intent {
    pub name: String,
    pub data: Vec<IntentData>,
}

/// A loaded intent catalogue.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Intents {
    pub intents: IndexMap<String, Intent>,
    pub slot_lists: IndexMap<String, SlotList>,
    pub expansion_rules: IndexMap<String, Sentence>,
    pub skip_words: Vec<String>,
    pub settings: IntentsSettings,
}

impl Intents {
    /// Parses every template of a raw catalogue document.
    ///
    /// Parse errors are tagged with the intent they came from.
    pub fn from_raw(raw: RawIntents) -> Result<Self, ParseError> {
        let mut intents = IndexMap::with_capacity(raw.intents.len());
        for (name, raw_intent) in raw.intents {
            let mut data = Vec::with_capacity(raw_intent.data.len());
            for raw_data in raw_intent.data {
                let sentences = raw_data
                    .sentences
                    .iter()
                    .map(|template| {
                        parse_sentence(template).map_err(|error| {
                            error.with_metadata(ParseMetadata {
                                intent_name: Some(name.clone()),
                                ..Default::default()
                            })
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                data.push(IntentData {
                    sentences,
                    slots: raw_data.slots,
                    requires_context: raw_data.requires_context,
                    excludes_context: raw_data.excludes_context,
                    response: raw_data.response,
                });
            }
            intents.insert(name.clone(), Intent { name, data });
        }

        let mut slot_lists = IndexMap::with_capacity(raw.lists.len());
        for (name, raw_list) in raw.lists {
            let list = match raw_list {
                RawSlotList::Values { values } => {
                    let values = values
                        .into_iter()
                        .map(|value| match value {
                            RawSlotValue::Text(text) => Ok(TextSlotValue {
                                text_in: parse_sentence(&text)?.expression,
                                value_out: Value::String(text),
                                context: None,
                            }),
                            RawSlotValue::TextValue {
                                text_in,
                                value_out,
                                context,
                            } => Ok(TextSlotValue {
                                text_in: parse_sentence(&text_in)?.expression,
                                value_out,
                                context,
                            }),
                        })
                        .collect::<Result<Vec<_>, ParseError>>()?;
                    SlotList::Text(TextSlotList { values })
                }
                RawSlotList::Range { range } => SlotList::Range(RangeSlotList {
                    start: range.from,
                    stop: range.to,
                    step: range.step,
                }),
            };
            slot_lists.insert(name, list);
        }

        let expansion_rules = raw
            .expansion_rules
            .into_iter()
            .map(|(name, template)| Ok((name, parse_sentence(&template)?)))
            .collect::<Result<IndexMap<_, _>, ParseError>>()?;

        Ok(Self {
            intents,
            slot_lists,
            expansion_rules,
            skip_words: raw.skip_words,
            settings: raw.settings,
        })
    }
}

// ============================================================================
// Deserialization Layer
// ============================================================================

/// Raw catalogue document, 1:1 with the JSON format.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawIntents {
    #[serde(default)]
    pub intents: IndexMap<String, RawIntent>,
    #[serde(default)]
    pub lists: IndexMap<String, RawSlotList>,
    #[serde(default)]
    pub expansion_rules: IndexMap<String, String>,
    #[serde(default)]
    pub skip_words: Vec<String>,
    #[serde(default)]
    pub settings: IntentsSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawIntent {
    pub data: Vec<RawIntentData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawIntentData {
    pub sentences: Vec<String>,
    #[serde(default)]
    pub slots: IndexMap<String, Value>,
    #[serde(default)]
    pub requires_context: IndexMap<String, Value>,
    #[serde(default)]
    pub excludes_context: IndexMap<String, Value>,
    #[serde(default)]
    pub response: Option<String>,
}

/// Either a list of values or a numeric range.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawSlotList {
    Values { values: Vec<RawSlotValue> },
    Range { range: RawRange },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawSlotValue {
    /// Shorthand: the text is also the reported value.
    Text(String),
    /// Full form with distinct matched text and output value.
    TextValue {
        #[serde(rename = "in")]
        text_in: String,
        #[serde(rename = "out")]
        value_out: Value,
        #[serde(default)]
        context: Option<IndexMap<String, Value>>,
    },
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawRange {
    pub from: i64,
    pub to: i64,
    #[serde(default = "default_step")]
    pub step: i64,
}

fn default_step() -> i64 {
    1
}

#[cfg(test)]
#[path = "intents_tests.rs"]
mod intents_tests;
