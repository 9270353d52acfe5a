#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Parlance: template-based intent recognition.
//!
//! Intents are declared as template sentences in a small grammar —
//! `(a|b)` alternatives, `[x]` optionals, `{list}` slot references,
//! `<rule>` expansion rules — and matched against user utterances,
//! producing the intent plus the captured slot values.
//!
//! # Example
//!
//! Parse errors and matcher errors both convert into the crate-level
//! [`Error`], so mixed pipelines propagate with `?`:
//!
//! ```
//! use parlance_lib::{MatchOptions, Result, is_match, parse_sentence};
//!
//! fn lights_on(utterance: &str) -> Result<bool> {
//!     let sentence = parse_sentence("turn on [the] lights")?;
//!     Ok(is_match(utterance, &sentence, MatchOptions::default())?.is_some())
//! }
//!
//! assert!(lights_on("turn on the lights").unwrap());
//! assert!(!lights_on("turn off the lights").unwrap());
//! ```

pub mod diagnostics;
pub mod engine;
pub mod intents;
pub mod parser;

pub use diagnostics::ParseErrorPrinter;
pub use engine::{
    MatchContext, MatchEntity, MatchError, MatchOptions, MatchSettings, RecognizeAll,
    RecognizeOptions, RecognizeResult, is_match, match_expression, recognize, recognize_all,
};
pub use intents::{
    Intent, IntentData, Intents, IntentsSettings, RangeSlotList, RawIntents, SlotList,
    TextSlotList, TextSlotValue,
};
pub use parser::{ParseError, ParseErrorKind, ParseMetadata, parse_sentence};

pub use parlance_core::expression::{
    Expression, ListReference, RuleReference, Sentence, Sequence, SequenceKind, TextChunk,
};
pub use parlance_core::text::{normalize_text, normalize_whitespace};

/// Errors that can occur while loading or matching intents.
///
/// The recognition operations ([`recognize`], [`recognize_all`],
/// [`is_match`]) return this type; the parser's [`ParseError`] converts
/// into it at the same boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Match(#[from] MatchError),
}

/// Result type for recognition operations.
pub type Result<T> = std::result::Result<T, Error>;
