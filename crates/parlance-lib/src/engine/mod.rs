//! Matching engine: the non-deterministic evaluator and the recognition
//! driver wrapped around it.

pub mod context;
pub mod error;
pub mod matcher;
pub mod recognize;

#[cfg(test)]
mod recognize_tests;

pub use context::{MatchContext, MatchEntity, MatchSettings};
pub use error::MatchError;
pub use matcher::match_expression;
pub use recognize::{
    MatchOptions, RecognizeAll, RecognizeOptions, RecognizeResult, is_match, recognize,
    recognize_all,
};
