#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for Parlance.
//!
//! Two pieces:
//! - **Expression model** (`expression`): the algebraic tree a template
//!   sentence parses into. Built once at load time, immutable afterwards.
//! - **Text helpers** (`text`): the normalization and punctuation rules
//!   shared by the matcher and the recognition driver.

pub mod expression;
pub mod text;

#[cfg(test)]
mod expression_tests;

pub use expression::{
    Expression, ListReference, RuleReference, Sentence, Sequence, SequenceKind, TextChunk,
};
