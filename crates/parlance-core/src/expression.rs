//! Expression tree for template sentences.
//!
//! A template like `turn on [the] light[s] in {area}` parses into a tree of
//! these nodes. The matcher pattern-matches on [`Expression`] variants; there
//! is no dispatch through traits.

use serde::Serialize;

/// A literal span of template text.
///
/// Empty chunks only appear as the "omit" branch appended to an optional;
/// they match without consuming input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextChunk {
    pub text: String,
}

impl TextChunk {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The "omit" branch of an optional.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// How the items of a [`Sequence`] combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SequenceKind {
    /// Every item must match, in order.
    Group,
    /// Exactly one item matches. Items are themselves groups; the parser
    /// wraps them on promotion.
    Alternative,
}

/// An ordered collection of sub-expressions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sequence {
    pub kind: SequenceKind,
    pub items: Vec<Expression>,
}

impl Sequence {
    pub fn group(items: Vec<Expression>) -> Self {
        Self {
            kind: SequenceKind::Group,
            items,
        }
    }

    pub fn alternative(items: Vec<Expression>) -> Self {
        Self {
            kind: SequenceKind::Alternative,
            items,
        }
    }

    /// Promote a group to an alternative.
    ///
    /// The items accumulated so far collapse into a single group that becomes
    /// the first branch. Already-alternative sequences are left untouched.
    pub fn ensure_alternative(&mut self) {
        if self.kind != SequenceKind::Alternative {
            self.kind = SequenceKind::Alternative;
            let items = std::mem::take(&mut self.items);
            self.items = vec![Expression::Sequence(Sequence::group(items))];
        }
    }
}

/// Reference to a named slot list, written `{list}` or `{list:slot}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListReference {
    pub list_name: String,
    /// Name the captured entity is reported under. Defaults to `list_name`.
    pub slot_name: String,
}

impl ListReference {
    pub fn new(list_name: impl Into<String>, slot_name: impl Into<String>) -> Self {
        Self {
            list_name: list_name.into(),
            slot_name: slot_name.into(),
        }
    }
}

/// Reference to a named expansion rule, written `<rule>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleReference {
    pub rule_name: String,
}

impl RuleReference {
    pub fn new(rule_name: impl Into<String>) -> Self {
        Self {
            rule_name: rule_name.into(),
        }
    }
}

/// A node of the template expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Expression {
    Text(TextChunk),
    Sequence(Sequence),
    List(ListReference),
    Rule(RuleReference),
}

impl Expression {
    pub fn text(text: impl Into<String>) -> Self {
        Expression::Text(TextChunk::new(text))
    }

    pub fn group(items: Vec<Expression>) -> Self {
        Expression::Sequence(Sequence::group(items))
    }

    pub fn alternative(items: Vec<Expression>) -> Self {
        Expression::Sequence(Sequence::alternative(items))
    }
}

/// A parsed template sentence: the root expression plus its source text.
///
/// The root is always a [`Sequence`]; a template with a top-level `|`
/// parses to an alternative, anything else to a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sentence {
    pub expression: Expression,
    /// Original template text, when the sentence came from source.
    pub text: Option<String>,
}

impl Sentence {
    pub fn new(expression: Expression, text: Option<String>) -> Self {
        Self { expression, text }
    }
}
