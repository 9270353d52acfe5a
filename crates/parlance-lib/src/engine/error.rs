//! Errors that can occur during matching.

/// Fatal matcher errors.
///
/// A missing list or rule is a configuration gap, not a non-match; it aborts
/// the whole recognition call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    /// A `{list}` reference with no slot list of that name.
    #[error("missing slot list {{{0}}}")]
    MissingList(String),

    /// A `<rule>` reference with no expansion rule of that name.
    #[error("missing expansion rule <{0}>")]
    MissingRule(String),

    /// Expansion rules that reference themselves, directly or through other
    /// rules, would recurse forever; matching stops at a fixed depth.
    #[error("expansion rule <{0}> nested too deeply")]
    ExpansionTooDeep(String),
}
