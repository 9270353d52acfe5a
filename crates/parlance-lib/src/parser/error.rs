//! Parse errors for the template grammar.

use std::fmt;

/// Where a template came from. Attached to parse errors for reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseMetadata {
    pub file_name: Option<String>,
    pub line_number: Option<u32>,
    pub intent_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    /// An opening delimiter never found its matching closer.
    #[error("unbalanced delimiters")]
    UnbalancedDelimiters,

    /// A closing delimiter with no opener.
    #[error("unexpected closing delimiter")]
    UnexpectedClose,

    /// A backslash with nothing left to escape.
    #[error("dangling escape")]
    TrailingEscape,

    /// The scanner stopped consuming input. Guards against infinite loops
    /// on malformed templates.
    #[error("no progress while scanning")]
    NoProgress,

    /// A chunk kind that cannot appear at this position.
    #[error("unexpected token")]
    UnexpectedChunk,

    /// `{}`, `{:slot}`, `{list:}` or `<>`.
    #[error("empty reference name")]
    EmptyReference,
}

/// A template failed to parse.
///
/// Carries the offending chunk text and, when the template came from an
/// intent file, the source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// The chunk (or scan remainder) that triggered the error.
    pub chunk: String,
    pub metadata: Option<ParseMetadata>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, chunk: impl Into<String>) -> Self {
        Self {
            kind,
            chunk: chunk.into(),
            metadata: None,
        }
    }

    /// Tag the error with its source location.
    pub fn with_metadata(mut self, metadata: ParseMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {:?}", self.kind, self.chunk)?;
        if let Some(metadata) = &self.metadata {
            if let Some(intent) = &metadata.intent_name {
                write!(f, " (intent {intent})")?;
            }
            if let Some(file) = &metadata.file_name {
                write!(f, " at {file}")?;
                if let Some(line) = metadata.line_number {
                    write!(f, ":{line}")?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}
