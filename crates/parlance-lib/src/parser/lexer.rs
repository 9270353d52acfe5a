//! Lexer for the template grammar.
//!
//! Produces span-based tokens without storing text - text is sliced from
//! source only when needed. Escapes lex as a single two-character token; a
//! trailing backslash has nothing to escape and surfaces as a lexer error.

use logos::Logos;
use std::ops::Range;

use super::error::{ParseError, ParseErrorKind};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    #[token("(")]
    GroupOpen,

    #[token(")")]
    GroupClose,

    #[token("[")]
    OptOpen,

    #[token("]")]
    OptClose,

    #[token("{")]
    ListOpen,

    #[token("}")]
    ListClose,

    #[token("<")]
    RuleOpen,

    #[token(">")]
    RuleClose,

    #[token("|")]
    Alt,

    /// A backslash plus the character it escapes.
    #[regex(r"\\.")]
    Escaped,

    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    /// A run of anything that is not a metacharacter or whitespace.
    #[regex(r"[^()\[\]{}<>|\\ \t\r\n]+")]
    Text,
}

/// Token kind plus source span, text retrieved via [`token_text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

/// Tokenizes a whole template. O(1) per-token slicing via [`token_text`].
pub fn lex(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    while let Some(result) = lexer.next() {
        match result {
            Ok(kind) => tokens.push(Token {
                kind,
                span: lexer.span(),
            }),
            Err(()) => {
                return Err(ParseError::new(
                    ParseErrorKind::TrailingEscape,
                    &source[lexer.span().start..],
                ));
            }
        }
    }
    Ok(tokens)
}

/// Retrieves the text slice for a token.
#[inline]
pub fn token_text<'s>(source: &'s str, token: &Token) -> &'s str {
    &source[token.span.clone()]
}
