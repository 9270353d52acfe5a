//! Chunk scanner: one top-level lexeme of the template grammar at a time.
//!
//! A chunk is either a word (a literal run, whitespace included), a
//! delimited region with its delimiters still attached, or the `|`
//! separator. Delimited regions balance nested delimiters of the same kind,
//! so `(a (b) c)` scans as one group chunk.

use logos::{Lexer, Logos};

use super::error::{ParseError, ParseErrorKind};
use super::lexer::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    Word,
    Group,
    Opt,
    List,
    Rule,
    Alt,
}

/// The next top-level lexeme of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseChunk<'s> {
    pub kind: ChunkKind,
    /// Chunk text. Delimited kinds include their delimiters; the parser
    /// strips them.
    pub text: &'s str,
    /// Offset just past the chunk in the scanned text.
    pub end_index: usize,
}

/// Scans the next chunk, or `None` when the text is exhausted.
///
/// Leading whitespace is skipped (it still counts into `end_index`);
/// whitespace after a word has started is part of the word.
pub fn next_chunk(text: &str) -> Result<Option<ParseChunk<'_>>, ParseError> {
    let mut lexer = TokenKind::lexer(text);
    let first = loop {
        match lexer.next() {
            None => return Ok(None),
            Some(Ok(TokenKind::Whitespace)) => {}
            Some(Ok(kind)) => break kind,
            Some(Err(())) => {
                return Err(ParseError::new(
                    ParseErrorKind::TrailingEscape,
                    &text[lexer.span().start..],
                ));
            }
        }
    };

    let start = lexer.span().start;
    let chunk = match first {
        TokenKind::GroupOpen => delimited(text, &mut lexer, start, first, ChunkKind::Group)?,
        TokenKind::OptOpen => delimited(text, &mut lexer, start, first, ChunkKind::Opt)?,
        TokenKind::ListOpen => delimited(text, &mut lexer, start, first, ChunkKind::List)?,
        TokenKind::RuleOpen => delimited(text, &mut lexer, start, first, ChunkKind::Rule)?,
        TokenKind::GroupClose
        | TokenKind::OptClose
        | TokenKind::ListClose
        | TokenKind::RuleClose => {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedClose,
                &text[start..],
            ));
        }
        TokenKind::Alt => ParseChunk {
            kind: ChunkKind::Alt,
            text: &text[start..lexer.span().end],
            end_index: lexer.span().end,
        },
        TokenKind::Text | TokenKind::Escaped | TokenKind::Whitespace => {
            word(text, &mut lexer, start)?
        }
    };

    Ok(Some(chunk))
}

/// A word runs to the next unescaped delimiter or `|`. Internal and trailing
/// whitespace stays in the word; it carries word-boundary information.
fn word<'s>(
    text: &'s str,
    lexer: &mut Lexer<'s, TokenKind>,
    start: usize,
) -> Result<ParseChunk<'s>, ParseError> {
    let mut end = lexer.span().end;
    loop {
        match lexer.next() {
            None => break,
            Some(Ok(TokenKind::Text | TokenKind::Escaped | TokenKind::Whitespace)) => {
                end = lexer.span().end;
            }
            Some(Ok(_)) => break,
            Some(Err(())) => {
                return Err(ParseError::new(
                    ParseErrorKind::TrailingEscape,
                    &text[lexer.span().start..],
                ));
            }
        }
    }
    Ok(ParseChunk {
        kind: ChunkKind::Word,
        text: &text[start..end],
        end_index: end,
    })
}

/// Scans to the closer matching `open`, balancing nesting of the same kind.
/// Delimiters of other kinds are plain content at this level.
fn delimited<'s>(
    text: &'s str,
    lexer: &mut Lexer<'s, TokenKind>,
    start: usize,
    open: TokenKind,
    kind: ChunkKind,
) -> Result<ParseChunk<'s>, ParseError> {
    let close = match open {
        TokenKind::GroupOpen => TokenKind::GroupClose,
        TokenKind::OptOpen => TokenKind::OptClose,
        TokenKind::ListOpen => TokenKind::ListClose,
        TokenKind::RuleOpen => TokenKind::RuleClose,
        _ => unreachable!("delimited chunks start with an opening delimiter"),
    };

    let mut depth = 1usize;
    loop {
        match lexer.next() {
            None => {
                return Err(ParseError::new(
                    ParseErrorKind::UnbalancedDelimiters,
                    &text[start..],
                ));
            }
            Some(Ok(token)) if token == open => depth += 1,
            Some(Ok(token)) if token == close => {
                depth -= 1;
                if depth == 0 {
                    let end = lexer.span().end;
                    return Ok(ParseChunk {
                        kind,
                        text: &text[start..end],
                        end_index: end,
                    });
                }
            }
            Some(Ok(_)) => {}
            Some(Err(())) => {
                return Err(ParseError::new(
                    ParseErrorKind::TrailingEscape,
                    &text[lexer.span().start..],
                ));
            }
        }
    }
}

/// Drops the backslashes from a word, keeping the escaped characters.
pub fn remove_escapes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Strips the surrounding delimiter pair from a delimited chunk.
pub fn remove_delimiters(text: &str) -> &str {
    debug_assert!(text.len() >= 2, "delimited chunk includes its delimiters");
    &text[1..text.len() - 1]
}
