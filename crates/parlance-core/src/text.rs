//! Text normalization shared by the matcher and the recognition driver.
//!
//! Matching operates on casefolded, whitespace-collapsed input. Punctuation
//! is never significant: the matcher retries failed literal matches with
//! punctuation runs turned into spaces, and leftover input that is only
//! punctuation still counts as a complete match.

/// Punctuation that never blocks a match.
const PUNCTUATION: &[char] = &[
    '.', '。', ',', '，', '?', '¿', '？', '!', '！', ';', '；', ':', '：',
];

pub fn is_punctuation(c: char) -> bool {
    PUNCTUATION.contains(&c)
}

/// Collapse every whitespace run to a single space.
///
/// Leading and trailing runs collapse too; they are not trimmed.
///
/// # Examples
/// ```
/// use parlance_core::text::normalize_whitespace;
/// assert_eq!(normalize_whitespace("a \t b"), "a b");
/// assert_eq!(normalize_whitespace("  a  "), " a ");
/// ```
pub fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_whitespace = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push(' ');
                in_whitespace = true;
            }
        } else {
            out.push(c);
            in_whitespace = false;
        }
    }
    out
}

/// Casefold and collapse whitespace.
///
/// # Examples
/// ```
/// use parlance_core::text::normalize_text;
/// assert_eq!(normalize_text("Turn  ON\tthe Lights"), "turn on the lights");
/// ```
pub fn normalize_text(text: &str) -> String {
    normalize_whitespace(&text.to_lowercase())
}

/// Remove all whitespace. Used when matching with `ignore_whitespace`.
pub fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Remove all punctuation.
pub fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|c| !is_punctuation(*c)).collect()
}

/// Replace every punctuation run with a single space.
///
/// # Examples
/// ```
/// use parlance_core::text::punctuation_to_space;
/// assert_eq!(punctuation_to_space("lights!?"), "lights ");
/// assert_eq!(punctuation_to_space("a.b"), "a b");
/// ```
pub fn punctuation_to_space(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_punctuation = false;
    for c in text.chars() {
        if is_punctuation(c) {
            if !in_punctuation {
                out.push(' ');
                in_punctuation = true;
            }
        } else {
            out.push(c);
            in_punctuation = false;
        }
    }
    out
}
