//! Word normalization and tokenization.
//!
//! Every key stored in an index and every token looked up against one goes
//! through [`normalize_word`]. Bypassing it makes lookups silently miss.

/// Canonical form of a word: surrounding whitespace trimmed, lowercased.
pub fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Characters that make up a word: letters, digits and underscore.
#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split a message into its words.
///
/// A word is a maximal run of word characters; punctuation and whitespace
/// separate words and are dropped. Never yields an empty token.
pub fn words(message: &str) -> impl Iterator<Item = &str> {
    message.split(|c: char| !is_word_char(c)).filter(|w| !w.is_empty())
}

/// Byte index just past the first run of non-whitespace characters.
///
/// Leading whitespace counts toward the index. Returns `None` when the input
/// has no non-whitespace character.
pub fn first_whitespace_after_first_word(s: &str) -> Option<usize> {
    let start = s.find(|c: char| !c.is_whitespace())?;
    let rest = &s[start..];
    let len = rest.find(char::is_whitespace).unwrap_or(rest.len());
    Some(start + len)
}
