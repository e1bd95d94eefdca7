//! Display formatting for keyword lists and composed messages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::core::normalize::first_whitespace_after_first_word;
use crate::dataset::Emoji;
use crate::error::GitEmojiError;

/// Sort lexicographically and join with `separator`.
pub fn join_sorted<I, S>(values: I, separator: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut values: Vec<S> = values.into_iter().collect();
    values.sort_by(|a, b| a.as_ref().cmp(b.as_ref()));
    values
        .iter()
        .map(|v| v.as_ref())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Glyphs of `emojis` concatenated in the given order, no separator.
pub fn concat_emojis(emojis: &[Arc<Emoji>]) -> String {
    emojis.iter().map(|e| e.glyph.as_str()).collect()
}

/// Glyphs of at most `max` emoji, followed by ` +N` when `N` were left out.
pub fn preview_line(emojis: &[Arc<Emoji>], max: usize) -> String {
    let shown = emojis.len().min(max);
    let mut line = concat_emojis(&emojis[..shown]);
    if emojis.len() > shown {
        line.push_str(&format!(" +{}", emojis.len() - shown));
    }
    line
}

/// Where the emoji sequence goes relative to the message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConcatStyle {
    /// `{emoji} {message}`
    #[default]
    EmojiFirst,
    /// `{message} {emoji}`
    MessageFirst,
    /// `{emoji} {message} {emoji}`
    Sandwich,
    /// `{first word} {emoji} {rest}`, e.g. after a `feat:` prefix
    AfterFirstWord,
}

impl ConcatStyle {
    pub const ALL: [ConcatStyle; 4] = [
        ConcatStyle::EmojiFirst,
        ConcatStyle::MessageFirst,
        ConcatStyle::Sandwich,
        ConcatStyle::AfterFirstWord,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConcatStyle::EmojiFirst => "emoji-first",
            ConcatStyle::MessageFirst => "message-first",
            ConcatStyle::Sandwich => "sandwich",
            ConcatStyle::AfterFirstWord => "after-first-word",
        }
    }
}

impl fmt::Display for ConcatStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConcatStyle {
    type Err = GitEmojiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        ConcatStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| GitEmojiError::Config(format!("unknown concat style '{}'", s)))
    }
}

/// Combine selected emoji with the message.
///
/// With no emoji selected the message is returned unchanged.
pub fn combine(style: ConcatStyle, emojis: &[Arc<Emoji>], message: &str) -> String {
    if emojis.is_empty() {
        return message.to_string();
    }

    let seq = concat_emojis(emojis);
    match style {
        ConcatStyle::EmojiFirst => format!("{} {}", seq, message),
        ConcatStyle::MessageFirst => format!("{} {}", message, seq),
        ConcatStyle::Sandwich => format!("{} {} {}", seq, message, seq),
        ConcatStyle::AfterFirstWord => match first_whitespace_after_first_word(message) {
            Some(at) => format!("{} {}{}", &message[..at], seq, &message[at..]),
            None => format!("{} {}", seq, message),
        },
    }
}
