//! "List all emoji" view over an index, with fuzzy filtering.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::sync::Arc;

use super::format::join_sorted;
use crate::core::IndexedDataset;
use crate::dataset::Emoji;

/// One row of the emoji listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiListItem {
    pub emoji: Arc<Emoji>,
    /// The glyph
    pub label: String,
    /// Shortcode, e.g. `:rocket:`
    pub description: String,
    /// Keywords, sorted and `|`-separated
    pub detail: String,
}

impl EmojiListItem {
    fn new(emoji: &Arc<Emoji>, keywords: &[&str]) -> Self {
        Self {
            emoji: Arc::clone(emoji),
            label: emoji.glyph.clone(),
            description: emoji.shortcode(),
            detail: join_sorted(keywords, "|"),
        }
    }
}

/// Every catalog emoji with its keywords, sorted by id.
pub fn listing(index: &IndexedDataset) -> Vec<EmojiListItem> {
    let mut items: Vec<EmojiListItem> = index
        .entries()
        .map(|(emoji, keywords)| {
            let keywords: Vec<&str> = keywords.iter().map(String::as_str).collect();
            EmojiListItem::new(emoji, &keywords)
        })
        .collect();
    items.sort_by(|a, b| a.emoji.id.cmp(&b.emoji.id));
    items
}

/// Filter listing items by a fuzzy query over description and keywords.
///
/// An empty query keeps every item in its original order. Otherwise items are
/// ordered by best match score, ties kept in original order.
pub fn filter_listing(items: &[EmojiListItem], query: &str) -> Vec<EmojiListItem> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return items.to_vec();
    }

    let matcher = SkimMatcherV2::default();
    let mut results: Vec<(i64, &EmojiListItem)> = Vec::new();

    for item in items {
        let best = [&item.label, &item.description, &item.detail]
            .into_iter()
            .filter_map(|text| matcher.fuzzy_match(text, &query))
            .max();

        if let Some(score) = best {
            // Boost exact id prefix matches
            let boosted = if item.emoji.id.starts_with(&query) {
                score + 100
            } else {
                score
            };
            results.push((boosted, item));
        }
    }

    results.sort_by(|a, b| b.0.cmp(&a.0));
    results.into_iter().map(|(_, item)| item.clone()).collect()
}
