//! Suggestion scoring.
//!
//! A message is scored against an [`IndexedDataset`] in two passes:
//!
//! 1. Whole-word: each word of the message, normalized, is looked up as a
//!    keyword. Its weight is the sum of its tag weights, or the default
//!    whole-word weight when that sum is zero.
//! 2. Substring: every indexed keyword contained anywhere in the lowercased
//!    message adds the substring weight. Whole-word hits satisfy this too and
//!    are counted again.
//!
//! Emoji are ranked by descending score, ties broken by ascending id.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use super::index::IndexedDataset;
use super::normalize::{normalize_word, words};
use crate::dataset::{Emoji, WordTag};

/// Match weights. Shipped defaults: substring 1, whole word 5, verb 10,
/// acronym 20, abbreviation 20.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub substring: i64,
    pub whole_word: i64,
    pub verb: i64,
    pub acronym: i64,
    pub abbreviation: i64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            substring: 1,
            whole_word: 5,
            verb: 10,
            acronym: 20,
            abbreviation: 20,
        }
    }
}

impl Weights {
    /// Whole-word weight contributed by one tag.
    pub fn tag(&self, tag: WordTag) -> i64 {
        match tag {
            WordTag::Verb => self.verb,
            WordTag::Acronym => self.acronym,
            WordTag::Abbreviation => self.abbreviation,
        }
    }
}

/// A ranked emoji with its accumulated score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub emoji: Arc<Emoji>,
    pub score: i64,
}

/// Score every emoji relevant to `message`, best first.
pub fn score(message: &str, index: &IndexedDataset, weights: &Weights) -> Vec<Suggestion> {
    let mut usage: HashMap<Arc<Emoji>, i64> = HashMap::new();
    let mut increment = |emoji: &Arc<Emoji>, delta: i64| {
        let total = usage.entry(Arc::clone(emoji)).or_insert(0);
        *total = total.saturating_add(delta);
    };

    for word in words(message) {
        let normalized = normalize_word(word);
        let Some(emojis) = index.emojis_for_normalized(&normalized) else {
            continue;
        };

        let tag_weight: i64 = index
            .tags_for_normalized(&normalized)
            .map(|tags| {
                tags.iter()
                    .fold(0i64, |acc, t| acc.saturating_add(weights.tag(*t)))
            })
            .unwrap_or(0);
        let weight = if tag_weight == 0 {
            weights.whole_word
        } else {
            tag_weight
        };
        if weight == 0 {
            continue;
        }

        for emoji in emojis {
            increment(emoji, weight);
        }
    }

    if weights.substring != 0 {
        let lowered = message.to_lowercase();
        for (keyword, emojis) in index.keywords() {
            if !lowered.contains(keyword) {
                continue;
            }
            for emoji in emojis {
                increment(emoji, weights.substring);
            }
        }
    }

    let mut ranked: Vec<Suggestion> = usage
        .into_iter()
        .map(|(emoji, score)| Suggestion { emoji, score })
        .collect();
    ranked.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.emoji.id.cmp(&b.emoji.id))
    });

    tracing::trace!(
        version = %index.version(),
        candidates = ranked.len(),
        "scored message"
    );

    ranked
}

/// Emoji relevant to `message`, best first.
pub fn suggest(message: &str, index: &IndexedDataset, weights: &Weights) -> Vec<Arc<Emoji>> {
    score(message, index, weights)
        .into_iter()
        .map(|s| s.emoji)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{
        ContextSource, CorporaSource, DataVersion, Dataset, DatasetSource, WordEntry,
    };
    use std::collections::BTreeMap;

    fn rocket_dataset(word: BTreeMap<String, WordEntry>) -> Dataset {
        let entries = vec![ContextSource::new(&["launch"], &["rocket"])];
        Dataset::from_source(DatasetSource {
            emoji: vec![Emoji::new("rocket", "🚀")],
            context: CorporaSource {
                v1: entries.clone(),
                v2: entries,
            },
            word,
        })
        .unwrap()
    }

    fn launch_word(cover: &[&str], tags: &[WordTag]) -> BTreeMap<String, WordEntry> {
        BTreeMap::from([(
            "launch".to_string(),
            WordEntry {
                cover: cover.iter().map(|c| c.to_string()).collect(),
                tag: tags.iter().copied().collect(),
                ..Default::default()
            },
        )])
    }

    fn scores(message: &str, index: &IndexedDataset) -> Vec<(String, i64)> {
        score(message, index, &Weights::default())
            .into_iter()
            .map(|s| (s.emoji.id.clone(), s.score))
            .collect()
    }

    #[test]
    fn test_empty_message() {
        let index = IndexedDataset::build(&Dataset::builtin().unwrap(), DataVersion::V2);
        assert!(suggest("", &index, &Weights::default()).is_empty());
        assert!(suggest("   \t", &index, &Weights::default()).is_empty());
    }

    #[test]
    fn test_whole_word_plus_substring() {
        let index = IndexedDataset::build(&rocket_dataset(BTreeMap::new()), DataVersion::V1);
        assert_eq!(scores("we launch today", &index), vec![("rocket".to_string(), 6)]);
        let ids: Vec<String> = suggest("we launch today", &index, &Weights::default())
            .iter()
            .map(|e| e.id.clone())
            .collect();
        assert_eq!(ids, vec!["rocket"]);
    }

    #[test]
    fn test_verb_tag_weight() {
        let dataset = rocket_dataset(launch_word(&[], &[WordTag::Verb]));
        let index = IndexedDataset::build(&dataset, DataVersion::V1);
        assert_eq!(scores("we launch today", &index), vec![("rocket".to_string(), 11)]);
    }

    #[test]
    fn test_tags_sum() {
        let dataset = rocket_dataset(launch_word(&[], &[WordTag::Acronym, WordTag::Abbreviation]));
        let index = IndexedDataset::build(&dataset, DataVersion::V1);
        assert_eq!(scores("LAUNCH", &index), vec![("rocket".to_string(), 41)]);
    }

    #[test]
    fn test_synonym_propagation_v2_only() {
        let dataset = rocket_dataset(launch_word(&["blastoff"], &[]));

        let v2 = IndexedDataset::build(&dataset, DataVersion::V2);
        assert_eq!(scores("blastoff now", &v2), vec![("rocket".to_string(), 6)]);

        let v1 = IndexedDataset::build(&dataset, DataVersion::V1);
        assert!(scores("blastoff now", &v1).is_empty());
    }

    #[test]
    fn test_substring_without_word_boundary() {
        let index = IndexedDataset::build(&rocket_dataset(BTreeMap::new()), DataVersion::V1);
        assert_eq!(scores("prelaunching", &index), vec![("rocket".to_string(), 1)]);
        assert_eq!(
            scores("prelaunching then launch", &index),
            vec![("rocket".to_string(), 6)]
        );
    }

    #[test]
    fn test_substring_counts_once_per_keyword() {
        let index = IndexedDataset::build(&rocket_dataset(BTreeMap::new()), DataVersion::V1);
        // Two whole-word hits, one substring hit.
        assert_eq!(scores("launch, launch", &index), vec![("rocket".to_string(), 11)]);
    }

    #[test]
    fn test_unknown_tokens_ignored() {
        let index = IndexedDataset::build(&rocket_dataset(BTreeMap::new()), DataVersion::V1);
        assert!(scores("nothing relevant here", &index).is_empty());
    }

    #[test]
    fn test_ties_break_by_id() {
        let entries = vec![
            ContextSource::new(&["ship"], &["tada"]),
            ContextSource::new(&["ship"], &["rocket"]),
            ContextSource::new(&["ship"], &["package"]),
        ];
        let dataset = Dataset::from_source(DatasetSource {
            emoji: vec![
                Emoji::new("tada", "🎉"),
                Emoji::new("rocket", "🚀"),
                Emoji::new("package", "📦"),
            ],
            context: CorporaSource {
                v1: entries,
                v2: vec![],
            },
            word: BTreeMap::new(),
        })
        .unwrap();
        let index = IndexedDataset::build(&dataset, DataVersion::V1);

        let expected = vec![
            ("package".to_string(), 6),
            ("rocket".to_string(), 6),
            ("tada".to_string(), 6),
        ];
        for _ in 0..5 {
            assert_eq!(scores("ship it", &index), expected);
        }
    }

    #[test]
    fn test_higher_score_ranks_first() {
        let dataset = Dataset::builtin().unwrap();
        let index = IndexedDataset::build(&dataset, DataVersion::V2);
        let ranked = score("fix crash in parser", &index, &Weights::default());
        assert_eq!(ranked.first().map(|s| s.emoji.id.as_str()), Some("bug"));
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_huge_weights_saturate() {
        let dataset = rocket_dataset(launch_word(&[], &[WordTag::Verb, WordTag::Acronym]));
        let index = IndexedDataset::build(&dataset, DataVersion::V1);
        let weights = Weights {
            substring: i64::MAX,
            whole_word: i64::MAX,
            verb: i64::MAX,
            acronym: i64::MAX,
            abbreviation: i64::MAX,
        };
        let ranked = score("launch launch launch", &index, &weights);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].score, i64::MAX);

        let builtin = IndexedDataset::build(&Dataset::builtin().unwrap(), DataVersion::V2);
        let ranked = score("configure ci and fix api", &builtin, &weights);
        assert!(!ranked.is_empty());
        assert!(ranked.iter().all(|s| s.score > 0));
    }

    #[test]
    fn test_custom_weights() {
        let dataset = rocket_dataset(launch_word(&[], &[WordTag::Verb]));
        let index = IndexedDataset::build(&dataset, DataVersion::V1);
        let weights = Weights {
            substring: 0,
            verb: 3,
            ..Weights::default()
        };
        let ranked = score("launch", &index, &weights);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].score, 3);
        assert!(score("prelaunching", &index, &weights).is_empty());
    }
}
