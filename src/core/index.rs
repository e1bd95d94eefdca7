//! Bidirectional keyword/emoji index built from one context corpus.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use super::normalize::normalize_word;
use crate::dataset::{ContextEntry, DataVersion, Dataset, Emoji, WordTag};

/// How a context entry's keywords are expanded before indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enhancement {
    /// Literal keywords only.
    Plain,
    /// Literal keywords, their `cover` synonyms, and the ids of the entry's
    /// emoji.
    Synonyms,
}

impl From<DataVersion> for Enhancement {
    fn from(version: DataVersion) -> Self {
        match version {
            DataVersion::V1 => Enhancement::Plain,
            DataVersion::V2 => Enhancement::Synonyms,
        }
    }
}

/// Derived, read-only index over one corpus version.
///
/// `keyword2emoji` and `emoji2keyword` are exact inverses of each other, and
/// every catalog emoji has an `emoji2keyword` entry even when no keyword
/// points at it.
#[derive(Debug, Clone)]
pub struct IndexedDataset {
    version: DataVersion,
    keyword2emoji: HashMap<String, HashSet<Arc<Emoji>>>,
    emoji2keyword: HashMap<Arc<Emoji>, BTreeSet<String>>,
    keyword2tag: HashMap<String, BTreeSet<WordTag>>,
}

impl IndexedDataset {
    /// Build the index for `version`, enhancing the way that version does.
    pub fn build(dataset: &Dataset, version: DataVersion) -> Self {
        Self::build_with(dataset, version, Enhancement::from(version))
    }

    /// Build the index for `version` with an explicit enhancement strategy.
    pub fn build_with(dataset: &Dataset, version: DataVersion, enhancement: Enhancement) -> Self {
        let mut keyword2emoji: HashMap<String, HashSet<Arc<Emoji>>> = HashMap::new();
        let mut emoji2keyword: HashMap<Arc<Emoji>, BTreeSet<String>> = dataset
            .emojis()
            .iter()
            .map(|e| (Arc::clone(e), BTreeSet::new()))
            .collect();

        for entry in dataset.context(version) {
            let keywords = entry_keywords(dataset, entry, enhancement);

            for keyword in &keywords {
                keyword2emoji
                    .entry(keyword.clone())
                    .or_default()
                    .extend(entry.emoji.iter().cloned());
            }
            for emoji in &entry.emoji {
                emoji2keyword
                    .entry(Arc::clone(emoji))
                    .or_default()
                    .extend(keywords.iter().cloned());
            }
        }

        let mut keyword2tag: HashMap<String, BTreeSet<WordTag>> = HashMap::new();
        for word in dataset.words() {
            for keyword in std::iter::once(&word.key).chain(word.cover.iter()) {
                let normalized = normalize_word(keyword);
                if normalized.is_empty() {
                    continue;
                }
                keyword2tag
                    .entry(normalized)
                    .or_default()
                    .extend(word.tag.iter().copied());
            }
        }

        tracing::debug!(
            %version,
            ?enhancement,
            keywords = keyword2emoji.len(),
            emoji = emoji2keyword.len(),
            tagged = keyword2tag.len(),
            "built emoji index"
        );

        Self {
            version,
            keyword2emoji,
            emoji2keyword,
            keyword2tag,
        }
    }

    pub fn version(&self) -> DataVersion {
        self.version
    }

    /// Emoji associated with `keyword`. The keyword is normalized first.
    pub fn emojis_for(&self, keyword: &str) -> Option<&HashSet<Arc<Emoji>>> {
        self.keyword2emoji.get(&normalize_word(keyword))
    }

    /// Tags of `keyword`. The keyword is normalized first.
    pub fn tags_for(&self, keyword: &str) -> Option<&BTreeSet<WordTag>> {
        self.keyword2tag.get(&normalize_word(keyword))
    }

    /// Normalized keywords associated with `emoji`.
    pub fn keywords_for(&self, emoji: &Emoji) -> Option<&BTreeSet<String>> {
        self.emoji2keyword.get(emoji)
    }

    /// Every catalog emoji with its keyword set, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = (&Arc<Emoji>, &BTreeSet<String>)> {
        self.emoji2keyword.iter()
    }

    /// Every indexed keyword with its emoji set, in no particular order.
    pub fn keywords(&self) -> impl Iterator<Item = (&str, &HashSet<Arc<Emoji>>)> {
        self.keyword2emoji.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keyword_count(&self) -> usize {
        self.keyword2emoji.len()
    }

    pub fn emoji_count(&self) -> usize {
        self.emoji2keyword.len()
    }

    /// Lookup with an already-normalized key.
    pub(crate) fn emojis_for_normalized(&self, normalized: &str) -> Option<&HashSet<Arc<Emoji>>> {
        self.keyword2emoji.get(normalized)
    }

    /// Lookup with an already-normalized key.
    pub(crate) fn tags_for_normalized(&self, normalized: &str) -> Option<&BTreeSet<WordTag>> {
        self.keyword2tag.get(normalized)
    }
}

/// Normalized keyword set of one context entry.
fn entry_keywords(
    dataset: &Dataset,
    entry: &ContextEntry,
    enhancement: Enhancement,
) -> BTreeSet<String> {
    let mut result = BTreeSet::new();
    let mut insert = |raw: &str| {
        let normalized = normalize_word(raw);
        // An empty key would substring-match every message.
        if !normalized.is_empty() {
            result.insert(normalized);
        }
    };

    for keyword in &entry.keywords {
        insert(keyword.as_str());
        if enhancement == Enhancement::Synonyms {
            if let Some(word) = dataset.word(keyword) {
                for synonym in &word.cover {
                    insert(synonym.as_str());
                }
            }
        }
    }

    if enhancement == Enhancement::Synonyms {
        for emoji in &entry.emoji {
            insert(emoji.id.as_str());
        }
    }

    result
}
