//! Static keyword/emoji dataset.
//!
//! The dataset is three tables:
//!
//! - the emoji catalog (`id` + glyph, ids unique)
//! - two context corpora (`v1`, `v2`), each a list of keyword-set ↔ emoji-set
//!   associations
//! - the word table: canonical word → `cover` synonyms + [`WordTag`]s
//!
//! The on-disk format is JSON. A curated default is compiled into the binary
//! and returned by [`Dataset::builtin`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{GitEmojiError, GitEmojiResult};

/// The embedded default dataset.
pub const DEFAULT_DATASET_JSON: &str = include_str!("default.json");

/// An emoji from the catalog.
///
/// Identity is the `id`: two `Emoji` are equal exactly when their ids are.
/// A validated [`Dataset`] never holds two entries with the same id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Emoji {
    pub id: String,
    #[serde(rename = "s")]
    pub glyph: String,
}

impl Emoji {
    pub fn new(id: impl Into<String>, glyph: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            glyph: glyph.into(),
        }
    }

    /// Shortcode form, e.g. `:rocket:`
    pub fn shortcode(&self) -> String {
        format!(":{}:", self.id)
    }
}

impl PartialEq for Emoji {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Emoji {}

impl Hash for Emoji {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Emoji {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Emoji {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}

/// How strongly a vocabulary word signals emoji relevance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordTag {
    Verb,
    Acronym,
    Abbreviation,
}

impl WordTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            WordTag::Verb => "verb",
            WordTag::Acronym => "acronym",
            WordTag::Abbreviation => "abbreviation",
        }
    }
}

impl fmt::Display for WordTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata for a vocabulary word.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordEntry {
    /// Canonical word; filled from the word-table key on load.
    #[serde(skip)]
    pub key: String,
    /// Synonyms and variants resolving to the same semantics as `key`.
    #[serde(default)]
    pub cover: Vec<String>,
    #[serde(default)]
    pub tag: BTreeSet<WordTag>,
}

/// Which context corpus drives keyword→emoji indexing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataVersion {
    V1,
    #[default]
    V2,
}

impl DataVersion {
    pub const ALL: [DataVersion; 2] = [DataVersion::V1, DataVersion::V2];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataVersion::V1 => "v1",
            DataVersion::V2 => "v2",
        }
    }
}

impl fmt::Display for DataVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataVersion {
    type Err = GitEmojiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "v1" => Ok(DataVersion::V1),
            "v2" => Ok(DataVersion::V2),
            other => Err(GitEmojiError::Config(format!(
                "unknown data version '{}', expected v1 or v2",
                other
            ))),
        }
    }
}

/// A context entry exactly as it appears in the source data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextSource {
    pub keyword: Vec<String>,
    /// Emoji ids, resolved against the catalog on load.
    pub emoji: Vec<String>,
}

impl ContextSource {
    pub fn new(keywords: &[&str], emoji: &[&str]) -> Self {
        Self {
            keyword: keywords.iter().map(|k| k.to_string()).collect(),
            emoji: emoji.iter().map(|e| e.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorporaSource {
    #[serde(default)]
    pub v1: Vec<ContextSource>,
    #[serde(default)]
    pub v2: Vec<ContextSource>,
}

/// Unvalidated dataset, the deserialized form of the JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetSource {
    pub emoji: Vec<Emoji>,
    #[serde(default)]
    pub context: CorporaSource,
    #[serde(default)]
    pub word: BTreeMap<String, WordEntry>,
}

/// A context entry with its emoji resolved to catalog entries.
#[derive(Debug, Clone)]
pub struct ContextEntry {
    pub keywords: Vec<String>,
    pub emoji: Vec<Arc<Emoji>>,
}

/// A validated dataset. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct Dataset {
    emoji: Vec<Arc<Emoji>>,
    by_id: HashMap<String, Arc<Emoji>>,
    v1: Vec<ContextEntry>,
    v2: Vec<ContextEntry>,
    words: BTreeMap<String, WordEntry>,
}

impl Dataset {
    /// Parse and validate the embedded default dataset.
    pub fn builtin() -> GitEmojiResult<Self> {
        Self::from_json(DEFAULT_DATASET_JSON)
    }

    /// Parse and validate a dataset from JSON text.
    pub fn from_json(json: &str) -> GitEmojiResult<Self> {
        let source: DatasetSource = serde_json::from_str(json)?;
        Self::from_source(source)
    }

    /// Load a dataset file from disk.
    pub fn load(path: &Path) -> GitEmojiResult<Self> {
        let content = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading dataset file");
        Self::from_json(&content)
    }

    /// Validate a source dataset.
    ///
    /// Fails on an empty catalog, duplicate ids, an empty glyph, or a context
    /// entry that references an id missing from the catalog.
    pub fn from_source(source: DatasetSource) -> GitEmojiResult<Self> {
        if source.emoji.is_empty() {
            return Err(GitEmojiError::Dataset("emoji catalog is empty".to_string()));
        }

        let mut emoji = Vec::with_capacity(source.emoji.len());
        let mut by_id = HashMap::with_capacity(source.emoji.len());
        for e in source.emoji {
            if e.glyph.is_empty() {
                return Err(GitEmojiError::Dataset(format!(
                    "emoji '{}' has an empty glyph",
                    e.id
                )));
            }
            let e = Arc::new(e);
            if by_id.insert(e.id.clone(), Arc::clone(&e)).is_some() {
                return Err(GitEmojiError::DuplicateEmoji { id: e.id.clone() });
            }
            emoji.push(e);
        }

        let v1 = resolve_corpus(&by_id, source.context.v1)?;
        let v2 = resolve_corpus(&by_id, source.context.v2)?;

        let words = source
            .word
            .into_iter()
            .map(|(key, mut entry)| {
                entry.key = key.clone();
                (key, entry)
            })
            .collect();

        Ok(Self {
            emoji,
            by_id,
            v1,
            v2,
            words,
        })
    }

    /// Every catalog emoji, in catalog order.
    pub fn emojis(&self) -> &[Arc<Emoji>] {
        &self.emoji
    }

    /// Look up a catalog emoji by id.
    pub fn emoji(&self, id: &str) -> Option<&Arc<Emoji>> {
        self.by_id.get(id)
    }

    /// Look up a word-table entry by its canonical key.
    pub fn word(&self, key: &str) -> Option<&WordEntry> {
        self.words.get(key)
    }

    pub fn words(&self) -> impl Iterator<Item = &WordEntry> {
        self.words.values()
    }

    /// Context entries of one corpus.
    pub fn context(&self, version: DataVersion) -> &[ContextEntry] {
        match version {
            DataVersion::V1 => &self.v1,
            DataVersion::V2 => &self.v2,
        }
    }
}

fn resolve_corpus(
    by_id: &HashMap<String, Arc<Emoji>>,
    entries: Vec<ContextSource>,
) -> GitEmojiResult<Vec<ContextEntry>> {
    entries
        .into_iter()
        .map(|entry| {
            let emoji = entry
                .emoji
                .iter()
                .map(|id| {
                    by_id
                        .get(id)
                        .cloned()
                        .ok_or_else(|| GitEmojiError::UnknownEmoji { id: id.clone() })
                })
                .collect::<GitEmojiResult<Vec<_>>>()?;
            Ok(ContextEntry {
                keywords: entry.keyword,
                emoji,
            })
        })
        .collect()
}
