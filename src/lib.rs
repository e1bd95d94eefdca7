//! git-emoji - emoji suggestions for commit messages.
//!
//! Words of a message are matched against a curated keyword→emoji dataset,
//! both as whole words and as substrings, and every related emoji is ranked by
//! a weighted score. The chosen emoji can then be combined with the message
//! and delivered to the clipboard, the terminal, a commit message file, or a
//! caller-supplied handler.
//!
//! # Architecture
//!
//! - [`dataset`] - Emoji catalog, context corpora and word table
//! - [`core`] - Normalization, indexing, index cache and scoring
//! - [`services`] - Formatting, listing and delivery
//! - [`config`] - Configuration loading and management
//! - `cli` - Command-line front end (`cli` feature)
//!
//! # Example
//!
//! ```
//! use git_emoji::{DataVersion, Dataset, IndexCache, Weights};
//!
//! let cache = IndexCache::new(Dataset::builtin().unwrap());
//! let index = cache.get(DataVersion::V2);
//! let emojis = git_emoji::suggest("fix crash on startup", &index, &Weights::default());
//! assert_eq!(emojis[0].id, "bug");
//! ```

pub mod config;
pub mod core;
pub mod dataset;
pub mod services;

#[cfg(feature = "cli")]
pub mod cli;

mod error;

pub use config::Config;
pub use core::{normalize_word, score, suggest, IndexCache, IndexedDataset, Suggestion, Weights};
pub use dataset::{DataVersion, Dataset, Emoji, WordEntry, WordTag};
pub use error::{GitEmojiError, GitEmojiResult};
pub use services::{combine, concat_emojis, emit, join_sorted, ConcatStyle, Destination};
