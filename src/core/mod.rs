//! Core engine - matching and ranking, no I/O.
//!
//! - [`normalize`] - word normalization and tokenization
//! - [`index`] - keyword/emoji index built from one corpus version
//! - [`cache`] - per-version index cache
//! - [`suggest`] - weighted scoring and ranking

pub mod cache;
pub mod index;
pub mod normalize;
pub mod suggest;

pub use cache::IndexCache;
pub use index::{Enhancement, IndexedDataset};
pub use normalize::{first_whitespace_after_first_word, normalize_word, words};
pub use suggest::{score, suggest, Suggestion, Weights};
