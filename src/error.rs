//! Error types for git-emoji
//!
//! Provides standardized error handling across the library. Index building and
//! scoring never fail on a validated dataset; every error here comes from
//! loading data, configuration, or emitting a composed message.

use thiserror::Error;

/// Errors that can occur in git-emoji
#[derive(Debug, Error)]
pub enum GitEmojiError {
    /// Malformed or inconsistent dataset
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// A context entry references an emoji missing from the catalog
    #[error("Dataset error: unknown emoji '{id}' referenced by a context entry")]
    UnknownEmoji { id: String },

    /// Two catalog entries share the same identifier
    #[error("Dataset error: duplicate emoji id '{id}'")]
    DuplicateEmoji { id: String },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Clipboard operation errors
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Delivery of a composed message failed
    #[error("Emit error: {0}")]
    Emit(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for git-emoji operations
pub type GitEmojiResult<T> = Result<T, GitEmojiError>;

impl From<serde_json::Error> for GitEmojiError {
    fn from(err: serde_json::Error) -> Self {
        GitEmojiError::Dataset(err.to_string())
    }
}
