use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::Weights;
use crate::dataset::{DataVersion, Dataset};
use crate::error::{GitEmojiError, GitEmojiResult};
use crate::services::{ConcatStyle, Destination, DestinationKind};

/// Upper bound for any single match weight.
pub const MAX_WEIGHT: i64 = 1_000_000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub weights: Weights,
    pub behavior: BehaviorConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Which context corpus drives suggestions
    pub data_version: DataVersion,
    /// Dataset JSON file replacing the built-in one; `~` is expanded
    pub dataset_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    pub max_preview: u32,
    pub concat_style: ConcatStyle,
    pub destination: DestinationKind,
    pub commit_file: String,
    pub document_dir: String,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            max_preview: 10,
            concat_style: ConcatStyle::EmojiFirst,
            destination: DestinationKind::Terminal,
            commit_file: ".git/COMMIT_EDITMSG".to_string(),
            document_dir: "~/.local/share/git-emoji/messages".to_string(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".config"))
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
            })
            .join("git-emoji")
            .join("config.toml")
    }

    /// Load config from file, or return defaults if not found or unreadable
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), "failed to load config: {}", e);
                Self::default()
            }
        }
    }

    /// Load config from a specific file, failing on read or parse errors
    pub fn load_from(path: &Path) -> GitEmojiResult<Self> {
        let content = fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.validate();
        Ok(config)
    }

    /// Validate and clamp config values to acceptable ranges
    fn validate(&mut self) {
        self.behavior.max_preview = self.behavior.max_preview.clamp(1, 50);

        let w = &mut self.weights;
        for weight in [
            &mut w.substring,
            &mut w.whole_word,
            &mut w.verb,
            &mut w.acronym,
            &mut w.abbreviation,
        ] {
            *weight = (*weight).clamp(0, MAX_WEIGHT);
        }
    }

    pub fn save_to(&self, path: &Path) -> GitEmojiResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| GitEmojiError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)?;
        Ok(())
    }

    /// Expanded dataset path, if one is configured
    pub fn dataset_path(&self) -> Option<PathBuf> {
        self.general
            .dataset_path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(|p| PathBuf::from(shellexpand::tilde(p).into_owned()))
    }

    /// The configured dataset, or the built-in one
    pub fn dataset(&self) -> GitEmojiResult<Dataset> {
        match self.dataset_path() {
            Some(path) => Dataset::load(&path),
            None => Dataset::builtin(),
        }
    }

    /// Resolve a destination name using the configured paths
    pub fn destination(&self, kind: DestinationKind) -> Destination {
        match kind {
            DestinationKind::Copy => Destination::Clipboard,
            DestinationKind::Terminal => Destination::Terminal,
            DestinationKind::CommitFile => Destination::CommitMessageFile(PathBuf::from(
                shellexpand::tilde(&self.behavior.commit_file).into_owned(),
            )),
            DestinationKind::NewDocument => Destination::NewDocument(PathBuf::from(
                shellexpand::tilde(&self.behavior.document_dir).into_owned(),
            )),
        }
    }
}
