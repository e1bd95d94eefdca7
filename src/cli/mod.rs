//! Command-line front end.
//!
//! Provides the suggest, list and compose commands.

use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::core::{score, IndexCache};
use crate::dataset::{DataVersion, Emoji};
use crate::services::{self, ConcatStyle, DestinationKind};

#[derive(Parser)]
#[command(name = "git-emoji")]
#[command(about = "Suggest emoji for commit messages", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/git-emoji/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Corpus version to use instead of the configured one (v1 or v2)
    #[arg(long = "data-version", global = true, value_name = "VERSION")]
    pub data_version: Option<DataVersion>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Suggest emoji for a message
    Suggest {
        /// Message text (default: --file, then stdin)
        message: Option<String>,

        /// Read the message from a file, e.g. .git/COMMIT_EDITMSG
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Maximum number of emoji to show
        #[arg(long)]
        limit: Option<usize>,

        /// Print one emoji per line with its score
        #[arg(long)]
        scores: bool,
    },

    /// List all emoji with their keywords
    List {
        /// Fuzzy filter over shortcode and keywords
        query: Option<String>,
    },

    /// Combine emoji with a message and emit the result
    Compose {
        /// Message text (default: --file, then stdin)
        message: Option<String>,

        /// Read the message from a file
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Emoji id to use, in order (default: top suggestion)
        #[arg(long = "emoji", value_name = "ID")]
        emoji: Vec<String>,

        /// emoji-first, message-first, sandwich, after-first-word
        #[arg(long)]
        style: Option<ConcatStyle>,

        /// copy, terminal, commit-file, new-document
        #[arg(long = "to", value_name = "DEST")]
        destination: Option<DestinationKind>,
    },
}

/// Parse arguments and run the requested command.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::load(),
    };
    if let Some(version) = cli.data_version {
        config.general.data_version = version;
    }

    let stdout = io::stdout();
    execute(cli.command, &config, &mut stdout.lock())
}

/// Run one command against a loaded configuration, writing output to `out`.
pub fn execute<W: Write>(command: Commands, config: &Config, out: &mut W) -> anyhow::Result<()> {
    let cache = IndexCache::new(config.dataset().context("failed to load dataset")?);
    let index = cache.get(config.general.data_version);

    match command {
        Commands::Suggest {
            message,
            file,
            limit,
            scores,
        } => {
            let message = read_message(message, file.as_deref())?;
            let ranked = score(&message, &index, &config.weights);
            let limit = limit
                .unwrap_or(config.behavior.max_preview as usize)
                .max(1);

            if scores {
                for suggestion in ranked.iter().take(limit) {
                    writeln!(
                        out,
                        "{} {} {}",
                        suggestion.emoji.glyph,
                        suggestion.emoji.shortcode(),
                        suggestion.score
                    )?;
                }
            } else {
                let emojis: Vec<Arc<Emoji>> = ranked.into_iter().map(|s| s.emoji).collect();
                writeln!(out, "{}", services::preview_line(&emojis, limit))?;
            }
        }
        Commands::List { query } => {
            let items = services::listing(&index);
            let items = services::filter_listing(&items, query.as_deref().unwrap_or(""));
            for item in items {
                writeln!(out, "{}  {}  {}", item.label, item.description, item.detail)?;
            }
        }
        Commands::Compose {
            message,
            file,
            emoji,
            style,
            destination,
        } => {
            let message = read_message(message, file.as_deref())?;

            let selected: Vec<Arc<Emoji>> = if emoji.is_empty() {
                let top = crate::core::suggest(&message, &index, &config.weights);
                match top.into_iter().next() {
                    Some(e) => vec![e],
                    None => bail!("no emoji suggested for this message, pass --emoji"),
                }
            } else {
                emoji
                    .iter()
                    .map(|id| {
                        let id = id.trim_matches(':');
                        cache
                            .dataset()
                            .emoji(id)
                            .cloned()
                            .with_context(|| format!("unknown emoji id '{}'", id))
                    })
                    .collect::<anyhow::Result<_>>()?
            };

            let style = style.unwrap_or(config.behavior.concat_style);
            let combined = services::combine(style, &selected, &message);

            let kind = destination.unwrap_or(config.behavior.destination);
            let emitted = services::emit_with(&config.destination(kind), &combined, out)?;
            if let Some(notice) = emitted.notification() {
                eprintln!("{}", notice);
            }
        }
    }

    Ok(())
}

/// Message from the argument, then the file, then stdin when piped.
fn read_message(message: Option<String>, file: Option<&Path>) -> anyhow::Result<String> {
    if let Some(message) = message {
        return non_empty(message);
    }
    if let Some(path) = file {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        return non_empty(strip_git_comments(&content));
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        bail!("no message given, pass it as an argument, with --file, or on stdin");
    }
    let mut content = String::new();
    stdin.lock().read_to_string(&mut content)?;
    non_empty(content)
}

/// Marker line of `git commit --verbose`; everything below it is the diff.
const SCISSORS: &str = "# ------------------------ >8 ------------------------";

/// Drop `#` comment lines git adds to commit message templates, and the
/// verbose diff below the scissors line.
fn strip_git_comments(content: &str) -> String {
    content
        .lines()
        .take_while(|line| line.trim_end() != SCISSORS)
        .filter(|line| !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
}

fn non_empty(message: String) -> anyhow::Result<String> {
    let message = message.trim().to_string();
    if message.is_empty() {
        bail!("message is empty");
    }
    Ok(message)
}
