//! Delivery of a composed message to its destination.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{GitEmojiError, GitEmojiResult};

/// Caller-supplied handler for [`Destination::Custom`].
pub type EmitHandler = Arc<dyn Fn(&str) -> GitEmojiResult<()> + Send + Sync>;

/// Where a composed message is delivered.
#[derive(Clone)]
pub enum Destination {
    /// System clipboard
    Clipboard,
    /// Standard output
    Terminal,
    /// Overwrite a commit message file, e.g. `.git/COMMIT_EDITMSG`
    CommitMessageFile(PathBuf),
    /// Create a new numbered document in a directory
    NewDocument(PathBuf),
    /// Hand the text to a caller-supplied handler
    Custom(EmitHandler),
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Clipboard => f.write_str("Clipboard"),
            Destination::Terminal => f.write_str("Terminal"),
            Destination::CommitMessageFile(path) => {
                f.debug_tuple("CommitMessageFile").field(path).finish()
            }
            Destination::NewDocument(dir) => f.debug_tuple("NewDocument").field(dir).finish(),
            Destination::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Destination names usable from configuration and the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DestinationKind {
    Copy,
    #[default]
    Terminal,
    CommitFile,
    NewDocument,
}

impl DestinationKind {
    pub const ALL: [DestinationKind; 4] = [
        DestinationKind::Copy,
        DestinationKind::Terminal,
        DestinationKind::CommitFile,
        DestinationKind::NewDocument,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DestinationKind::Copy => "copy",
            DestinationKind::Terminal => "terminal",
            DestinationKind::CommitFile => "commit-file",
            DestinationKind::NewDocument => "new-document",
        }
    }
}

impl fmt::Display for DestinationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DestinationKind {
    type Err = GitEmojiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "copy" | "clipboard" => Ok(DestinationKind::Copy),
            "terminal" | "stdout" => Ok(DestinationKind::Terminal),
            "commit-file" => Ok(DestinationKind::CommitFile),
            "new-document" => Ok(DestinationKind::NewDocument),
            other => Err(GitEmojiError::Config(format!(
                "unknown destination '{}'",
                other
            ))),
        }
    }
}

/// What an emit did, for user feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emitted {
    Copied(String),
    Printed,
    Written(PathBuf),
    Handled,
}

impl Emitted {
    /// Short notice for the user, if any.
    pub fn notification(&self) -> Option<String> {
        match self {
            Emitted::Copied(text) => Some(format!("Copied: {}", text)),
            Emitted::Written(path) => Some(format!("Written: {}", path.display())),
            Emitted::Printed | Emitted::Handled => None,
        }
    }
}

/// Deliver `text`, printing [`Destination::Terminal`] output to stdout.
pub fn emit(destination: &Destination, text: &str) -> GitEmojiResult<Emitted> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    emit_with(destination, text, &mut out)
}

/// Deliver `text`, printing [`Destination::Terminal`] output to `out`.
pub fn emit_with<W: Write>(
    destination: &Destination,
    text: &str,
    out: &mut W,
) -> GitEmojiResult<Emitted> {
    tracing::debug!(?destination, "emitting message");
    match destination {
        Destination::Clipboard => {
            copy_to_clipboard(text)?;
            Ok(Emitted::Copied(text.to_string()))
        }
        Destination::Terminal => {
            writeln!(out, "{}", text)?;
            out.flush()?;
            Ok(Emitted::Printed)
        }
        Destination::CommitMessageFile(path) => {
            write_commit_message(path, text)?;
            Ok(Emitted::Written(path.clone()))
        }
        Destination::NewDocument(dir) => {
            let path = write_new_document(dir, text)?;
            Ok(Emitted::Written(path))
        }
        Destination::Custom(handler) => {
            handler(text)?;
            Ok(Emitted::Handled)
        }
    }
}

/// On X11 and Wayland the selection is served by its owning process, so this
/// blocks until another client takes ownership of the clipboard.
#[cfg(all(feature = "clipboard", target_os = "linux"))]
fn copy_to_clipboard(text: &str) -> GitEmojiResult<()> {
    use arboard::SetExtLinux;

    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| GitEmojiError::Clipboard(e.to_string()))?;
    tracing::debug!("serving clipboard until another client takes ownership");
    clipboard
        .set()
        .wait()
        .text(text)
        .map_err(|e| GitEmojiError::Clipboard(e.to_string()))
}

#[cfg(all(feature = "clipboard", not(target_os = "linux")))]
fn copy_to_clipboard(text: &str) -> GitEmojiResult<()> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| GitEmojiError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text)
        .map_err(|e| GitEmojiError::Clipboard(e.to_string()))
}

#[cfg(not(feature = "clipboard"))]
fn copy_to_clipboard(_text: &str) -> GitEmojiResult<()> {
    Err(GitEmojiError::Clipboard(
        "built without clipboard support".to_string(),
    ))
}

fn write_commit_message(path: &Path, text: &str) -> GitEmojiResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            return Err(GitEmojiError::Emit(format!(
                "commit message directory does not exist: {}",
                parent.display()
            )));
        }
    }
    let mut content = text.to_string();
    if !content.ends_with('\n') {
        content.push('\n');
    }
    fs::write(path, content)?;
    Ok(())
}

/// Write `text` to the first free `message-N.txt` in `dir`.
fn write_new_document(dir: &Path, text: &str) -> GitEmojiResult<PathBuf> {
    fs::create_dir_all(dir)?;
    for n in 1..=u16::MAX {
        let path = dir.join(format!("message-{}.txt", n));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                file.write_all(text.as_bytes())?;
                return Ok(path);
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Err(GitEmojiError::Emit(format!(
        "no free document name in {}",
        dir.display()
    )))
}
