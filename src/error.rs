//! Error types shared by the tree builder, renderer and export sink

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PoplrError>;

#[derive(Error, Debug)]
pub enum PoplrError {
    /// An unknown format, sort strategy, export kind or malformed exclusion pattern.
    #[error("Invalid {field}: {value}. Must be one of: {expected}")]
    InvalidConfiguration {
        field: &'static str,
        value: String,
        expected: String,
    },

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// Listed, then gone (or unreadable) by the time it was stat'ed.
    #[error("{} not found or inaccessible", .0.display())]
    EntryUnavailable(PathBuf),

    #[error("error reading directory {}: {source}", path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    OutputWriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl PoplrError {
    pub(crate) fn invalid(field: &'static str, value: &str, expected: &[&str]) -> Self {
        Self::InvalidConfiguration {
            field,
            value: value.to_string(),
            expected: expected.join(", "),
        }
    }

    /// The path this error occurred at, if applicable.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NotADirectory(p)
            | Self::EntryUnavailable(p)
            | Self::DirectoryUnreadable { path: p, .. }
            | Self::OutputWriteFailure { path: p, .. } => Some(p),
            _ => None,
        }
    }

    /// Whether traversal keeps going after this error.
    ///
    /// Recoverable errors are logged where they happen and never reach the caller.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::EntryUnavailable(_) | Self::DirectoryUnreadable { .. }
        )
    }
}
