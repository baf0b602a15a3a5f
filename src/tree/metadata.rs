//! Per-entry metadata captured during traversal

use std::io;
use std::path::Path;

use crate::error::PoplrError;

use super::fs::FileSystem;
use super::utils::format_size;

/// Snapshot of one entry, recomputed on every traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMetadata {
    pub is_dir: bool,
    pub is_symlink: bool,
    /// Raw byte size; zero for directories.
    pub size: u64,
    /// Human readable size, only set for files when size display is on.
    pub size_label: Option<String>,
}

impl EntryMetadata {
    pub fn directory() -> Self {
        Self {
            is_dir: true,
            is_symlink: false,
            size: 0,
            size_label: None,
        }
    }

    pub fn file(size: u64) -> Self {
        Self {
            is_dir: false,
            is_symlink: false,
            size,
            size_label: None,
        }
    }

    /// Stand-in for an entry that disappeared between listing and stat.
    pub fn placeholder() -> Self {
        Self::file(0)
    }

    fn with_label(mut self, show_size: bool) -> Self {
        if show_size && !self.is_dir {
            self.size_label = Some(format_size(self.size));
        }
        self
    }
}

/// Stat `path` through `fs`.
///
/// A missing entry degrades to an unlabeled [`EntryMetadata::placeholder`]
/// with a warning.
/// Any other failure is logged and yields `None`, dropping the entry.
pub fn resolve<F: FileSystem + ?Sized>(
    fs: &F,
    path: &Path,
    show_size: bool,
) -> Option<EntryMetadata> {
    match fs.stat(path) {
        Ok(stat) => {
            let meta = EntryMetadata {
                is_dir: stat.is_dir,
                is_symlink: stat.is_symlink,
                size: if stat.is_dir { 0 } else { stat.len },
                size_label: None,
            };
            Some(meta.with_label(show_size))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("{}", PoplrError::EntryUnavailable(path.to_path_buf()));
            Some(EntryMetadata::placeholder())
        }
        Err(e) => {
            log::error!("skipping {}: {}", path.display(), e);
            None
        }
    }
}
