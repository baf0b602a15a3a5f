//! Filesystem access used by the tree builder

use std::ffi::OsString;
use std::io;
use std::path::Path;

/// Result of stat'ing a single entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryStat {
    pub is_dir: bool,
    /// The entry itself is a symlink (its target was stat'ed).
    pub is_symlink: bool,
    pub len: u64,
}

/// Directory listing and stat, abstracted so traversal can be driven
/// against something other than the local disk.
///
/// `stat` must report a vanished entry with [`io::ErrorKind::NotFound`];
/// the builder degrades those to placeholders and treats any other error as
/// a reason to drop the entry.
pub trait FileSystem: Sync {
    fn list_directory(&self, path: &Path) -> io::Result<Vec<String>>;

    fn stat(&self, path: &Path) -> io::Result<EntryStat>;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn list_directory(&self, path: &Path) -> io::Result<Vec<String>> {
        let entries = std::fs::read_dir(path)?;
        Ok(entry_names(
            path,
            entries.map(|entry| entry.map(|e| e.file_name())),
        ))
    }

    fn stat(&self, path: &Path) -> io::Result<EntryStat> {
        let meta = std::fs::metadata(path)?;
        let is_symlink = std::fs::symlink_metadata(path)
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false);
        Ok(EntryStat {
            is_dir: meta.is_dir(),
            is_symlink,
            len: meta.len(),
        })
    }
}

/// Names of the listed entries; entries that fail to read are logged and skipped.
fn entry_names(dir: &Path, entries: impl Iterator<Item = io::Result<OsString>>) -> Vec<String> {
    entries
        .filter_map(|entry| match entry {
            Ok(name) => Some(name.to_string_lossy().to_string()),
            Err(e) => {
                log::warn!("skipping unreadable entry in {}: {}", dir.display(), e);
                None
            }
        })
        .collect()
}
