//! TreeBuilder - walks a directory and renders one line per entry

use std::collections::HashMap;
use std::path::Path;

use rayon::prelude::*;

use crate::error::{PoplrError, Result};
use crate::output::paint_directory;
use crate::stats::Statistics;

use super::config::Configuration;
use super::fs::{FileSystem, OsFileSystem};
use super::metadata::{self, EntryMetadata};
use super::sort;
use super::symbols::Symbols;
use super::utils::{get_name, normalize_path};

/// The formatted body of a tree plus the statistics gathered building it.
#[derive(Debug)]
pub struct TreeOutput {
    pub body: String,
    pub stats: Statistics,
}

/// Builds the textual tree for a root directory.
pub struct TreeBuilder<F: FileSystem = OsFileSystem> {
    config: Configuration,
    fs: F,
}

impl TreeBuilder<OsFileSystem> {
    pub fn new(config: Configuration) -> Self {
        Self {
            config,
            fs: OsFileSystem,
        }
    }
}

impl<F: FileSystem> TreeBuilder<F> {
    pub fn with_file_system<G: FileSystem>(self, fs: G) -> TreeBuilder<G> {
        TreeBuilder {
            config: self.config,
            fs,
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Walk `root` and return the rendered body with its statistics.
    ///
    /// `root` is made absolute and `.`/`..` are resolved before walking, so
    /// the root name and full paths never carry them.
    ///
    /// Fails with [`PoplrError::NotADirectory`] when `root` is not a directory.
    /// Unreadable subdirectories and vanished entries are logged and skipped.
    pub fn build(&self, root: &Path) -> Result<TreeOutput> {
        let root = normalize_path(root);
        let root = root.as_path();
        match self.fs.stat(root) {
            Ok(stat) if stat.is_dir => {}
            _ => return Err(PoplrError::NotADirectory(root.to_path_buf())),
        }

        let mut traversal = Traversal {
            config: &self.config,
            fs: &self.fs,
            symbols: Symbols::for_format(self.config.format, self.config.fancy),
            stats: Statistics::new(),
            body: String::new(),
        };

        if self.config.show_root {
            let name = if self.config.full_path {
                root.display().to_string()
            } else {
                get_name(root)
            };
            traversal.push_line(format!("{}/", name), true);
        }

        traversal.walk_level(root, "", 0);
        log::debug!(
            "built tree for {}: {} directories, {} files",
            root.display(),
            traversal.stats.total_dirs(),
            traversal.stats.total_files()
        );

        Ok(TreeOutput {
            body: traversal.body,
            stats: traversal.stats,
        })
    }
}

/// Mutable state for one call to [`TreeBuilder::build`].
struct Traversal<'a, F: FileSystem> {
    config: &'a Configuration,
    fs: &'a F,
    symbols: Symbols,
    stats: Statistics,
    body: String,
}

impl<F: FileSystem> Traversal<'_, F> {
    fn at_max_depth(&self, depth: usize) -> bool {
        self.config.max_depth.is_some_and(|max| depth > max)
    }

    fn walk_level(&mut self, path: &Path, prefix: &str, depth: usize) {
        if self.at_max_depth(depth) {
            return;
        }

        let names = match self.fs.list_directory(path) {
            Ok(names) => names,
            Err(source) => {
                let err = PoplrError::DirectoryUnreadable {
                    path: path.to_path_buf(),
                    source,
                };
                log::error!("{err}");
                return;
            }
        };
        log::trace!("listing {} ({} entries)", path.display(), names.len());

        // Excluded entries are never stat'ed or counted.
        let kept: Vec<String> = names
            .into_iter()
            .filter(|name| !self.config.is_excluded(name))
            .collect();

        let fs = self.fs;
        let show_size = self.config.show_size;
        let resolved: HashMap<String, EntryMetadata> = kept
            .into_par_iter()
            .filter_map(|name| {
                let meta = metadata::resolve(fs, &path.join(&name), show_size)?;
                Some((name, meta))
            })
            .collect();

        let names: Vec<String> = resolved.keys().cloned().collect();
        let sorted = sort::order(&names, self.config.sort_by, &resolved);
        let count = sorted.len();

        for (i, name) in sorted.iter().enumerate() {
            let is_last = i + 1 == count;
            let entry_path = path.join(name);
            let Some(meta) = resolved.get(name) else {
                continue;
            };

            if meta.is_dir {
                self.stats.add_directory(depth);
            } else {
                self.stats.add_file(&entry_path, meta.size);
            }

            let display_name = if self.config.full_path {
                entry_path.display().to_string()
            } else {
                name.clone()
            };
            let line = self.format_entry(&display_name, name, meta, is_last, prefix);
            self.push_line(line, meta.is_dir);

            if meta.is_dir {
                if meta.is_symlink {
                    log::debug!("not descending into symlink {}", entry_path.display());
                    continue;
                }
                let child_prefix = self.symbols.child_prefix(self.config.format, prefix, is_last);
                self.walk_level(&entry_path, &child_prefix, depth + 1);
            }
        }
    }

    fn format_entry(
        &self,
        display_name: &str,
        name: &str,
        meta: &EntryMetadata,
        is_last: bool,
        prefix: &str,
    ) -> String {
        let connector = self.symbols.connector(is_last);
        let icon = if self.config.use_icons {
            format!("{} ", self.config.file_types.icon(name, meta.is_dir))
        } else {
            String::new()
        };
        format!(
            "{}{} {}{}{}{}",
            prefix,
            connector,
            icon,
            display_name,
            if meta.is_dir { "/" } else { "" },
            meta.size_label
                .as_ref()
                .map(|s| format!(" ({})", s))
                .unwrap_or_default()
        )
    }

    fn push_line(&mut self, line: String, is_dir: bool) {
        if is_dir && self.config.colorize() {
            self.body.push_str(&paint_directory(&line));
        } else {
            self.body.push_str(&line);
        }
        self.body.push('\n');
    }
}
