//! Directory statistics collection and display
//!
//! A [`Statistics`] value is owned by a single traversal. The builder feeds it
//! every entry that survives exclusion, and it is read once at the end to
//! produce either a text summary or a [`StatsReport`].

use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::time::Instant;

use serde::Serialize;
use termcolor::{Ansi, Color, ColorSpec, NoColor, WriteColor};

use crate::tree::{extension_of, format_size_compact};

/// Bucket for files without an extension.
pub const NO_EXTENSION: &str = "no extension";

const RULE_WIDTH: usize = 30;

#[derive(Debug, Clone, Copy)]
struct ExtensionCount {
    count: usize,
    first_seen: usize,
}

/// Counters for one traversal.
#[derive(Debug)]
pub struct Statistics {
    total_files: usize,
    total_dirs: usize,
    total_size: u64,
    file_types: HashMap<String, ExtensionCount>,
    max_depth: usize,
    started: Instant,
}

/// Structured form of [`Statistics`] for JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub total_files: usize,
    pub total_dirs: usize,
    pub total_size: u64,
    pub max_depth_reached: usize,
    pub scan_time_secs: f64,
    /// Most common first.
    pub file_types: Vec<FileTypeCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileTypeCount {
    pub extension: String,
    pub count: usize,
}

impl Default for Statistics {
    fn default() -> Self {
        Self::new()
    }
}

impl Statistics {
    pub fn new() -> Self {
        Self {
            total_files: 0,
            total_dirs: 0,
            total_size: 0,
            file_types: HashMap::new(),
            max_depth: 0,
            started: Instant::now(),
        }
    }

    /// Record a file; its extension is taken case-insensitively from `path`.
    pub fn add_file(&mut self, path: &Path, size: u64) {
        self.total_files += 1;
        self.total_size += size;

        let ext = extension_of(path)
            .map(|e| format!(".{e}"))
            .unwrap_or_else(|| NO_EXTENSION.to_string());
        let first_seen = self.file_types.len();
        self.file_types
            .entry(ext)
            .or_insert(ExtensionCount {
                count: 0,
                first_seen,
            })
            .count += 1;
    }

    /// Record a directory found while listing the level at `depth`.
    pub fn add_directory(&mut self, depth: usize) {
        self.total_dirs += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    pub fn total_files(&self) -> usize {
        self.total_files
    }

    pub fn total_dirs(&self) -> usize {
        self.total_dirs
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    /// Extension counts, most common first; ties keep first-seen order.
    pub fn file_types(&self) -> Vec<FileTypeCount> {
        let mut entries: Vec<_> = self.file_types.iter().collect();
        entries.sort_by(|(_, a), (_, b)| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.first_seen.cmp(&b.first_seen))
        });
        entries
            .into_iter()
            .map(|(ext, c)| FileTypeCount {
                extension: ext.clone(),
                count: c.count,
            })
            .collect()
    }

    pub fn report(&self) -> StatsReport {
        StatsReport {
            total_files: self.total_files,
            total_dirs: self.total_dirs,
            total_size: self.total_size,
            max_depth_reached: self.max_depth,
            scan_time_secs: (self.elapsed_secs() * 100.0).round() / 100.0,
            file_types: self.file_types(),
        }
    }

    /// Render the text summary, with ANSI colors when `use_colors` is set.
    pub fn summary(&self, use_colors: bool) -> String {
        let result = if use_colors {
            let mut out = Ansi::new(Vec::new());
            self.write_summary(&mut out).map(|_| out.into_inner())
        } else {
            let mut out = NoColor::new(Vec::new());
            self.write_summary(&mut out).map(|_| out.into_inner())
        };
        match result {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                log::error!("failed to render statistics summary: {e}");
                String::new()
            }
        }
    }

    pub fn write_summary<W: WriteColor>(&self, out: &mut W) -> io::Result<()> {
        let mut bold = ColorSpec::new();
        bold.set_bold(true);
        let mut label = ColorSpec::new();
        label.set_fg(Some(Color::Blue));
        let mut ext = ColorSpec::new();
        ext.set_fg(Some(Color::Yellow));

        let rule = "─".repeat(RULE_WIDTH);

        writeln!(out)?;
        write_styled(out, &bold, "Directory Summary")?;
        writeln!(out)?;
        write_styled(out, &bold, &rule)?;
        writeln!(out)?;

        let rows = [
            ("Total Files:", self.total_files.to_string()),
            ("Total Directories:", self.total_dirs.to_string()),
            ("Total Size:", format_size_compact(self.total_size)),
            ("Max Depth:", format!("{} levels", self.max_depth)),
            ("Scan Time:", format!("{:.2}s", self.elapsed_secs())),
        ];
        for (name, value) in rows {
            write_styled(out, &label, name)?;
            writeln!(out, " {}", value)?;
        }

        writeln!(out)?;
        write_styled(out, &bold, "File Types")?;
        writeln!(out)?;
        write_styled(out, &bold, &rule)?;
        writeln!(out)?;

        for entry in self.file_types() {
            write_styled(out, &ext, &format!("{:<15}", entry.extension))?;
            writeln!(out, " {} files", entry.count)?;
        }

        Ok(())
    }
}

fn write_styled<W: WriteColor>(out: &mut W, spec: &ColorSpec, text: &str) -> io::Result<()> {
    out.set_color(spec)?;
    write!(out, "{}", text)?;
    out.reset()
}
