//! Branch glyphs and file type icons

use serde::{Deserialize, Serialize};

use super::config::OutputFormat;
use super::utils::extension_of;

/// Glyphs used to draw one level of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbols {
    pub pipe: &'static str,
    pub branch: &'static str,
    pub last: &'static str,
    pub indent: &'static str,
}

impl Symbols {
    pub const FANCY: Symbols = Symbols {
        pipe: "│",
        branch: "├──",
        last: "└──",
        indent: "    ",
    };

    pub const PLAIN: Symbols = Symbols {
        pipe: "|",
        branch: "|--",
        last: "`--",
        indent: "    ",
    };

    pub const MARKDOWN: Symbols = Symbols {
        pipe: "  ",
        branch: "*",
        last: "*",
        indent: "  ",
    };

    /// Markdown ignores the fancy flag.
    pub fn for_format(format: OutputFormat, fancy: bool) -> Self {
        match format {
            OutputFormat::Markdown => Self::MARKDOWN,
            _ if fancy => Self::FANCY,
            _ => Self::PLAIN,
        }
    }

    /// The glyph drawn in front of an entry.
    pub fn connector(&self, is_last: bool) -> &'static str {
        if is_last { self.last } else { self.branch }
    }

    /// Calculate the prefix for the children of an entry.
    pub fn child_prefix(&self, format: OutputFormat, prefix: &str, is_last: bool) -> String {
        if format == OutputFormat::Markdown || is_last {
            format!("{}{}", prefix, self.indent)
        } else {
            format!("{}{}   ", prefix, self.pipe)
        }
    }
}

/// Coarse classification used to pick an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Directory,
    Image,
    Video,
    Audio,
    Archive,
    Pdf,
    Code,
    Default,
}

impl FileKind {
    pub fn icon(self) -> &'static str {
        match self {
            FileKind::Directory => "📁",
            FileKind::Image => "🖼️",
            FileKind::Video => "🎥",
            FileKind::Audio => "🎵",
            FileKind::Archive => "📦",
            FileKind::Pdf => "📕",
            FileKind::Code => "💻",
            FileKind::Default => "📄",
        }
    }
}

/// Extension lists (with leading dot) for each icon class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTypes {
    pub image: Vec<String>,
    pub video: Vec<String>,
    pub audio: Vec<String>,
    pub archive: Vec<String>,
    pub pdf: Vec<String>,
    pub code: Vec<String>,
}

impl FileTypes {
    /// Classify a file by extension; first matching class wins.
    pub fn classify(&self, name: &str) -> FileKind {
        let Some(ext) = extension_of(name) else {
            return FileKind::Default;
        };
        let dotted = format!(".{ext}");
        let classes = [
            (&self.image, FileKind::Image),
            (&self.video, FileKind::Video),
            (&self.audio, FileKind::Audio),
            (&self.archive, FileKind::Archive),
            (&self.pdf, FileKind::Pdf),
            (&self.code, FileKind::Code),
        ];
        classes
            .into_iter()
            .find(|(exts, _)| exts.iter().any(|e| e.eq_ignore_ascii_case(&dotted)))
            .map_or(FileKind::Default, |(_, kind)| kind)
    }

    /// Directories always get the directory icon regardless of their name.
    pub fn icon(&self, name: &str, is_dir: bool) -> &'static str {
        if is_dir {
            FileKind::Directory.icon()
        } else {
            self.classify(name).icon()
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for FileTypes {
    fn default() -> Self {
        Self {
            image: strings(&[".jpg", ".jpeg", ".png", ".gif", ".svg", ".webp"]),
            video: strings(&[".mp4", ".mov", ".avi", ".mkv", ".webm"]),
            audio: strings(&[".mp3", ".wav", ".ogg", ".m4a"]),
            archive: strings(&[".zip", ".rar", ".7z", ".tar", ".gz"]),
            pdf: strings(&[".pdf"]),
            code: strings(&[
                ".js", ".ts", ".py", ".java", ".cpp", ".html", ".css", ".json", ".xml",
            ]),
        }
    }
}
