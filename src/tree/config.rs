//! Configuration types for tree generation

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::PoplrError;

use super::filter::ExclusionPattern;
use super::symbols::FileTypes;

/// Output format of a generated tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Ascii,
    Markdown,
    Json,
    Console,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 4] = ["ascii", "markdown", "json", "console"];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Ascii => "ascii",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Json => "json",
            OutputFormat::Console => "console",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = PoplrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascii" => Ok(OutputFormat::Ascii),
            "markdown" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            "console" => Ok(OutputFormat::Console),
            other => Err(PoplrError::invalid("format", other, &Self::NAMES)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering policy applied to sibling entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortStrategy {
    Name,
    #[default]
    DirectoryFirst,
    /// Same ordering as `DirectoryFirst`.
    Type,
    Size,
    Extension,
}

impl SortStrategy {
    pub const NAMES: [&'static str; 5] = ["name", "type", "size", "extension", "directory-first"];

    pub fn as_str(self) -> &'static str {
        match self {
            SortStrategy::Name => "name",
            SortStrategy::DirectoryFirst => "directory-first",
            SortStrategy::Type => "type",
            SortStrategy::Size => "size",
            SortStrategy::Extension => "extension",
        }
    }
}

impl FromStr for SortStrategy {
    type Err = PoplrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortStrategy::Name),
            "directory-first" => Ok(SortStrategy::DirectoryFirst),
            "type" => Ok(SortStrategy::Type),
            "size" => Ok(SortStrategy::Size),
            "extension" => Ok(SortStrategy::Extension),
            other => Err(PoplrError::invalid("sort type", other, &Self::NAMES)),
        }
    }
}

impl fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Traversal and formatting options, resolved once per invocation.
///
/// Invalid formats and sort strategies are rejected while parsing
/// (see [`OutputFormat::from_str`] and [`SortStrategy::from_str`]), so a
/// `Configuration` value is always valid. It is only ever read by the builder
/// and renderer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub format: OutputFormat,
    /// `None` descends without limit.
    pub max_depth: Option<usize>,
    pub show_size: bool,
    pub full_path: bool,
    pub show_root: bool,
    pub fancy: bool,
    pub exclude: Vec<ExclusionPattern>,
    /// Only honored for [`OutputFormat::Console`], see [`Configuration::colorize`].
    pub use_colors: bool,
    pub show_stats: bool,
    pub use_icons: bool,
    pub sort_by: SortStrategy,
    #[serde(skip)]
    pub file_types: FileTypes,
}

impl Configuration {
    /// Whether output should carry ANSI colors.
    pub fn colorize(&self) -> bool {
        self.use_colors && self.format == OutputFormat::Console
    }

    /// An entry is dropped if any exclusion pattern matches its name.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|pattern| pattern.matches(name))
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            max_depth: None,
            show_size: false,
            full_path: false,
            show_root: false,
            fancy: true,
            exclude: ExclusionPattern::defaults(),
            use_colors: false,
            show_stats: false,
            use_icons: false,
            sort_by: SortStrategy::default(),
            file_types: FileTypes::default(),
        }
    }
}
