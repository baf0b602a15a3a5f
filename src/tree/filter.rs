//! Exclusion patterns for dropping entries by name

use std::fmt;
use std::str::FromStr;

use glob::Pattern;
use regex::Regex;
use serde::{Serialize, Serializer};

use crate::error::PoplrError;

/// Names excluded when nothing else is configured.
pub const DEFAULT_EXCLUDES: [&str; 3] = ["node_modules", ".git", ".DS_Store"];

/// A literal name or a compiled matcher tested against an entry's bare name.
///
/// Parsed from text: `/expr/` is a regular expression (matches anywhere in the
/// name), text containing `*`, `?` or `[` is a glob (matches the whole name),
/// anything else must equal the name exactly.
#[derive(Debug, Clone)]
pub enum ExclusionPattern {
    Literal(String),
    Glob(Pattern),
    Regex(Regex),
}

impl ExclusionPattern {
    pub fn defaults() -> Vec<Self> {
        DEFAULT_EXCLUDES
            .iter()
            .map(|name| ExclusionPattern::Literal(name.to_string()))
            .collect()
    }

    /// Compile a list of pattern strings, failing on the first malformed one.
    pub fn parse_all<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Self>, PoplrError> {
        patterns.iter().map(|p| p.as_ref().parse()).collect()
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            ExclusionPattern::Literal(literal) => literal == name,
            ExclusionPattern::Glob(pattern) => pattern.matches(name),
            ExclusionPattern::Regex(regex) => regex.is_match(name),
        }
    }
}

impl FromStr for ExclusionPattern {
    type Err = PoplrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() >= 2 && s.starts_with('/') && s.ends_with('/') {
            let expr = &s[1..s.len() - 1];
            return Regex::new(expr)
                .map(ExclusionPattern::Regex)
                .map_err(|e| PoplrError::InvalidConfiguration {
                    field: "exclude pattern",
                    value: s.to_string(),
                    expected: format!("a valid regular expression ({e})"),
                });
        }

        if s.contains(['*', '?', '[']) {
            return Pattern::new(s)
                .map(ExclusionPattern::Glob)
                .map_err(|e| PoplrError::InvalidConfiguration {
                    field: "exclude pattern",
                    value: s.to_string(),
                    expected: format!("a valid glob ({e})"),
                });
        }

        Ok(ExclusionPattern::Literal(s.to_string()))
    }
}

impl fmt::Display for ExclusionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionPattern::Literal(literal) => f.write_str(literal),
            ExclusionPattern::Glob(pattern) => f.write_str(pattern.as_str()),
            ExclusionPattern::Regex(regex) => write!(f, "/{}/", regex.as_str()),
        }
    }
}

impl Serialize for ExclusionPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
