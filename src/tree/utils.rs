//! Shared utility functions for tree generation

use std::cmp::Ordering;
use std::path::{Component, Path, PathBuf};

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;

/// Lowercased extension of a name, without the dot.
/// Dotfiles such as `.bashrc` have no extension.
pub fn extension_of(name: impl AsRef<Path>) -> Option<String> {
    name.as_ref()
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
}

/// Collation-style name ordering.
///
/// Names are compared with accents folded and case ignored, with symbols and
/// punctuation before digits and digits before letters. Ties fall back to the
/// accented lowercase form and then to bytes, so `README` and `readme` still
/// have a fixed relative order and only identical names compare equal.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

fn collation_key(name: &str) -> Vec<(u8, char)> {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| {
            let class = if c.is_alphabetic() {
                2
            } else if c.is_numeric() {
                1
            } else {
                0
            };
            (class, c)
        })
        .collect()
}

/// Make `path` absolute and resolve `.` and `..` lexically, without
/// following symlinks.
pub fn normalize_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                } else if !normalized.has_root() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Get the name of a path, defaulting to "." for root
pub fn get_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| ".".to_string())
}

/// Format an entry size: bytes below 1KB, otherwise one decimal.
pub fn format_size(bytes: u64) -> String {
    if bytes >= GB {
        format!("{:.1}GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1}MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1}KB", bytes as f64 / KB as f64)
    } else {
        format!("{}B", bytes)
    }
}

/// Format a total size with up to two decimals and no trailing zeros.
pub fn format_size_compact(bytes: u64) -> String {
    let (value, unit) = if bytes >= GB {
        (bytes as f64 / GB as f64, "GB")
    } else if bytes >= MB {
        (bytes as f64 / MB as f64, "MB")
    } else if bytes >= KB {
        (bytes as f64 / KB as f64, "KB")
    } else {
        return format!("{}B", bytes);
    };

    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{}{}", trimmed, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("main.RS").as_deref(), Some("rs"));
        assert_eq!(extension_of("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(extension_of("Makefile"), None);
        assert_eq!(extension_of(".bashrc"), None);
        assert_eq!(extension_of("dir/file.Txt").as_deref(), Some("txt"));
    }

    #[test]
    fn test_compare_names() {
        assert_eq!(compare_names("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_names("Zeta", "alpha"), Ordering::Greater);
        assert_eq!(compare_names("README", "readme"), Ordering::Less);
        assert_eq!(compare_names("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_compare_names_folds_accents() {
        assert_eq!(compare_names("éclair", "zebra"), Ordering::Less);
        assert_eq!(compare_names("apple", "éclair"), Ordering::Less);
        assert_eq!(compare_names("Élan", "elan"), Ordering::Greater);
        assert_eq!(compare_names("eclair", "éclair"), Ordering::Less);
        assert_eq!(compare_names("Ångström", "angstrom"), Ordering::Greater);
    }

    #[test]
    fn test_compare_names_symbols_before_letters() {
        assert_eq!(compare_names("~notes", "apple"), Ordering::Less);
        assert_eq!(compare_names("a.b", "apple"), Ordering::Less);
        assert_eq!(compare_names("_build", "1st"), Ordering::Less);
        assert_eq!(compare_names("9lives", "alpha"), Ordering::Less);
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path(Path::new("/tmp/project/sub/..")),
            PathBuf::from("/tmp/project")
        );
        assert_eq!(
            normalize_path(Path::new("/tmp/project/./sub")),
            PathBuf::from("/tmp/project/sub")
        );
        assert_eq!(normalize_path(Path::new("/..")), PathBuf::from("/"));
        assert!(normalize_path(Path::new("relative/..")).is_absolute());
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(normalize_path(Path::new(".")), cwd);
    }

    #[test]
    fn test_get_name() {
        assert_eq!(get_name(Path::new("/tmp/project")), "project");
        assert_eq!(get_name(Path::new("/")), ".");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0B");
        assert_eq!(format_size(1023), "1023B");
        assert_eq!(format_size(1024), "1.0KB");
        assert_eq!(format_size(1536), "1.5KB");
        assert_eq!(format_size(5 * MB), "5.0MB");
        assert_eq!(format_size(3 * GB / 2), "1.5GB");
    }

    #[test]
    fn test_format_size_compact() {
        assert_eq!(format_size_compact(0), "0B");
        assert_eq!(format_size_compact(512), "512B");
        assert_eq!(format_size_compact(1024), "1KB");
        assert_eq!(format_size_compact(1536), "1.5KB");
        assert_eq!(format_size_compact(1280), "1.25KB");
        assert_eq!(format_size_compact(MB), "1MB");
    }
}
