//! Sibling ordering strategies

use std::cmp::{Ordering, Reverse};
use std::collections::HashMap;

use super::config::SortStrategy;
use super::metadata::EntryMetadata;
use super::utils::{compare_names, extension_of};

/// Order sibling names by `strategy`.
///
/// Pure and deterministic: every strategy falls back to [`compare_names`] on
/// ties, so the result is a permutation of `names` and sorting it again is a
/// no-op. Names missing from `metadata` count as files of unknown size, which
/// sort after every sized entry under [`SortStrategy::Size`].
pub fn order(
    names: &[String],
    strategy: SortStrategy,
    metadata: &HashMap<String, EntryMetadata>,
) -> Vec<String> {
    let mut sorted = names.to_vec();
    sorted.sort_by(|a, b| compare(a, b, strategy, metadata));
    sorted
}

fn compare(
    a: &str,
    b: &str,
    strategy: SortStrategy,
    metadata: &HashMap<String, EntryMetadata>,
) -> Ordering {
    let primary = match strategy {
        SortStrategy::Name => Ordering::Equal,
        SortStrategy::DirectoryFirst | SortStrategy::Type => {
            let is_dir = |name: &str| metadata.get(name).is_some_and(|m| m.is_dir);
            is_dir(b).cmp(&is_dir(a))
        }
        SortStrategy::Size => {
            let size = |name: &str| Reverse(metadata.get(name).map(|m| m.size));
            size(a).cmp(&size(b))
        }
        SortStrategy::Extension => {
            let ext = |name: &str| extension_of(name).unwrap_or_default();
            ext(a).cmp(&ext(b))
        }
    };
    primary.then_with(|| compare_names(a, b))
}
