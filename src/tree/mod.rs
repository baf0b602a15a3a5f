//! Directory tree generation
//!
//! [`TreeBuilder`] walks one directory level at a time: list, drop excluded
//! names, resolve metadata (in parallel), sort, format, and recurse. The pieces
//! it delegates to live in their own modules:
//!
//! - `config` - [`Configuration`] and its option enums
//! - `filter` - exclusion patterns
//! - `fs` - the [`FileSystem`] provider and its `std::fs` implementation
//! - `metadata` - per-entry stat snapshots
//! - `sort` - sibling ordering
//! - `symbols` - branch glyphs and icons

mod builder;
mod config;
mod filter;
mod fs;
mod metadata;
mod sort;
mod symbols;
mod utils;

pub use builder::{TreeBuilder, TreeOutput};
pub use config::{Configuration, OutputFormat, SortStrategy};
pub use filter::{DEFAULT_EXCLUDES, ExclusionPattern};
pub use fs::{EntryStat, FileSystem, OsFileSystem};
pub use metadata::{EntryMetadata, resolve as resolve_metadata};
pub use sort::order;
pub use symbols::{FileKind, FileTypes, Symbols};
pub use utils::{
    compare_names, extension_of, format_size, format_size_compact, get_name, normalize_path,
};
