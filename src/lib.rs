//! Poplr - a flexible directory tree generator
//!
//! Renders a directory as a console tree, ascii text, markdown or JSON, with
//! exclusion patterns, sorting, sizes, icons and summary statistics.

pub mod error;
pub mod output;
pub mod settings;
pub mod stats;
pub mod tree;

#[cfg(feature = "test-utils")]
pub mod test_utils;

use std::path::Path;

pub use error::{PoplrError, Result};
pub use output::{ExportKind, JsonReport, RenderedOutput, export, render};
pub use settings::Settings;
pub use stats::{Statistics, StatsReport};
pub use tree::{
    Configuration, ExclusionPattern, FileSystem, OsFileSystem, OutputFormat, SortStrategy,
    TreeBuilder, TreeOutput,
};

/// Build the tree for `root` and wrap it for `config.format`.
pub fn generate_tree(root: &Path, config: &Configuration) -> Result<RenderedOutput> {
    let TreeOutput { body, stats } = TreeBuilder::new(config.clone()).build(root)?;
    Ok(render(body, config, &stats))
}
