//! Tree rendering and export
//!
//! - `render` - wraps a built tree in its format envelope
//! - `json` - the JSON envelope
//! - `export` - the file sink (`.md`, `.txt`, `.json`, `.html`)
//! - `utils` - ANSI color helpers

mod export;
mod json;
mod render;
mod utils;

pub use export::{ExportKind, export, export_contents, export_file_name, html_page, write_atomic};
pub use json::{JsonReport, print_json};
pub use render::{MARKDOWN_HEADER, RenderedOutput, render};
pub use utils::{paint, paint_directory};
