//! Wraps a generated body in its format-specific envelope

use std::io;

use chrono::Utc;

use crate::error::Result;
use crate::stats::Statistics;
use crate::tree::{Configuration, OutputFormat};

use super::json::{JsonReport, print_json};

pub const MARKDOWN_HEADER: &str = "## Directory Structure\n\n";

/// Final artifact of a tree generation.
#[derive(Debug, Clone)]
pub enum RenderedOutput {
    Text(String),
    Json(JsonReport),
}

impl RenderedOutput {
    /// Text as printed or written to disk; JSON is pretty printed.
    pub fn to_text(&self) -> Result<String> {
        match self {
            RenderedOutput::Text(text) => Ok(text.clone()),
            RenderedOutput::Json(report) => report.to_pretty_string(),
        }
    }

    pub fn print(&self) -> io::Result<()> {
        match self {
            RenderedOutput::Text(text) => {
                println!("{}", text);
                Ok(())
            }
            RenderedOutput::Json(report) => print_json(report),
        }
    }
}

/// Wrap `body` for `config.format`. Pure formatting, no I/O.
///
/// Text formats get the statistics summary appended when enabled; markdown
/// additionally gets a section header. JSON carries statistics only in
/// structured form.
pub fn render(body: String, config: &Configuration, stats: &Statistics) -> RenderedOutput {
    if config.format == OutputFormat::Json {
        let config = Configuration {
            use_colors: config.colorize(),
            ..config.clone()
        };
        return RenderedOutput::Json(JsonReport {
            generated: Utc::now(),
            stats: config.show_stats.then(|| stats.report()),
            config,
            tree: body,
        });
    }

    let mut text = body;
    if config.show_stats {
        text.push('\n');
        text.push_str(&stats.summary(config.colorize()));
    }

    match config.format {
        OutputFormat::Markdown => RenderedOutput::Text(format!("{}{}", MARKDOWN_HEADER, text)),
        _ => RenderedOutput::Text(text),
    }
}
