//! Writing rendered trees to disk

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Local, SecondsFormat, Utc};
use tempfile::NamedTempFile;

use crate::error::{PoplrError, Result};
use crate::tree::OutputFormat;

use super::render::RenderedOutput;

const HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Directory Tree</title>
    <style>
        body {
            font-family: monospace;
            padding: 20px;
            background: #f5f5f5;
        }
        pre {
            background: white;
            padding: 20px;
            border-radius: 5px;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
            white-space: pre-wrap;
        }
        .header {
            color: #666;
            margin-bottom: 20px;
        }
    </style>
</head>
<body>
    <div class="header">
        <h1>Directory Tree</h1>
        <p>Generated: {{timestamp}}</p>
    </div>
    <pre>{{content}}</pre>
</body>
</html>
"#;

/// File type of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Markdown,
    Text,
    Json,
    Html,
}

impl ExportKind {
    pub const NAMES: [&'static str; 4] = ["md", "txt", "json", "html"];

    pub fn extension(self) -> &'static str {
        match self {
            ExportKind::Markdown => "md",
            ExportKind::Text => "txt",
            ExportKind::Json => "json",
            ExportKind::Html => "html",
        }
    }

    /// The tree format rendered for this kind of file.
    pub fn format(self) -> OutputFormat {
        match self {
            ExportKind::Markdown => OutputFormat::Markdown,
            ExportKind::Json => OutputFormat::Json,
            ExportKind::Text | ExportKind::Html => OutputFormat::Ascii,
        }
    }

    /// Kind used when only a default format is configured.
    pub fn for_format(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Markdown => ExportKind::Markdown,
            OutputFormat::Json => ExportKind::Json,
            OutputFormat::Ascii | OutputFormat::Console => ExportKind::Text,
        }
    }
}

impl FromStr for ExportKind {
    type Err = PoplrError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "md" => Ok(ExportKind::Markdown),
            "txt" => Ok(ExportKind::Text),
            "json" => Ok(ExportKind::Json),
            "html" => Ok(ExportKind::Html),
            other => Err(PoplrError::invalid("export format", other, &Self::NAMES)),
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// `tree-<timestamp>.<ext>` or `tree.<ext>`.
pub fn export_file_name(kind: ExportKind, timestamp: Option<DateTime<Utc>>) -> String {
    match timestamp {
        Some(ts) => {
            let stamp = ts
                .to_rfc3339_opts(SecondsFormat::Millis, true)
                .replace([':', '.'], "-");
            format!("tree-{}.{}", stamp, kind.extension())
        }
        None => format!("tree.{}", kind.extension()),
    }
}

/// Produce the file contents for `kind`.
pub fn export_contents(output: &RenderedOutput, kind: ExportKind) -> Result<String> {
    let text = output.to_text()?;
    if kind == ExportKind::Html {
        let generated = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        return Ok(html_page(&text, &generated));
    }
    Ok(text)
}

pub fn html_page(content: &str, generated: &str) -> String {
    HTML_TEMPLATE
        .replace("{{timestamp}}", generated)
        .replace("{{content}}", &escape_html(content))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Write `contents` to `path` in a single step: the data goes to a temporary
/// file in the same directory, which then replaces `path`.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let failure = |source| PoplrError::OutputWriteFailure {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(failure)?;
    tmp.write_all(contents.as_bytes()).map_err(failure)?;
    tmp.persist(path).map_err(|e| failure(e.error))?;
    Ok(())
}

/// Export `output` as `kind` into `dir`, returning the written path.
pub fn export(
    output: &RenderedOutput,
    kind: ExportKind,
    dir: &Path,
    timestamp: bool,
) -> Result<PathBuf> {
    let name = export_file_name(kind, timestamp.then(Utc::now));
    let path = dir.join(name);
    let contents = export_contents(output, kind)?;
    write_atomic(&path, &contents)?;
    log::info!("exported tree to {}", path.display());
    Ok(path)
}
