//! JSON output formatting

use std::io;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::stats::StatsReport;
use crate::tree::Configuration;

/// Envelope for the `json` format.
///
/// `tree` holds the same lines the text formats produce; statistics are only
/// included here in structured form, never as a text summary inside `tree`.
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    pub generated: DateTime<Utc>,
    pub config: Configuration,
    pub tree: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatsReport>,
}

impl JsonReport {
    pub fn to_pretty_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Print a report as pretty-printed JSON to stdout.
pub fn print_json(report: &JsonReport) -> io::Result<()> {
    let json =
        serde_json::to_string_pretty(report).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    println!("{}", json);
    Ok(())
}
