use super::summary::Summary;
use crate::error::AnalyzeError;
use serde::Deserialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented, one field per line.
    #[default]
    Pretty,
    /// A single line.
    Compact,
}

pub fn render_summary(summary: &Summary, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(summary),
        OutputFormat::Compact => serde_json::to_string(summary),
    }
}

/// Serialize the summary followed by a newline, then flush.
pub fn write_summary<W: Write>(
    mut out: W,
    summary: &Summary,
    format: OutputFormat,
) -> Result<(), AnalyzeError> {
    let rendered = render_summary(summary, format).map_err(|e| AnalyzeError::Output(e.into()))?;

    writeln!(out, "{rendered}").map_err(AnalyzeError::Output)?;
    out.flush().map_err(AnalyzeError::Output)
}
