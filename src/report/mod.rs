//! Report generation: text and JSON output
//!
//! Renders an `AuditReport`. The text form is the fixed-width table
//! maintainers read in CI logs; JSON is for tooling.

pub mod json;
pub mod text;

use crate::engine::AuditReport;
use crate::AuditResult;
use std::path::Path;

/// Output format for the audit report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// One aligned row per file
    Text,
    /// Structured JSON (machine-readable)
    Json,
}

/// What the text renderer prints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Only print failing rows
    pub quiet: bool,
}

/// Write a report in the specified format
pub fn write_report(
    report: &AuditReport,
    format: ReportFormat,
    options: RenderOptions,
    output: &Path,
) -> AuditResult<()> {
    let content = render_report(report, format, options)?;
    std::fs::write(output, content)?;
    Ok(())
}

/// Render a report to a string
pub fn render_report(
    report: &AuditReport,
    format: ReportFormat,
    options: RenderOptions,
) -> AuditResult<String> {
    match format {
        ReportFormat::Text => Ok(text::render(report, options)),
        ReportFormat::Json => json::render(report),
    }
}

/// Process exit status for a finished audit
pub fn exit_code(report: &AuditReport) -> u8 {
    if report.failed {
        1
    } else {
        0
    }
}
