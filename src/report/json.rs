//! JSON report renderer

use crate::engine::AuditReport;
use crate::AuditResult;

/// Render an audit report as pretty-printed JSON
pub fn render(report: &AuditReport) -> AuditResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
