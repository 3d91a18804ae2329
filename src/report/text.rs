//! Fixed-width text report
//!
//! One row per file: a 6-wide status column (`Error` or blank), the tags
//! right-aligned in 40 columns, then the path. Ignored files never appear.
//! Orphaned manifest entries are listed last as `Extra-License!`.

use super::RenderOptions;
use crate::engine::AuditReport;
use std::fmt::Write;

fn row(out: &mut String, status: &str, tags: &str, path: &str) {
    let _ = writeln!(out, "{:<6}{:>40} {}", status, tags, path);
}

pub fn render(report: &AuditReport, options: RenderOptions) -> String {
    let mut out = String::new();

    for verdict in report.files.iter().filter(|v| !v.ignored) {
        if verdict.failed {
            row(&mut out, "Error", &verdict.rendered, &verdict.path);
        } else if !options.quiet {
            row(&mut out, "", &verdict.rendered, &verdict.path);
        }
    }

    for extra in &report.orphaned {
        row(&mut out, "Error", "Extra-License!", extra);
    }

    out
}
