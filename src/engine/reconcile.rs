//! Manifest reconciliation
//!
//! Runs once, after inheritance, and turns classifications into verdicts:
//! - a single trivial tag passes on its own; inherited `Empty~` and
//!   `Ignore~` are not trivial, inherited `Apache~` is
//! - anything else passes only if the manifest documents the file;
//!   otherwise every non-trivial tag gets the undocumented marker, and in a
//!   collision `Apache` is marked as well
//! - error tags are always marked
//! - files still empty try the kind fallback, then become `Unknown!`
//! - the file's own `Ignore` suppresses it entirely
//! - manifest entries matching no scanned file are orphans and always fail

use super::kind::file_kind;
use super::store::ClassificationMap;
use super::FileVerdict;
use crate::license::{Classification, LicenseTag, APACHE};
use crate::policy::Manifest;

/// Output of the reconciliation pass
#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    /// One verdict per scanned file, sorted by path
    pub files: Vec<FileVerdict>,
    /// Manifest entries with no matching file, sorted
    pub orphaned: Vec<String>,
    pub failed: bool,
}

/// Apply undocumented markers to one classification
pub fn mark(path: &str, classification: &mut Classification, manifest: &Manifest) {
    if classification.is_empty() {
        return;
    }

    let single_trivial = classification.len() == 1 && classification.tags()[0].is_trivial();
    let satisfied = single_trivial || manifest.documents(path, classification);
    let conflicted = classification.is_conflicted();

    for tag in classification.tags_mut() {
        let needs_entry = !tag.is_trivial() || (conflicted && tag.is(APACHE));
        if tag.is_error() || (!satisfied && needs_entry) {
            tag.mark_undocumented();
        }
    }
}

/// Reconcile every classification against the manifest
pub fn reconcile(mut files: ClassificationMap, manifest: &Manifest) -> Reconciliation {
    for (path, classification) in files.iter_mut() {
        mark(path, classification, manifest);
    }

    for (path, classification) in files.iter_mut() {
        if classification.is_empty() {
            if let Some(kind) = file_kind(path) {
                classification.push(LicenseTag::new(kind.tag()));
            }
        }
    }

    let orphaned = manifest.orphaned(files.keys().map(String::as_str));
    for orphan in &orphaned {
        tracing::warn!("Manifest entry matches no file: {}", orphan);
    }

    let mut failed = !orphaned.is_empty();
    let verdicts: Vec<FileVerdict> = files
        .into_iter()
        .map(|(path, classification)| {
            let verdict = verdict(path, classification);
            failed |= verdict.failed;
            verdict
        })
        .collect();

    Reconciliation {
        files: verdicts,
        orphaned,
        failed,
    }
}

fn verdict(path: String, classification: Classification) -> FileVerdict {
    let ignored = classification.is_suppressed();
    let unknown = classification.is_empty();
    let rendered = if unknown {
        "Unknown!".to_string()
    } else {
        classification.render()
    };
    let failed = !ignored && (unknown || classification.has_undocumented());

    FileVerdict {
        path,
        tags: classification.tags().to_vec(),
        rendered,
        unknown,
        ignored,
        failed,
    }
}
