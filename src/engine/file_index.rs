//! Single-pass file indexing
//!
//! Walks the tree once and keeps every file that should be classified.
//! Directories and symlinks are skipped, `.git` is pruned, and ignore
//! globs are matched against the `/`-separated path relative to the root.

use crate::{AuditError, AuditResult};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One entry produced by the walk, before filtering
#[derive(Debug, Clone)]
pub struct WalkEntry {
    /// Path relative to the root, `/`-separated
    pub path: String,
    pub size: u64,
    pub is_dir: bool,
    pub is_symlink: bool,
}

/// A file selected for classification
#[derive(Debug, Clone)]
pub struct IndexedFile {
    /// Path relative to the root, `/`-separated; the table key
    pub path: String,
    /// Absolute (root-joined) path used to open the file
    pub abs_path: PathBuf,
    pub size: u64,
}

/// Compiled ignore globs
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    set: GlobSet,
}

impl IgnoreMatcher {
    pub fn new(patterns: &[String]) -> AuditResult<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| {
                AuditError::Config(format!("invalid ignore pattern '{}': {}", pattern, e))
            })?;
            builder.add(glob);
        }
        let set = builder
            .build()
            .map_err(|e| AuditError::Config(format!("invalid ignore patterns: {}", e)))?;
        Ok(Self { set })
    }

    pub fn none() -> Self {
        Self {
            set: GlobSet::empty(),
        }
    }

    pub fn is_ignored(&self, rel_path: &str) -> bool {
        self.set.is_match(rel_path)
    }
}

/// Every file of a scan target that gets a classification
#[derive(Debug, Clone)]
pub struct FileIndex {
    pub files: Vec<IndexedFile>,
    pub skipped: usize,
    pub total_bytes: u64,
}

/// Every entry below `root` (root excluded), sorted by name, `.git` pruned,
/// symlinks not followed
pub fn walk(root: &Path) -> impl Iterator<Item = AuditResult<WalkEntry>> + '_ {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git")
        .map(move |entry| {
            let entry = entry?;
            let file_type = entry.file_type();
            let size = if file_type.is_file() {
                entry.metadata()?.len()
            } else {
                0
            };
            Ok(WalkEntry {
                path: relative_path(root, entry.path()),
                size,
                is_dir: file_type.is_dir(),
                is_symlink: file_type.is_symlink(),
            })
        })
}

impl FileIndex {
    /// Walk the directory tree once and build the index
    pub fn build(root: &Path, ignore: &IgnoreMatcher) -> AuditResult<Self> {
        let mut files = Vec::new();
        let mut skipped = 0usize;
        let mut total_bytes = 0u64;

        for entry in walk(root) {
            let entry = entry?;
            if entry.is_dir || entry.is_symlink {
                continue;
            }
            if ignore.is_ignored(&entry.path) {
                tracing::debug!("Ignoring {}", entry.path);
                skipped += 1;
                continue;
            }

            total_bytes += entry.size;
            files.push(IndexedFile {
                abs_path: root.join(&entry.path),
                path: entry.path,
                size: entry.size,
            });
        }

        tracing::info!(
            "FileIndex: {} files, {:.1} MB, {} ignored",
            files.len(),
            total_bytes as f64 / 1_048_576.0,
            skipped
        );

        Ok(Self {
            files,
            skipped,
            total_bytes,
        })
    }

    pub fn total_files(&self) -> usize {
        self.files.len()
    }
}

/// `/`-separated path of `path` relative to `root`
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
