//! # Audit engine
//!
//! - `file_index` — single-pass directory walk with ignore globs
//! - `store` — the shared classification table
//! - `classifier` — per-file classification (runs on the worker pool)
//! - `inheritance` — directory license inheritance (sequential)
//! - `reconcile` — manifest cross-check and verdicts (sequential)
//! - `kind` — extension-based fallback for unclassified files
//! - `repo_root` — repository root discovery

pub mod classifier;
pub mod file_index;
pub mod inheritance;
pub mod kind;
pub mod reconcile;
pub mod repo_root;
pub mod store;

use crate::detection::SignatureMatcher;
use crate::license::LicenseTag;
use crate::policy::Policy;
use crate::{AuditError, AuditResult};
use file_index::FileIndex;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use store::ClassificationTable;

// ─── Configuration ─────────────────────────────────────────────────

/// Engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Worker threads; `None` uses the policy value, then available parallelism
    pub workers: Option<usize>,
}

// ─── Report ────────────────────────────────────────────────────────

/// Final verdict for one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileVerdict {
    pub path: String,
    pub tags: Vec<LicenseTag>,
    /// Tags as printed, e.g. `Apache, MIT~!` or `Unknown!`
    pub rendered: String,
    /// No tag, no inheritance, no kind
    pub unknown: bool,
    /// Carries `Ignore`; never printed, never fails
    pub ignored: bool,
    pub failed: bool,
}

/// Counters for one scan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanStats {
    pub files_scanned: usize,
    pub files_excluded: usize,
    pub files_inherited: usize,
    pub files_failed: usize,
    /// Distinct licenses the signature corpus can report
    pub licenses: usize,
    pub workers: usize,
    pub duration_ms: u64,
}

/// Complete audit result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub root: PathBuf,
    /// One entry per scanned file, sorted by path
    pub files: Vec<FileVerdict>,
    /// Manifest entries that match no scanned file
    pub orphaned: Vec<String>,
    pub failed: bool,
    pub stats: ScanStats,
    pub scanner_version: String,
}

// ─── Engine ────────────────────────────────────────────────────────

/// The license audit engine
pub struct AuditEngine {
    config: AuditConfig,
    policy: Policy,
    matcher: SignatureMatcher,
}

impl AuditEngine {
    pub fn new(config: AuditConfig, policy: Policy) -> AuditResult<Self> {
        let matcher = SignatureMatcher::new(&policy.signatures())?;
        Ok(Self {
            config,
            policy,
            matcher,
        })
    }

    /// Engine for `root` using the project's own policy file
    pub fn for_project(root: &Path, config: AuditConfig) -> AuditResult<Self> {
        Self::new(config, Policy::from_project_root(root)?)
    }

    fn worker_count(&self) -> usize {
        self.config
            .workers
            .or(self.policy.config().workers)
            .filter(|&n| n > 0)
            .unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(1)
            })
    }

    /// Scan the tree under `root` and reconcile it against the manifest
    pub fn audit(&self, root: &Path) -> AuditResult<AuditReport> {
        let start = std::time::Instant::now();
        tracing::info!("Auditing {}", root.display());

        let manifest = self.policy.manifest(root)?;
        let index = FileIndex::build(root, self.policy.ignore())?;
        let workers = self.worker_count();

        // ── Per-file classification on a bounded pool ──
        let table = ClassificationTable::new();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("licaudit-worker-{}", i))
            .build()
            .map_err(|e| AuditError::ThreadPool(e.to_string()))?;
        pool.install(|| {
            index.files.par_iter().for_each(|file| {
                classifier::classify_into(&table, file, &self.matcher, &self.policy);
            });
        });
        // every worker has joined here

        let mut files = table.into_inner();
        let inherited = inheritance::resolve(&mut files);
        let reconciled = reconcile::reconcile(files, &manifest);

        let stats = ScanStats {
            files_scanned: index.total_files(),
            files_excluded: index.skipped,
            files_inherited: inherited,
            files_failed: reconciled.files.iter().filter(|v| v.failed).count(),
            licenses: self.matcher.tag_count(),
            workers,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        tracing::info!(
            "Audit finished in {}ms: {} files, {} inherited, {} failing, {} orphaned",
            stats.duration_ms,
            stats.files_scanned,
            stats.files_inherited,
            stats.files_failed,
            reconciled.orphaned.len()
        );

        Ok(AuditReport {
            root: root.to_path_buf(),
            files: reconciled.files,
            orphaned: reconciled.orphaned,
            failed: reconciled.failed,
            stats,
            scanner_version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }
}
