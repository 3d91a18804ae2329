//! # licaudit — per-file license audit for source trees
//!
//! Classifies every file in a repository by the license boilerplate it
//! carries and checks the result against the project's declared manifest.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                        AuditEngine                         │
//! │  ┌──────────┐  ┌───────────────────────────────────────┐   │
//! │  │FileIndex │─▶│ worker pool (rayon), one task per file │   │
//! │  │(1-pass)  │  │  Tokens ─[bounded queue]─▶ Matcher     │   │
//! │  └──────────┘  │  override ∪ detection → Uniq → Collide │   │
//! │                └──────────────────┬────────────────────┘   │
//! │                                   ▼                        │
//! │                     ClassificationTable (Mutex)            │
//! │                                   │  barrier               │
//! │                                   ▼                        │
//! │          Inheritance (~) → Reconcile vs Manifest (!)       │
//! │                                   │                        │
//! │                                   ▼                        │
//! │                   AuditReport → text / JSON                │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tags stay structured (name + inferred + undocumented) until the report
//! renders them as `MIT~!`.

pub mod detection;
pub mod engine;
pub mod license;
pub mod policy;
pub mod report;

// Re-exports for convenience
pub use detection::{identify_licenses, SignatureMatcher, Tokens};
pub use engine::{AuditConfig, AuditEngine, AuditReport, FileVerdict};
pub use license::{Classification, LicenseTag, SignatureSet};
pub use policy::{Manifest, Policy, PolicyConfig};
pub use report::{render_report, write_report, ReportFormat};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Signature compilation failed: {0}")]
    Signature(#[from] aho_corasick::BuildError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No repository root (.git) found above {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Worker pool error: {0}")]
    ThreadPool(String),
}

pub type AuditResult<T> = Result<T, AuditError>;
