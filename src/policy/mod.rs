//! Project policy: `.licaudit.toml` configuration
//!
//! Holds everything the scan reads but never writes: ignore globs, the
//! override table, documented manifest entries, extra signatures and the
//! worker cap. Loaded once before any worker starts.

pub mod manifest;

pub use manifest::{DocumentedEntry, Manifest};

use crate::engine::file_index::IgnoreMatcher;
use crate::license::{LicenseTag, SignatureSet};
use crate::{AuditError, AuditResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Config file names looked up at the project root, in order
pub const CONFIG_FILE_NAMES: [&str; 2] = [".licaudit.toml", "licaudit.toml"];

/// Project-level configuration (loaded from `.licaudit.toml`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Glob patterns (relative, `/`-separated) excluded from the scan
    #[serde(default = "default_ignore_paths")]
    pub ignore_paths: Vec<String>,

    /// Root-relative file whose `@path` lines are manifest entries
    #[serde(default = "default_license_manifest")]
    pub license_manifest: Option<String>,

    /// Worker count; defaults to available parallelism
    #[serde(default)]
    pub workers: Option<usize>,

    /// Whether the built-in signature corpus is used
    #[serde(default = "default_true")]
    pub builtin_signatures: bool,

    /// Forced tags per path
    #[serde(default, rename = "override")]
    pub overrides: Vec<PathOverride>,

    /// Manifest entries
    #[serde(default)]
    pub documented: Vec<DocumentedEntry>,

    /// Extra license phrases
    #[serde(default, rename = "signature")]
    pub signatures: Vec<SignatureEntry>,
}

fn default_ignore_paths() -> Vec<String> {
    vec!["target/**".into()]
}
fn default_license_manifest() -> Option<String> {
    Some("LICENSE".into())
}
fn default_true() -> bool {
    true
}

/// Manually forced classification for one file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathOverride {
    pub path: String,
    pub licenses: Vec<String>,
    /// Reason for the override (for audit trail)
    #[serde(default)]
    pub reason: Option<String>,
}

/// An extra signature phrase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureEntry {
    pub license: String,
    pub phrase: String,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            ignore_paths: default_ignore_paths(),
            license_manifest: default_license_manifest(),
            workers: None,
            builtin_signatures: true,
            overrides: vec![],
            documented: vec![],
            signatures: vec![],
        }
    }
}

/// Policy compiled for a scan
#[derive(Debug, Clone)]
pub struct Policy {
    config: PolicyConfig,
    overrides: HashMap<String, Vec<LicenseTag>>,
    ignore: IgnoreMatcher,
}

impl Policy {
    /// Load policy from a config file
    pub fn from_file(path: &Path) -> AuditResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AuditError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config: PolicyConfig = toml::from_str(&content).map_err(|e| {
            AuditError::Config(format!("failed to parse {}: {}", path.display(), e))
        })?;
        tracing::info!("Loaded policy from {}", path.display());
        Self::new(config)
    }

    /// Load the config at the project root, or defaults if there is none
    pub fn from_project_root(root: &Path) -> AuditResult<Self> {
        for name in CONFIG_FILE_NAMES {
            let path = root.join(name);
            if path.is_file() {
                return Self::from_file(&path);
            }
        }
        tracing::debug!("No policy file under {}, using defaults", root.display());
        Self::new(PolicyConfig::default())
    }

    pub fn new(config: PolicyConfig) -> AuditResult<Self> {
        let ignore = IgnoreMatcher::new(&config.ignore_paths)?;
        let mut overrides: HashMap<String, Vec<LicenseTag>> = HashMap::new();
        for ovr in &config.overrides {
            let path = ovr.path.trim_start_matches("./").to_string();
            overrides
                .entry(path)
                .or_default()
                .extend(ovr.licenses.iter().map(LicenseTag::new));
        }

        Ok(Self {
            config,
            overrides,
            ignore,
        })
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    pub fn ignore(&self) -> &IgnoreMatcher {
        &self.ignore
    }

    /// Forced tags for a path (empty if none)
    pub fn overrides_for(&self, path: &str) -> &[LicenseTag] {
        self.overrides.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Built-in corpus (unless disabled) plus configured phrases
    pub fn signatures(&self) -> SignatureSet {
        let mut set = if self.config.builtin_signatures {
            SignatureSet::builtin()
        } else {
            SignatureSet::new()
        };
        for entry in &self.config.signatures {
            set.add(entry.license.clone(), &entry.phrase);
        }
        set
    }

    /// Manifest from config entries plus the license file's `@path` lines
    pub fn manifest(&self, root: &Path) -> AuditResult<Manifest> {
        let mut manifest = Manifest::new(self.config.documented.iter().cloned());

        // `license_manifest = ""` turns the license-file lookup off
        let name = self.config.license_manifest.as_deref().filter(|n| !n.is_empty());
        if let Some(name) = name {
            let path = root.join(name);
            match std::fs::read(&path) {
                Ok(bytes) => {
                    let entries = Manifest::parse_license_file(&String::from_utf8_lossy(&bytes));
                    tracing::debug!("{} manifest entries in {}", entries.len(), path.display());
                    manifest.extend(entries);
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::debug!("No license manifest at {}", path.display());
                }
                Err(e) => return Err(AuditError::Io(e)),
            }
        }

        Ok(manifest)
    }
}
