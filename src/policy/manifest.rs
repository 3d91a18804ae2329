//! Documented-license manifest
//!
//! Declares which paths are expected to carry a non-trivial license. Entries
//! come from `[[documented]]` tables in the config and from `@path` lines in
//! the project's license file. An entry ending in `/` covers everything
//! beneath that directory.

use crate::license::Classification;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One declared path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentedEntry {
    pub path: String,
    /// When non-empty, the file's tag names must equal this set
    #[serde(default)]
    pub licenses: Vec<String>,
    /// Why the entry exists (audit trail only)
    #[serde(default)]
    pub reason: Option<String>,
}

impl DocumentedEntry {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: normalize_entry_path(&path.into()),
            licenses: Vec::new(),
            reason: None,
        }
    }

    pub fn with_licenses<I, S>(mut self, licenses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.licenses = licenses.into_iter().map(Into::into).collect();
        self
    }

    fn is_directory(&self) -> bool {
        self.path.ends_with('/')
    }

    /// Whether this entry names `path`
    pub fn covers(&self, path: &str) -> bool {
        if self.is_directory() {
            path.starts_with(&self.path)
        } else {
            path == self.path
        }
    }

    fn accepts(&self, classification: &Classification) -> bool {
        if self.licenses.is_empty() {
            return true;
        }
        let expected: BTreeSet<&str> = self.licenses.iter().map(String::as_str).collect();
        let actual: BTreeSet<&str> = classification.names().collect();
        expected == actual
    }
}

fn normalize_entry_path(path: &str) -> String {
    path.trim().trim_start_matches("./").to_string()
}

/// The documented ledger
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    entries: Vec<DocumentedEntry>,
}

impl Manifest {
    pub fn new(entries: impl IntoIterator<Item = DocumentedEntry>) -> Self {
        let mut manifest = Self::default();
        manifest.extend(entries);
        manifest
    }

    /// Add entries, skipping exact duplicates
    pub fn extend(&mut self, entries: impl IntoIterator<Item = DocumentedEntry>) {
        for mut entry in entries {
            entry.path = normalize_entry_path(&entry.path);
            if entry.path.is_empty() {
                continue;
            }
            if !self.entries.contains(&entry) {
                self.entries.push(entry);
            }
        }
    }

    /// Extract `@path` lines from a license file body
    pub fn parse_license_file(text: &str) -> Vec<DocumentedEntry> {
        text.lines()
            .filter_map(|line| line.trim().strip_prefix('@'))
            .filter_map(|rest| rest.split_whitespace().next())
            .map(DocumentedEntry::new)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether some entry documents this file with its current tags
    pub fn documents(&self, path: &str, classification: &Classification) -> bool {
        self.entries
            .iter()
            .any(|e| e.covers(path) && e.accepts(classification))
    }

    /// Entry paths that match none of the scanned files, sorted
    pub fn orphaned<'a, I>(&self, scanned: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let scanned: Vec<&str> = scanned.into_iter().collect();
        let orphans: BTreeSet<&str> = self
            .entries
            .iter()
            .filter(|e| !scanned.iter().any(|p| e.covers(p)))
            .map(|e| e.path.as_str())
            .collect();
        orphans.into_iter().map(str::to_string).collect()
    }
}
