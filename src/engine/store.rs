//! Shared classification table
//!
//! The only mutable state shared between workers. Access goes through
//! single read-modify-write operations under one lock; callers never hold
//! the lock across I/O.

use crate::license::Classification;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Path -> classification, ordered by path
pub type ClassificationMap = BTreeMap<String, Classification>;

#[derive(Debug, Default)]
pub struct ClassificationTable {
    entries: Mutex<ClassificationMap>,
}

impl ClassificationTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ClassificationMap> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Atomically read-modify-write one entry, creating it empty if missing
    pub fn update<F>(&self, path: &str, f: F)
    where
        F: FnOnce(Classification) -> Classification,
    {
        let mut entries = self.lock();
        let slot = entries.entry(path.to_string()).or_default();
        *slot = f(std::mem::take(slot));
    }

    /// Merge freshly computed tags into an entry: append, `uniq`, `collide`
    pub fn merge(&self, path: &str, incoming: Classification) {
        self.update(path, |mut current| {
            current.extend(incoming.tags().iter().cloned());
            current.uniq().collide()
        });
    }

    /// Copy of one entry
    pub fn get(&self, path: &str) -> Option<Classification> {
        self.lock().get(path).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Hand the table to the sequential passes once all workers have joined
    pub fn into_inner(self) -> ClassificationMap {
        self.entries
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
