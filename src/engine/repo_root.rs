//! Repository root discovery

use crate::{AuditError, AuditResult};
use std::path::{Path, PathBuf};

/// Upper bound on ancestor steps, in case of symlink loops
const MAX_ANCESTORS: usize = 10_000;

/// Nearest ancestor of `start` (inclusive) that contains a `.git` directory
pub fn find_repo_root(start: &Path) -> AuditResult<PathBuf> {
    start
        .ancestors()
        .take(MAX_ANCESTORS)
        .find(|dir| dir.join(".git").is_dir())
        .map(Path::to_path_buf)
        .ok_or_else(|| AuditError::RootNotFound(start.to_path_buf()))
}
