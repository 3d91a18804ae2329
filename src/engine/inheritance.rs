//! Directory license inheritance
//!
//! A file with no tags of its own takes the tags of the nearest ancestor
//! directory's license file, marked as inferred. `Docs` is never inherited.
//! The search stops at the first ancestor whose license file has any tags,
//! even if all of them were `Docs`.

use super::store::ClassificationMap;
use crate::license::{Classification, DOCS};

/// Conventional license file names checked in each ancestor directory
pub const LICENSE_FILE_NAMES: [&str; 6] = [
    "LICENSE",
    "LICENCE",
    "LICENSE.md",
    "LICENCE.md",
    "LICENSE.txt",
    "LICENCE.txt",
];

/// Fill empty classifications from ancestor license files.
///
/// Lookups use the classifications as they were before this pass, so the
/// outcome does not depend on iteration order. The root directory itself
/// is not an inheritance source. Returns the number of files that inherited.
pub fn resolve(files: &mut ClassificationMap) -> usize {
    let inherited: Vec<(String, Classification)> = files
        .iter()
        .filter(|(_, c)| c.is_empty())
        .filter_map(|(path, _)| nearest_license(files, path).map(|c| (path.clone(), c)))
        .collect();

    let count = inherited.len();
    for (path, classification) in inherited {
        tracing::debug!("{} inherits [{}]", path, classification.render());
        files.insert(path, classification);
    }
    count
}

/// Tags inherited by `path`, if an ancestor license file decides them
fn nearest_license(files: &ClassificationMap, path: &str) -> Option<Classification> {
    let parts: Vec<&str> = path.split('/').collect();

    // parts[..i] for i >= 1: nearest directory first, root excluded
    for i in (1..parts.len()).rev() {
        let dir = parts[..i].join("/");
        for name in LICENSE_FILE_NAMES {
            let candidate = format!("{}/{}", dir, name);
            let Some(license) = files.get(&candidate) else {
                continue;
            };
            if license.is_empty() {
                continue;
            }
            let tags = license
                .tags()
                .iter()
                .filter(|t| !t.is(DOCS))
                .map(|t| t.inherited());
            let classification: Classification = tags.collect();
            return if classification.is_empty() {
                None
            } else {
                Some(classification)
            };
        }
    }
    None
}
