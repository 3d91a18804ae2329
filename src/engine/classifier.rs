//! Per-file classification
//!
//! Order of precedence for one file:
//! 1. zero-length -> `[Empty]`, nothing else is looked at
//! 2. detection over the contents, or one error tag if the file can't be read
//! 3. override tags first, detection appended, then `uniq`
//! 4. `collide` records whether several licenses are present

use super::file_index::IndexedFile;
use super::store::ClassificationTable;
use crate::detection::{file_licenses, SignatureMatcher};
use crate::license::{Classification, LicenseTag};
use crate::policy::Policy;

/// Compute one file's raw classification (no table access)
pub fn classify_file(
    file: &IndexedFile,
    matcher: &SignatureMatcher,
    policy: &Policy,
) -> Classification {
    if file.size == 0 {
        return Classification::from_tags([LicenseTag::empty()]);
    }

    let detected = match file_licenses(matcher, &file.abs_path) {
        Ok(tags) => tags,
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", file.path, e);
            vec![LicenseTag::error(e)]
        }
    };

    let mut classification = Classification::from_tags(policy.overrides_for(&file.path).to_vec());
    classification.extend(detected);
    classification.uniq().collide()
}

/// Classify one file and merge the result into the shared table
pub fn classify_into(
    table: &ClassificationTable,
    file: &IndexedFile,
    matcher: &SignatureMatcher,
    policy: &Policy,
) {
    let classification = classify_file(file, matcher, policy);
    tracing::debug!("{} -> [{}]", file.path, classification.render());
    table.merge(&file.path, classification);
}
