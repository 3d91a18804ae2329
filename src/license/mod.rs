//! License tags and per-file classifications
//!
//! A tag is kept structured (base name + inferred + undocumented) for the
//! whole scan and only rendered to its suffixed text form (`MIT~!`) at the
//! reporting boundary.

pub mod signatures;

pub use signatures::{Signature, SignatureSet};

use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Well-known tags ────────────────────────────────────────────────

pub const APACHE: &str = "Apache";
pub const DOCS: &str = "Docs";
pub const EMPTY: &str = "Empty";
pub const IGNORE: &str = "Ignore";

/// Tags that pass on their own without a manifest entry
pub const TRIVIAL_TAGS: [&str; 4] = [APACHE, DOCS, EMPTY, IGNORE];

const ERROR_PREFIX: &str = "Error: ";

// ─── License Tag ────────────────────────────────────────────────────

/// A single classification label for a file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LicenseTag {
    name: String,
    /// Produced by an I/O failure rather than by detection
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    error: bool,
    /// Copied from an ancestor directory's license file (`~`)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    inferred: bool,
    /// Inconsistent with the manifest (`!`)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    undocumented: bool,
}

impl LicenseTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            error: false,
            inferred: false,
            undocumented: false,
        }
    }

    /// Tag standing in for a file that could not be opened or read
    pub fn error(message: impl fmt::Display) -> Self {
        Self {
            name: format!("{}{}", ERROR_PREFIX, message),
            error: true,
            inferred: false,
            undocumented: false,
        }
    }

    pub fn empty() -> Self {
        Self::new(EMPTY)
    }

    /// Base name without any suffix
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    pub fn is_error(&self) -> bool {
        self.error
    }

    pub fn is_inferred(&self) -> bool {
        self.inferred
    }

    pub fn is_undocumented(&self) -> bool {
        self.undocumented
    }

    /// `Apache`, `Docs`, `Empty` and `Ignore` as the file's own tags.
    ///
    /// Of the inherited forms only `Apache~` stays trivial; `Empty~` and
    /// `Ignore~` need a manifest entry like any other license.
    pub fn is_trivial(&self) -> bool {
        if self.error {
            return false;
        }
        if self.inferred {
            return self.name == APACHE;
        }
        TRIVIAL_TAGS.contains(&self.name.as_str())
    }

    /// The file's own `Ignore` tag; an inherited `Ignore~` suppresses nothing
    pub fn suppresses(&self) -> bool {
        !self.error && !self.inferred && self.name == IGNORE
    }

    /// Names an actual license (as opposed to a marker like `Docs` or `Empty`)
    pub fn is_license(&self) -> bool {
        !self.error && !matches!(self.name.as_str(), DOCS | EMPTY | IGNORE)
    }

    /// Copy of this tag marked as inherited from an ancestor directory
    pub fn inherited(&self) -> Self {
        Self {
            inferred: true,
            ..self.clone()
        }
    }

    pub fn mark_undocumented(&mut self) {
        self.undocumented = true;
    }
}

impl fmt::Display for LicenseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.inferred {
            f.write_str("~")?;
        }
        if self.undocumented {
            f.write_str("!")?;
        }
        Ok(())
    }
}

// ─── Classification ─────────────────────────────────────────────────

/// Ordered tags for one file. The first tag is the primary one in reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    tags: Vec<LicenseTag>,
    /// More than one distinct license-bearing tag survived `collide`
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    conflicted: bool,
}

impl Classification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tags(tags: impl IntoIterator<Item = LicenseTag>) -> Self {
        Self {
            tags: tags.into_iter().collect(),
            conflicted: false,
        }
    }

    pub fn tags(&self) -> &[LicenseTag] {
        &self.tags
    }

    pub fn tags_mut(&mut self) -> &mut [LicenseTag] {
        &mut self.tags
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn push(&mut self, tag: LicenseTag) {
        self.tags.push(tag);
    }

    pub fn extend(&mut self, tags: impl IntoIterator<Item = LicenseTag>) {
        self.tags.extend(tags);
    }

    /// Carries the file's own `Ignore` tag
    pub fn is_suppressed(&self) -> bool {
        self.tags.iter().any(LicenseTag::suppresses)
    }

    pub fn is_conflicted(&self) -> bool {
        self.conflicted
    }

    /// Collapse duplicate tags, keeping the first occurrence of each
    pub fn uniq(mut self) -> Self {
        let mut seen: Vec<LicenseTag> = Vec::with_capacity(self.tags.len());
        for tag in self.tags.drain(..) {
            if !seen.contains(&tag) {
                seen.push(tag);
            }
        }
        self.tags = seen;
        self
    }

    /// Resolve collisions between tags after `uniq`.
    ///
    /// Every tag is retained; a collision is only recorded so the reconciler
    /// can flag all conflicting parties when the file is not documented.
    pub fn collide(mut self) -> Self {
        let licenses = self.tags.iter().filter(|t| t.is_license()).count();
        self.conflicted = licenses > 1;
        self
    }

    /// Base names of all tags, in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|t| t.name())
    }

    /// Any tag carries the undocumented marker
    pub fn has_undocumented(&self) -> bool {
        self.tags.iter().any(|t| t.is_undocumented())
    }

    /// Rendered tags joined the way reports print them
    pub fn render(&self) -> String {
        self.tags
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromIterator<LicenseTag> for Classification {
    fn from_iter<I: IntoIterator<Item = LicenseTag>>(iter: I) -> Self {
        Self::from_tags(iter)
    }
}
