//! Recognized attributes attached to definitions, fields and variants.

use crate::rename::CaseConvention;
use serde::{Deserialize, Serialize};

/// Attribute bag for one definition, field or variant.
///
/// Keys mirror the source schema annotations: `rename`, `rename-all`,
/// `target-os`, `default` and `skip`. The bag stores raw values; the
/// resolver decides precedence and reports conflicts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttrBag {
    /// Explicit wire-name renames, in written order. Two distinct values
    /// on one item are a conflict surfaced during resolution.
    pub renames: Vec<String>,
    /// Case convention applied to the container's items.
    pub rename_all: Option<CaseConvention>,
    /// Platform tags the item is limited to. Empty means universal.
    pub target_os: Vec<String>,
    /// Item carries an absent-value fallback.
    pub has_default: bool,
    /// Item is excluded from emission unconditionally.
    pub skip: bool,
}

impl AttrBag {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an explicit wire-name rename.
    pub fn add_rename(&mut self, value: impl Into<String>) {
        self.renames.push(value.into());
    }

    /// Restricts the item to the given platform tag.
    pub fn add_target_os(&mut self, tag: impl Into<String>) {
        self.target_os.push(tag.into());
    }

    /// Returns true when no platform restriction applies.
    #[must_use]
    pub fn is_universal(&self) -> bool {
        self.target_os.is_empty()
    }

    /// Returns true if the item survives filtering for `platform`.
    ///
    /// An empty tag set matches every request; a tagged item matches only
    /// when the requested platform appears in its set. A request for no
    /// platform retains only universal items.
    #[must_use]
    pub fn applies_to(&self, platform: Option<&str>) -> bool {
        if self.target_os.is_empty() {
            return true;
        }
        platform.is_some_and(|p| self.target_os.iter().any(|t| t == p))
    }
}
