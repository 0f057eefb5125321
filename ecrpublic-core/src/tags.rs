//! Tag-set algebra.
//!
//! `spec.tags` is a list of optional key/value pairs. Comparison and sync work
//! on a normalized [`TagSet`] instead, so list order and duplicate entries do
//! not matter.

use std::collections::BTreeMap;

use crate::types::Tag;

/// Normalized tags: unique keys, deterministic (sorted) iteration.
pub type TagSet = BTreeMap<String, String>;

/// Result of comparing an observed tag set against a desired one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagDifference {
    /// Desired entries that are missing from the observed set or carry a
    /// different value there.
    pub added: TagSet,
    /// Desired entries already present with the same value.
    pub unchanged: TagSet,
    /// Observed entries whose key is not desired at all.
    pub removed: TagSet,
}

impl TagDifference {
    /// True when no remote call is needed to converge.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Keys to pass to an untag call, in sorted order.
    pub fn removed_keys(&self) -> Vec<String> {
        self.removed.keys().cloned().collect()
    }
}

/// Normalize a tag list.
///
/// Entries without a key are skipped and a missing value becomes the empty
/// string. When a key repeats, the last entry wins.
pub fn to_tag_set(tags: &[Tag]) -> TagSet {
    let mut set = TagSet::new();
    for tag in tags {
        let Some(key) = &tag.key else {
            continue;
        };
        set.insert(key.clone(), tag.value.clone().unwrap_or_default());
    }
    set
}

/// Expand a tag set back into a key-ordered list.
pub fn from_tag_set(set: &TagSet) -> Vec<Tag> {
    set.iter().map(|(k, v)| Tag::new(k, v)).collect()
}

/// Compare `latest` (observed) with `desired`.
pub fn difference(latest: &TagSet, desired: &TagSet) -> TagDifference {
    let mut diff = TagDifference::default();

    for (key, value) in desired {
        match latest.get(key) {
            Some(current) if current == value => {
                diff.unchanged.insert(key.clone(), value.clone());
            }
            _ => {
                diff.added.insert(key.clone(), value.clone());
            }
        }
    }

    for (key, value) in latest {
        if !desired.contains_key(key) {
            diff.removed.insert(key.clone(), value.clone());
        }
    }

    diff
}

/// Add `defaults` to `desired` for every key `desired` does not define.
pub fn merge_defaults(desired: &TagSet, defaults: &TagSet) -> TagSet {
    let mut merged = desired.clone();
    for (key, value) in defaults {
        merged
            .entry(key.clone())
            .or_insert_with(|| value.clone());
    }
    merged
}
