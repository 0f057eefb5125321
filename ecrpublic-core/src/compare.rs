//! Field-level comparison of two `Repository` resources.
//!
//! A [`Delta`] records every dot-delimited field path at which the desired and
//! the latest resource differ. Update hooks query it by path prefix to decide
//! what changed.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::tags;
use crate::types::{CatalogData, Repository};

pub const SPEC_TAGS: &str = "Spec.Tags";

// ---------------------------------------------------------------------------
// Field paths
// ---------------------------------------------------------------------------

/// A dot-delimited field path such as `Spec.CatalogData.Description`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    parts: Vec<String>,
}

impl FieldPath {
    pub fn new(path: &str) -> Self {
        Self {
            parts: path
                .split('.')
                .filter(|part| !part.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    /// True when every part of `subject` matches this path's leading parts.
    ///
    /// `Spec.Tags` contains `Spec` and `Spec.Tags`, not `Spec.Tag` or
    /// `Spec.Tags.Key`.
    pub fn contains(&self, subject: &str) -> bool {
        let subject = FieldPath::new(subject);
        if subject.parts.is_empty() || subject.parts.len() > self.parts.len() {
            return false;
        }
        self.parts
            .iter()
            .zip(&subject.parts)
            .all(|(ours, theirs)| ours == theirs)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.parts.join("."))
    }
}

impl From<&str> for FieldPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// ---------------------------------------------------------------------------
// Delta
// ---------------------------------------------------------------------------

/// One differing field, with JSON snapshots of both sides.
#[derive(Debug, Clone, PartialEq)]
pub struct Difference {
    pub path: FieldPath,
    pub a: Value,
    pub b: Value,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Delta {
    pub differences: Vec<Difference>,
}

impl Delta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a difference at `path`.
    pub fn add<A: Serialize, B: Serialize>(&mut self, path: &str, a: &A, b: &B) {
        self.differences.push(Difference {
            path: FieldPath::new(path),
            a: snapshot(a),
            b: snapshot(b),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    /// True if any recorded difference lies at or below `subject`.
    pub fn different_at(&self, subject: &str) -> bool {
        self.differences
            .iter()
            .any(|diff| diff.path.contains(subject))
    }

    /// True if any recorded difference lies outside all of `subjects`.
    pub fn different_except(&self, subjects: &[&str]) -> bool {
        self.differences.iter().any(|diff| {
            !subjects
                .iter()
                .any(|subject| diff.path.contains(subject))
        })
    }

    pub fn paths(&self) -> Vec<String> {
        self.differences
            .iter()
            .map(|diff| diff.path.to_string())
            .collect()
    }
}

fn snapshot<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

// ---------------------------------------------------------------------------
// Resource comparison
// ---------------------------------------------------------------------------

/// Build the delta between `a` (desired) and `b` (latest).
pub fn new_resource_delta(a: &Repository, b: &Repository) -> Delta {
    let mut delta = Delta::new();

    if a.spec.repository_name != b.spec.repository_name {
        delta.add(
            "Spec.RepositoryName",
            &a.spec.repository_name,
            &b.spec.repository_name,
        );
    }

    match (&a.spec.catalog_data, &b.spec.catalog_data) {
        (None, None) => {}
        (Some(ca), Some(cb)) => compare_catalog_data(&mut delta, ca, cb),
        (ca, cb) => delta.add("Spec.CatalogData", ca, cb),
    }

    compare_tags(&mut delta, a, b);
    delta
}

fn compare_catalog_data(delta: &mut Delta, a: &CatalogData, b: &CatalogData) {
    if a.about_text != b.about_text {
        delta.add("Spec.CatalogData.AboutText", &a.about_text, &b.about_text);
    }
    if a.architectures != b.architectures {
        delta.add(
            "Spec.CatalogData.Architectures",
            &a.architectures,
            &b.architectures,
        );
    }
    if a.description != b.description {
        delta.add("Spec.CatalogData.Description", &a.description, &b.description);
    }
    if a.logo_image_blob != b.logo_image_blob {
        delta.add(
            "Spec.CatalogData.LogoImageBlob",
            &a.logo_image_blob,
            &b.logo_image_blob,
        );
    }
    if a.operating_systems != b.operating_systems {
        delta.add(
            "Spec.CatalogData.OperatingSystems",
            &a.operating_systems,
            &b.operating_systems,
        );
    }
    if a.usage_text != b.usage_text {
        delta.add("Spec.CatalogData.UsageText", &a.usage_text, &b.usage_text);
    }
}

/// Order-insensitive comparison of `spec.tags`.
///
/// Lists of different length always differ; equal-length lists differ only
/// when the normalized sets do.
pub fn compare_tags(delta: &mut Delta, a: &Repository, b: &Repository) {
    let (ta, tb) = (&a.spec.tags, &b.spec.tags);
    if ta.len() != tb.len() {
        delta.add(SPEC_TAGS, ta, tb);
    } else if !ta.is_empty() {
        let desired = tags::to_tag_set(ta);
        let latest = tags::to_tag_set(tb);
        if !tags::difference(&latest, &desired).is_empty() {
            delta.add(SPEC_TAGS, ta, tb);
        }
    }
}
