//! Parameterised delta tests for `ecrpublic-core`.
//!
//! Each `#[case]` builds its own resources — no shared state.

use ecrpublic_core::{
    compare::{new_resource_delta, SPEC_TAGS},
    tags::{self, TagSet},
    types::{CatalogData, RepositoryName, RepositorySpec, Tag},
    Repository,
};
use rstest::rstest;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn repo(tags: &[(&str, &str)]) -> Repository {
    Repository::new(RepositorySpec {
        repository_name: RepositoryName::from("web"),
        catalog_data: None,
        tags: tags.iter().map(|(k, v)| Tag::new(*k, *v)).collect(),
    })
}

fn set(pairs: &[(&str, &str)]) -> TagSet {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ---------------------------------------------------------------------------
// Tag difference
// ---------------------------------------------------------------------------

#[rstest]
#[case::identical(&[("a", "1")], &[("a", "1")], &[], &[])]
#[case::new_key(&[("a", "1")], &[("a", "1"), ("b", "2")], &[("b", "2")], &[])]
#[case::dropped_key(&[("a", "1"), ("b", "2")], &[("a", "1")], &[], &[("b", "2")])]
#[case::changed_value(&[("a", "1")], &[("a", "9")], &[("a", "9")], &[])]
#[case::replaced(&[("a", "1")], &[("b", "2")], &[("b", "2")], &[("a", "1")])]
#[case::from_empty(&[], &[("a", "1")], &[("a", "1")], &[])]
#[case::to_empty(&[("a", "1")], &[], &[], &[("a", "1")])]
fn tag_difference(
    #[case] latest: &[(&str, &str)],
    #[case] desired: &[(&str, &str)],
    #[case] added: &[(&str, &str)],
    #[case] removed: &[(&str, &str)],
) {
    let diff = tags::difference(&set(latest), &set(desired));
    assert_eq!(diff.added, set(added));
    assert_eq!(diff.removed, set(removed));
    assert_eq!(diff.is_empty(), added.is_empty() && removed.is_empty());
}

// ---------------------------------------------------------------------------
// Resource delta
// ---------------------------------------------------------------------------

#[rstest]
#[case::no_change(&[("a", "1")], &[("a", "1")], false)]
#[case::reordered(&[("a", "1"), ("b", "2")], &[("b", "2"), ("a", "1")], false)]
#[case::value(&[("a", "1")], &[("a", "2")], true)]
#[case::grown(&[("a", "1")], &[("a", "1"), ("b", "2")], true)]
#[case::both_empty(&[], &[], false)]
fn tags_delta(
    #[case] desired: &[(&str, &str)],
    #[case] latest: &[(&str, &str)],
    #[case] differs: bool,
) {
    let delta = new_resource_delta(&repo(desired), &repo(latest));
    assert_eq!(delta.different_at(SPEC_TAGS), differs);
    assert!(!delta.different_except(&[SPEC_TAGS]));
}

#[test]
fn repository_name_change_is_outside_tags() {
    let desired = repo(&[]);
    let mut latest = repo(&[]);
    latest.spec.repository_name = RepositoryName::from("web-old");

    let delta = new_resource_delta(&desired, &latest);
    assert!(!delta.different_at(SPEC_TAGS));
    assert!(delta.different_except(&[SPEC_TAGS]));
    assert_eq!(delta.paths(), vec!["Spec.RepositoryName".to_string()]);
}

#[test]
fn catalog_data_fields_are_compared_individually() {
    let mut desired = repo(&[]);
    desired.spec.catalog_data = Some(CatalogData {
        about_text: Some("about".to_string()),
        architectures: Some(vec!["ARM64".to_string()]),
        ..Default::default()
    });
    let mut latest = repo(&[]);
    latest.spec.catalog_data = Some(CatalogData {
        about_text: Some("about".to_string()),
        architectures: Some(vec!["x86-64".to_string()]),
        ..Default::default()
    });

    let delta = new_resource_delta(&desired, &latest);
    assert_eq!(
        delta.paths(),
        vec!["Spec.CatalogData.Architectures".to_string()]
    );
    assert!(delta.different_at("Spec.CatalogData"));
    assert!(delta.different_at("Spec"));
}
