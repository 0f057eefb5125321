//! ecrpublic core library — resource types, tag-set algebra, field deltas,
//! manifests.
//!
//! - [`types`] — newtypes and the `Repository` resource
//! - [`tags`] — normalized tag sets and their difference
//! - [`compare`] — [`Delta`] between desired and latest resources
//! - [`manifest`] — YAML load / save
//! - [`error`] — [`ManifestError`]

pub mod compare;
pub mod error;
pub mod manifest;
pub mod tags;
pub mod types;

pub use compare::{new_resource_delta, Delta, FieldPath};
pub use error::ManifestError;
pub use tags::{TagDifference, TagSet};
pub use types::{
    CatalogData, Condition, ConditionStatus, ConditionType, Repository, RepositoryName,
    RepositorySpec, RepositoryStatus, ResourceArn, ResourceMetadata, Tag,
};
