//! Remote tagging operations, abstracted so hooks can run against the AWS SDK
//! in production and an in-memory fake in tests.

use async_trait::async_trait;

use ecrpublic_core::types::{ResourceArn, Tag};

use crate::error::ApiError;

pub const TAG_RESOURCE: &str = "TagResource";
pub const UNTAG_RESOURCE: &str = "UntagResource";
pub const LIST_TAGS_FOR_RESOURCE: &str = "ListTagsForResource";

/// The three ECR Public tagging calls the hooks rely on.
#[async_trait]
pub trait TagApi: Send + Sync {
    /// Add or overwrite `tags` on the resource.
    async fn tag_resource(&self, arn: &ResourceArn, tags: &[Tag]) -> Result<(), ApiError>;

    /// Remove the tags with the given keys.
    async fn untag_resource(&self, arn: &ResourceArn, keys: &[String]) -> Result<(), ApiError>;

    /// All tags currently on the resource.
    async fn list_tags_for_resource(&self, arn: &ResourceArn) -> Result<Vec<Tag>, ApiError>;
}
