//! Update and read hooks for the `Repository` resource.
//!
//! ## `custom_update_repository` — 3-step protocol
//!
//! 1. If the delta touches `Spec.Tags`, converge remote tags
//!    (untag removed keys, then tag added/changed entries).
//! 2. If the delta touches anything else, fail with a terminal error.
//! 3. Otherwise the desired resource is the new observed state.
//!
//! Tags are converged before the terminal check, so a mixed change still
//! applies its tag half.

use std::sync::Arc;

use tracing::instrument;

use ecrpublic_core::{
    compare::{new_resource_delta, Delta, SPEC_TAGS},
    tags::{self, TagSet},
    types::{Repository, ResourceArn, Tag},
};

use crate::api::TagApi;
use crate::config::ClientConfig;
use crate::error::SyncError;

pub const ONLY_TAGS_UPDATABLE: &str = "only tags can be updated";

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// What a tag sync sent to the remote.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagSyncOutcome {
    /// Entries passed to `TagResource`.
    pub added: TagSet,
    /// Keys passed to `UntagResource`, sorted.
    pub removed: Vec<String>,
}

impl TagSyncOutcome {
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Hooks
// ---------------------------------------------------------------------------

/// Apply an update of `latest` towards `desired`.
///
/// Only tag changes are supported; any other difference in `delta` yields
/// [`SyncError::Terminal`]. Remote failures are returned as they occur.
#[instrument(skip_all, fields(resource = %desired.display_name()), err)]
pub async fn custom_update_repository(
    api: &dyn TagApi,
    desired: &Repository,
    latest: &Repository,
    delta: &Delta,
) -> Result<Repository, SyncError> {
    if delta.different_at(SPEC_TAGS) {
        sync_tags(api, desired, latest).await?;
    }

    if delta.different_except(&[SPEC_TAGS]) {
        tracing::debug!(paths = ?delta.paths(), "rejecting non-tag update");
        return Err(SyncError::Terminal(ONLY_TAGS_UPDATABLE.to_string()));
    }

    Ok(desired.clone())
}

/// Converge the remote tags of `latest` to the tags of `desired`.
#[instrument(skip_all, fields(resource = %latest.display_name()), err)]
pub async fn sync_tags(
    api: &dyn TagApi,
    desired: &Repository,
    latest: &Repository,
) -> Result<TagSyncOutcome, SyncError> {
    let arn = require_arn(latest)?;
    let desired_tags = tags::to_tag_set(&desired.spec.tags);
    let latest_tags = tags::to_tag_set(&latest.spec.tags);
    sync_tag_sets(api, arn, &latest_tags, &desired_tags).await
}

async fn sync_tag_sets(
    api: &dyn TagApi,
    arn: &ResourceArn,
    latest: &TagSet,
    desired: &TagSet,
) -> Result<TagSyncOutcome, SyncError> {
    let diff = tags::difference(latest, desired);
    let outcome = TagSyncOutcome {
        removed: diff.removed_keys(),
        added: diff.added,
    };

    if !outcome.removed.is_empty() {
        tracing::debug!(tags = ?outcome.removed, "removing tags from Repository resource");
        api.untag_resource(arn, &outcome.removed).await?;
    }

    if !outcome.added.is_empty() {
        tracing::debug!(tags = ?outcome.added, "adding tags to Repository resource");
        api.tag_resource(arn, &tags::from_tag_set(&outcome.added))
            .await?;
    }

    Ok(outcome)
}

/// Late-initialize observed fields after a read.
///
/// When the resource has an ARN its `spec.tags` is replaced by the remote
/// tags; without one it is left untouched.
#[instrument(skip_all, fields(resource = %repository.display_name()), err)]
pub async fn set_resource_additional_fields(
    api: &dyn TagApi,
    repository: &mut Repository,
) -> Result<(), SyncError> {
    let Some(arn) = repository.arn().cloned() else {
        return Ok(());
    };
    repository.spec.tags = get_tags(api, &arn).await?;
    Ok(())
}

/// All remote tags for `arn`.
pub async fn get_tags(api: &dyn TagApi, arn: &ResourceArn) -> Result<Vec<Tag>, SyncError> {
    Ok(api.list_tags_for_resource(arn).await?)
}

fn require_arn(repository: &Repository) -> Result<&ResourceArn, SyncError> {
    repository.arn().ok_or_else(|| SyncError::MissingArn {
        name: repository.display_name(),
    })
}

// ---------------------------------------------------------------------------
// TagSyncer
// ---------------------------------------------------------------------------

/// Hooks bound to one API client and the controller's default tags.
///
/// Default tags are merged into every desired resource (without overriding
/// user-set keys) before it is compared or synced, so tags the controller
/// owns are never removed.
#[derive(Clone)]
pub struct TagSyncer {
    api: Arc<dyn TagApi>,
    config: ClientConfig,
}

impl TagSyncer {
    pub fn new(api: Arc<dyn TagApi>, config: ClientConfig) -> Self {
        Self { api, config }
    }

    /// `desired` with the controller default tags merged in.
    pub fn with_default_tags(&self, desired: &Repository) -> Repository {
        let defaults = self
            .config
            .resolve_default_tags(desired.metadata.namespace.as_deref());
        let merged = tags::merge_defaults(&tags::to_tag_set(&desired.spec.tags), &defaults);
        let mut effective = desired.clone();
        effective.spec.tags = tags::from_tag_set(&merged);
        effective
    }

    /// Delta between `desired` (with default tags) and `latest`.
    pub fn delta(&self, desired: &Repository, latest: &Repository) -> Delta {
        new_resource_delta(&self.with_default_tags(desired), latest)
    }

    /// Compute the delta and run [`custom_update_repository`].
    ///
    /// Returns the effective desired resource, default tags included.
    pub async fn update(
        &self,
        desired: &Repository,
        latest: &Repository,
    ) -> Result<Repository, SyncError> {
        let effective = self.with_default_tags(desired);
        let delta = new_resource_delta(&effective, latest);
        if delta.is_empty() {
            tracing::debug!(resource = %desired.display_name(), "no changes to apply");
            return Ok(effective);
        }
        custom_update_repository(self.api.as_ref(), &effective, latest, &delta).await
    }

    /// [`sync_tags`] with default tags merged into `desired`.
    pub async fn sync_tags(
        &self,
        desired: &Repository,
        latest: &Repository,
    ) -> Result<TagSyncOutcome, SyncError> {
        sync_tags(self.api.as_ref(), &self.with_default_tags(desired), latest).await
    }

    /// See [`set_resource_additional_fields`].
    pub async fn late_initialize(&self, latest: &mut Repository) -> Result<(), SyncError> {
        set_resource_additional_fields(self.api.as_ref(), latest).await
    }
}

impl std::fmt::Debug for TagSyncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagSyncer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
