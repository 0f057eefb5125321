//! Domain types for the ECR Public `Repository` custom resource.
//!
//! Field names serialize in camelCase so a YAML/JSON manifest of the custom
//! resource deserializes directly into [`Repository`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const API_VERSION: &str = "ecrpublic.services.k8s.aws/v1alpha1";
pub const KIND: &str = "Repository";

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Amazon Resource Name of a repository, used as the tagging API target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceArn(pub String);

impl ResourceArn {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceArn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ResourceArn {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ResourceArn {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A strongly-typed ECR Public repository name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryName(pub String);

impl fmt::Display for RepositoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for RepositoryName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RepositoryName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Spec
// ---------------------------------------------------------------------------

/// A single key/value tag as it appears in `spec.tags`.
///
/// Both halves are optional on the wire; see [`crate::tags::to_tag_set`] for
/// how absent keys and values are normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Tag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(value.into()),
        }
    }
}

/// Public catalog metadata shown in the ECR Public Gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CatalogData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architectures: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Base64-encoded logo image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_image_blob: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_systems: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_text: Option<String>,
}

/// Desired state of a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySpec {
    pub repository_name: RepositoryName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_data: Option<CatalogData>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Identity of the backing AWS resource, populated once it exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arn: Option<ResourceArn>,
    #[serde(
        default,
        rename = "ownerAccountID",
        skip_serializing_if = "Option::is_none"
    )]
    pub owner_account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// Kind of a status condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionType {
    #[serde(rename = "ACK.ResourceSynced")]
    ResourceSynced,
    #[serde(rename = "ACK.Terminal")]
    Terminal,
    #[serde(rename = "ACK.Recoverable")]
    Recoverable,
}

/// Tri-state condition status, Kubernetes style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ConditionStatus {
    True,
    False,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub condition_type: ConditionType,
    pub status: ConditionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<DateTime<Utc>>,
}

/// Observed state of a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ack_resource_metadata: Option<ResourceMetadata>,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_uri: Option<String>,
}

// ---------------------------------------------------------------------------
// Resource
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ObjectMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// The `Repository` custom resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    pub spec: RepositorySpec,
    #[serde(default)]
    pub status: RepositoryStatus,
}

fn default_api_version() -> String {
    API_VERSION.to_string()
}

fn default_kind() -> String {
    KIND.to_string()
}

impl Repository {
    /// A fresh resource with no metadata and an empty status.
    pub fn new(spec: RepositorySpec) -> Self {
        Self {
            api_version: default_api_version(),
            kind: default_kind(),
            metadata: ObjectMeta::default(),
            spec,
            status: RepositoryStatus::default(),
        }
    }

    /// The ARN recorded in status, if present and non-empty.
    pub fn arn(&self) -> Option<&ResourceArn> {
        self.status
            .ack_resource_metadata
            .as_ref()
            .and_then(|meta| meta.arn.as_ref())
            .filter(|arn| !arn.0.is_empty())
    }

    /// Record the ARN in `status.ackResourceMetadata`, creating it if absent.
    pub fn set_arn(&mut self, arn: impl Into<ResourceArn>) {
        self.status
            .ack_resource_metadata
            .get_or_insert_with(ResourceMetadata::default)
            .arn = Some(arn.into());
    }

    /// `namespace/name` when both are known, otherwise the repository name.
    pub fn display_name(&self) -> String {
        match (&self.metadata.namespace, &self.metadata.name) {
            (Some(ns), Some(name)) => format!("{ns}/{name}"),
            (None, Some(name)) => name.clone(),
            _ => self.spec.repository_name.0.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
