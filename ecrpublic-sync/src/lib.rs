//! # ecrpublic-sync
//!
//! Tag reconciliation hooks for the ECR Public `Repository` resource.
//!
//! Call [`custom_update_repository`] with a precomputed delta, or use
//! [`TagSyncer`] to compute the delta and merge controller default tags.
//! [`set_resource_additional_fields`] refreshes observed tags after a read.

pub mod api;
pub mod config;
pub mod error;
pub mod hooks;
pub mod metrics;
pub mod sdk;
pub mod telemetry;

pub use api::TagApi;
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError, SyncError};
pub use hooks::{
    custom_update_repository, get_tags, set_resource_additional_fields, sync_tags, TagSyncOutcome,
    TagSyncer,
};
pub use sdk::EcrPublicTagApi;
