//! Error types for ecrpublic-sync.

use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single remote tagging call.
///
/// The SDK error is kept as the source, unchanged.
#[derive(Debug, Error)]
#[error("{operation} failed: {source}")]
pub struct ApiError {
    pub operation: &'static str,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl ApiError {
    pub fn new(
        operation: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        Self {
            operation,
            source: source.into(),
        }
    }
}

/// Errors from loading controller configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A `default_tags` entry that cannot be sent to the remote (e.g. empty key).
    #[error("invalid default tag: {0}")]
    InvalidDefaultTag(String),
}

/// All errors that can arise from the update hooks.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A remote call failed; retriable.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The requested change can never succeed; the resource must be edited.
    #[error("terminal error: {0}")]
    Terminal(String),

    /// The latest resource has no ARN yet, so there is nothing to tag.
    #[error("resource {name} has no ARN in status.ackResourceMetadata")]
    MissingArn { name: String },
}

impl SyncError {
    /// Terminal errors must not be retried by the caller.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SyncError::Terminal(_))
    }
}

/// Convenience constructor for [`ConfigError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}
