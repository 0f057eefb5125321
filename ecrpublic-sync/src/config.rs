//! Controller-side configuration for the tagging hooks.
//!
//! Loaded from a YAML file (all fields optional), then overridden by
//! environment variables:
//!
//! | variable                 | field          |
//! |--------------------------|----------------|
//! | `ECRPUBLIC_REGION`       | `region`       |
//! | `ECRPUBLIC_ENDPOINT_URL` | `endpoint_url` |

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use ecrpublic_core::tags::TagSet;

use crate::error::{io_err, ConfigError};

/// ECR Public is only served from this region.
pub const DEFAULT_REGION: &str = "us-east-1";
pub const CONTROLLER_SERVICE: &str = "ecrpublic";

pub const ENV_REGION: &str = "ECRPUBLIC_REGION";
pub const ENV_ENDPOINT_URL: &str = "ECRPUBLIC_ENDPOINT_URL";

pub const PLACEHOLDER_NAMESPACE: &str = "%K8S_NAMESPACE%";
pub const PLACEHOLDER_SERVICE: &str = "%CONTROLLER_SERVICE%";
pub const PLACEHOLDER_VERSION: &str = "%CONTROLLER_VERSION%";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub region: String,
    /// Override for the ECR Public endpoint (e.g. a local mock).
    pub endpoint_url: Option<String>,
    pub controller_version: String,
    /// Tags the controller keeps on every repository. Values may use the
    /// `%K8S_NAMESPACE%`, `%CONTROLLER_SERVICE%` and `%CONTROLLER_VERSION%`
    /// placeholders.
    pub default_tags: BTreeMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let mut default_tags = BTreeMap::new();
        default_tags.insert(
            "services.k8s.aws/controller-version".to_string(),
            format!("{PLACEHOLDER_SERVICE}-{PLACEHOLDER_VERSION}"),
        );
        default_tags.insert(
            "services.k8s.aws/namespace".to_string(),
            PLACEHOLDER_NAMESPACE.to_string(),
        );
        Self {
            region: DEFAULT_REGION.to_string(),
            endpoint_url: None,
            controller_version: env!("CARGO_PKG_VERSION").to_string(),
            default_tags,
        }
    }
}

impl ClientConfig {
    /// Load from `path` and apply environment overrides.
    pub fn load_at(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        let mut config: ClientConfig =
            serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                source: e,
            })?;
        config.apply_env_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment overrides, for running without a config file.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = ClientConfig::default();
        config.apply_env_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(region) = lookup(ENV_REGION).filter(|v| !v.is_empty()) {
            self.region = region;
        }
        if let Some(endpoint) = lookup(ENV_ENDPOINT_URL).filter(|v| !v.is_empty()) {
            self.endpoint_url = Some(endpoint);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for key in self.default_tags.keys() {
            if key.trim().is_empty() {
                return Err(ConfigError::InvalidDefaultTag(
                    "tag key must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Expand the default tags for a resource in `namespace`.
    ///
    /// Tags that need the namespace are left out when it is unknown.
    pub fn resolve_default_tags(&self, namespace: Option<&str>) -> TagSet {
        let mut resolved = TagSet::new();
        for (key, template) in &self.default_tags {
            if template.contains(PLACEHOLDER_NAMESPACE) && namespace.is_none() {
                tracing::debug!(tag = %key, "skipping default tag: namespace unknown");
                continue;
            }
            let value = template
                .replace(PLACEHOLDER_NAMESPACE, namespace.unwrap_or_default())
                .replace(PLACEHOLDER_SERVICE, CONTROLLER_SERVICE)
                .replace(PLACEHOLDER_VERSION, &self.controller_version);
            resolved.insert(key.clone(), value);
        }
        resolved
    }
}
