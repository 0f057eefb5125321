//! In-memory `TagApi` used by the hook tests.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use ecrpublic_core::types::{RepositoryName, RepositorySpec, ResourceArn, Tag};
use ecrpublic_core::Repository;
use ecrpublic_sync::api::{LIST_TAGS_FOR_RESOURCE, TAG_RESOURCE, UNTAG_RESOURCE};
use ecrpublic_sync::{ApiError, TagApi};

pub const ARN: &str = "arn:aws:ecr-public::123456789012:repository/web";

/// A recorded remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Tag(Vec<(String, String)>),
    Untag(Vec<String>),
    List,
}

#[derive(Default)]
struct State {
    tags: BTreeMap<String, BTreeMap<String, String>>,
    calls: Vec<Call>,
    failing: HashSet<&'static str>,
}

#[derive(Default)]
pub struct FakeTagApi {
    state: Mutex<State>,
}

impl FakeTagApi {
    pub fn with_remote_tags(arn: &str, tags: &[(&str, &str)]) -> Self {
        let api = Self::default();
        api.state.lock().expect("lock").tags.insert(
            arn.to_string(),
            tags.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        api
    }

    /// Make every call of `operation` fail.
    pub fn fail(&self, operation: &'static str) {
        self.state.lock().expect("lock").failing.insert(operation);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().expect("lock").calls.clone()
    }

    pub fn remote_tags(&self, arn: &str) -> BTreeMap<String, String> {
        self.state
            .lock()
            .expect("lock")
            .tags
            .get(arn)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl TagApi for FakeTagApi {
    async fn tag_resource(&self, arn: &ResourceArn, tags: &[Tag]) -> Result<(), ApiError> {
        let mut state = self.state.lock().expect("lock");
        let pairs: Vec<(String, String)> = tags
            .iter()
            .map(|t| {
                (
                    t.key.clone().unwrap_or_default(),
                    t.value.clone().unwrap_or_default(),
                )
            })
            .collect();
        state.calls.push(Call::Tag(pairs.clone()));
        if state.failing.contains(TAG_RESOURCE) {
            return Err(ApiError::new(TAG_RESOURCE, "TooManyTagsException"));
        }
        state.tags.entry(arn.0.clone()).or_default().extend(pairs);
        Ok(())
    }

    async fn untag_resource(&self, arn: &ResourceArn, keys: &[String]) -> Result<(), ApiError> {
        let mut state = self.state.lock().expect("lock");
        state.calls.push(Call::Untag(keys.to_vec()));
        if state.failing.contains(UNTAG_RESOURCE) {
            return Err(ApiError::new(UNTAG_RESOURCE, "AccessDeniedException"));
        }
        if let Some(current) = state.tags.get_mut(&arn.0) {
            for key in keys {
                current.remove(key);
            }
        }
        Ok(())
    }

    async fn list_tags_for_resource(&self, arn: &ResourceArn) -> Result<Vec<Tag>, ApiError> {
        let mut state = self.state.lock().expect("lock");
        state.calls.push(Call::List);
        if state.failing.contains(LIST_TAGS_FOR_RESOURCE) {
            return Err(ApiError::new(
                LIST_TAGS_FOR_RESOURCE,
                "RepositoryNotFoundException",
            ));
        }
        Ok(state
            .tags
            .get(&arn.0)
            .map(|tags| tags.iter().map(|(k, v)| Tag::new(k, v)).collect())
            .unwrap_or_default())
    }
}

pub fn repo(tags: &[(&str, &str)]) -> Repository {
    let mut repo = Repository::new(RepositorySpec {
        repository_name: RepositoryName::from("web"),
        catalog_data: None,
        tags: tags.iter().map(|(k, v)| Tag::new(*k, *v)).collect(),
    });
    repo.metadata.name = Some("web".to_string());
    repo.metadata.namespace = Some("default".to_string());
    repo
}

pub fn observed(tags: &[(&str, &str)]) -> Repository {
    let mut repo = repo(tags);
    repo.set_arn(ResourceArn::from(ARN));
    repo
}

pub fn pairs(tags: &[(&str, &str)]) -> Vec<(String, String)> {
    tags.iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
