//! [`TagApi`] backed by the AWS SDK for ECR Public.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_ecrpublic::config::Region;
use aws_sdk_ecrpublic::error::DisplayErrorContext;
use aws_sdk_ecrpublic::types::Tag as SdkTag;
use aws_sdk_ecrpublic::Client;

use ecrpublic_core::types::{ResourceArn, Tag};

use crate::api::{TagApi, LIST_TAGS_FOR_RESOURCE, TAG_RESOURCE, UNTAG_RESOURCE};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::metrics::{self, OP_GET, OP_UPDATE};

#[derive(Debug, Clone)]
pub struct EcrPublicTagApi {
    client: Client,
}

impl EcrPublicTagApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build an SDK client from the default credential chain, with region and
    /// endpoint taken from `config`.
    pub async fn from_config(config: &ClientConfig) -> Self {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));
        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint.clone());
        }
        let sdk_config = loader.load().await;
        tracing::debug!(
            region = %config.region,
            endpoint = config.endpoint_url.as_deref().unwrap_or("default"),
            "ecrpublic client configured",
        );
        Self::new(Client::new(&sdk_config))
    }
}

#[async_trait]
impl TagApi for EcrPublicTagApi {
    async fn tag_resource(&self, arn: &ResourceArn, tags: &[Tag]) -> Result<(), ApiError> {
        let result = self
            .client
            .tag_resource()
            .resource_arn(arn.as_str())
            .set_tags(Some(sdk_tags(tags)))
            .send()
            .await;
        record_api_call(OP_UPDATE, TAG_RESOURCE, &result);
        result.map(|_| ()).map_err(|e| ApiError::new(TAG_RESOURCE, e))
    }

    async fn untag_resource(&self, arn: &ResourceArn, keys: &[String]) -> Result<(), ApiError> {
        let result = self
            .client
            .untag_resource()
            .resource_arn(arn.as_str())
            .set_tag_keys(Some(keys.to_vec()))
            .send()
            .await;
        record_api_call(OP_UPDATE, UNTAG_RESOURCE, &result);
        result.map(|_| ()).map_err(|e| ApiError::new(UNTAG_RESOURCE, e))
    }

    async fn list_tags_for_resource(&self, arn: &ResourceArn) -> Result<Vec<Tag>, ApiError> {
        let result = self
            .client
            .list_tags_for_resource()
            .resource_arn(arn.as_str())
            .send()
            .await;
        record_api_call(OP_GET, LIST_TAGS_FOR_RESOURCE, &result);
        let output = result.map_err(|e| ApiError::new(LIST_TAGS_FOR_RESOURCE, e))?;
        Ok(output
            .tags()
            .iter()
            .map(|tag| Tag {
                key: tag.key().map(str::to_owned),
                value: tag.value().map(str::to_owned),
            })
            .collect())
    }
}

/// Convert resource tags to SDK tags, keeping absent halves absent.
fn sdk_tags(tags: &[Tag]) -> Vec<SdkTag> {
    tags.iter()
        .map(|tag| {
            SdkTag::builder()
                .set_key(tag.key.clone())
                .set_value(tag.value.clone())
                .build()
        })
        .collect()
}

/// Log and count one remote call.
fn record_api_call<T, E>(op_type: &'static str, operation: &'static str, result: &Result<T, E>)
where
    E: std::error::Error + 'static,
{
    match result {
        Ok(_) => tracing::info!(op_type, operation, outcome = "ok", "ecrpublic api call"),
        Err(err) => tracing::warn!(
            op_type,
            operation,
            outcome = "error",
            error = %DisplayErrorContext(err),
            "ecrpublic api call",
        ),
    }
    metrics::record_api_call(op_type, operation, result.is_ok());
}
