//! S3-backed [`ObjectStore`] implementation.

use async_trait::async_trait;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;

use storynest_core::ports::{ObjectStore, StorageError};

/// Object store writing to a single public S3 bucket.
///
/// Credentials come from the ambient AWS provider chain (environment,
/// profile, instance role); bucket and region are explicit configuration.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    region: String,
}

impl S3ObjectStore {
    /// Build a store for `bucket` in `region` using the default credential
    /// chain.
    pub async fn new(bucket: String, region: String) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(region.clone()))
            .load()
            .await;
        Self {
            client: aws_sdk_s3::Client::new(&config),
            bucket,
            region,
        }
    }

    /// Public virtual-hosted-style URL for an object key.
    pub fn public_url(&self, key: &str) -> String {
        format!(
            "https://{bucket}.s3.{region}.amazonaws.com/{key}",
            bucket = self.bucket,
            region = self.region,
        )
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(
        &self,
        key: &str,
        bytes: Bytes,
        content_type: &str,
        cache_control: &str,
    ) -> Result<String, StorageError> {
        let size = bytes.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .cache_control(cache_control)
            .send()
            .await
            .map_err(|e| StorageError::Upload {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!(key, size, "Stored object");
        Ok(self.public_url(key))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        // S3 DeleteObject is idempotent; a missing key succeeds.
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Delete {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }
}
