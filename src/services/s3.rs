use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use crate::config::S3Settings;
use crate::services::blob_store::{BlobError, BlobStore};

/// Avatar storage in an S3-compatible bucket. Locations are object keys.
#[derive(Clone)]
pub struct S3BlobStore {
    client: Client,
    pub bucket_name: String,
}

impl S3BlobStore {
    pub fn new(settings: &S3Settings) -> Self {
        let credentials = aws_sdk_s3::config::Credentials::new(
            settings.access_key_id.clone(),
            settings.secret_access_key.clone(),
            None,
            None,
            "manual_config",
        );

        let region = aws_sdk_s3::config::Region::new(settings.region.clone());

        let mut s3_config_builder = aws_sdk_s3::config::Builder::new()
            .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
            .region(region)
            .credentials_provider(credentials);

        if let Some(endpoint) = &settings.endpoint {
            s3_config_builder = s3_config_builder
                .endpoint_url(endpoint)
                .force_path_style(true);
        }

        let client = Client::from_conf(s3_config_builder.build());

        Self {
            client,
            bucket_name: settings.bucket_name.clone(),
        }
    }

    pub async fn ensure_bucket_exists(&self) -> Result<(), BlobError> {
        if self.client.head_bucket().bucket(&self.bucket_name).send().await.is_ok() {
            return Ok(());
        }

        tracing::info!(bucket = %self.bucket_name, "Bucket does not exist, creating it");
        self.client
            .create_bucket()
            .bucket(&self.bucket_name)
            .send()
            .await
            .map_err(|e| BlobError::Backend(format!("failed to create bucket: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String, BlobError> {
        self.client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| BlobError::Backend(format!("failed to upload {}: {}", key, e)))?;

        Ok(key.to_string())
    }

    async fn get(&self, location: &str) -> Result<Vec<u8>, BlobError> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket_name)
            .key(location)
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_no_such_key() {
                    BlobError::NotFound(location.to_string())
                } else {
                    BlobError::Backend(format!("failed to download {}: {}", location, service_error))
                }
            })?;

        let data = resp
            .body
            .collect()
            .await
            .map_err(|e| BlobError::Backend(format!("failed to read body of {}: {}", location, e)))?;

        Ok(data.into_bytes().to_vec())
    }

    async fn delete(&self, location: &str) -> Result<(), BlobError> {
        self.client
            .delete_object()
            .bucket(&self.bucket_name)
            .key(location)
            .send()
            .await
            .map_err(|e| BlobError::Backend(format!("failed to delete {}: {}", location, e)))?;

        Ok(())
    }
}
