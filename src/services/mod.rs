pub mod avatar;
pub mod blob_store;
pub mod faculty;
pub mod s3;
pub mod student;

use std::sync::Arc;

use crate::config::AvatarStorage;
use blob_store::{BlobError, BlobStore, FsBlobStore};
use s3::S3BlobStore;

/// Builds the blob store selected by configuration.
pub async fn build_blob_store(storage: &AvatarStorage) -> Result<Arc<dyn BlobStore>, BlobError> {
    match storage {
        AvatarStorage::Filesystem { dir } => {
            tokio::fs::create_dir_all(dir).await?;
            tracing::info!(dir = %dir.display(), "Storing avatars on the local filesystem");
            Ok(Arc::new(FsBlobStore::new(dir.clone())))
        }
        AvatarStorage::S3(settings) => {
            let store = S3BlobStore::new(settings);
            store.ensure_bucket_exists().await?;
            tracing::info!(bucket = %store.bucket_name, "Storing avatars in S3");
            Ok(Arc::new(store))
        }
    }
}

/// Best-effort removal of blobs whose rows are already gone.
pub(crate) async fn remove_blobs(blobs: &dyn BlobStore, locations: Vec<String>) {
    for location in locations {
        if let Err(e) = blobs.delete(&location).await {
            tracing::warn!(location = %location, error = %e, "Failed to remove avatar blob");
        }
    }
}
