use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlobError {
    #[error("blob not found at {0}")]
    NotFound(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// External byte storage for avatar files.
///
/// `put` hands back the location that must be passed to `get` and `delete`
/// later; callers persist that string rather than rebuilding it.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String, BlobError>;

    async fn get(&self, location: &str) -> Result<Vec<u8>, BlobError>;

    async fn delete(&self, location: &str) -> Result<(), BlobError>;
}

/// Stores blobs as plain files under a root directory.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&self, key: &str, data: Vec<u8>, _content_type: &str) -> Result<String, BlobError> {
        tokio::fs::create_dir_all(&self.root).await?;
        let path = self.root.join(key);
        tokio::fs::write(&path, data).await?;
        Ok(path.to_string_lossy().into_owned())
    }

    async fn get(&self, location: &str) -> Result<Vec<u8>, BlobError> {
        tokio::fs::read(location).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => BlobError::NotFound(location.to_string()),
            _ => BlobError::Io(e),
        })
    }

    async fn delete(&self, location: &str) -> Result<(), BlobError> {
        match tokio::fs::remove_file(location).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BlobError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get_returns_same_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::new(dir.path().join("avatars"));

        let location = store.put("7.png", b"PNG".to_vec(), "image/png").await.unwrap();
        assert!(location.ends_with("7.png"));
        assert_eq!(store.get(&location).await.unwrap(), b"PNG".to_vec());
    }

    #[tokio::test]
    async fn get_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::new(dir.path());
        let missing = dir.path().join("nope.png");

        let err = store.get(missing.to_str().unwrap()).await.unwrap_err();
        assert!(matches!(err, BlobError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_is_quiet_for_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::new(dir.path());

        let location = store.put("1.jpg", vec![1, 2, 3], "image/jpeg").await.unwrap();
        store.delete(&location).await.unwrap();
        store.delete(&location).await.unwrap();
        assert!(store.get(&location).await.is_err());
    }
}
