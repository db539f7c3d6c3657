use std::sync::Arc;

use sea_orm::{DatabaseConnection, Set, TransactionTrait};

use crate::entities::avatar;
use crate::error::{AppError, EntityKind};
use crate::models::avatar::{AvatarContent, AvatarUpload};
use crate::repositories;
use crate::repositories::avatar::AvatarPage;
use crate::services::blob_store::BlobStore;

use super::remove_blobs;

#[derive(Clone)]
pub struct AvatarService {
    db: DatabaseConnection,
    blobs: Arc<dyn BlobStore>,
    store_in_db: bool,
}

impl AvatarService {
    /// `store_in_db` keeps an inline copy of the bytes in the avatar row.
    pub fn new(db: DatabaseConnection, blobs: Arc<dyn BlobStore>, store_in_db: bool) -> Self {
        Self {
            db,
            blobs,
            store_in_db,
        }
    }

    /// Stores the file and creates or replaces the student's avatar row.
    ///
    /// The blob is written before the row. A failure between the two leaves
    /// the new file in place with the previous row still pointing wherever it
    /// pointed before. Concurrent uploads for one student both succeed and the
    /// last writer's row wins.
    pub async fn upload_avatar(&self, student_id: i32, upload: AvatarUpload) -> Result<avatar::Model, AppError> {
        tracing::info!(student_id, filename = %upload.filename, size = upload.data.len(), "Uploading avatar");

        if upload.data.is_empty() {
            return Err(AppError::BadRequest("Avatar must not be empty".to_string()));
        }

        let student = repositories::student::find_by_id(&self.db, student_id)
            .await?
            .ok_or_else(|| AppError::not_found(EntityKind::Student, student_id))?;

        let key = format!("{}.{}", student.id, upload.extension());
        let file_size = upload.data.len() as i64;
        let inline = self.store_in_db.then(|| upload.data.clone());
        let location = self.blobs.put(&key, upload.data, &upload.content_type).await?;

        let previous_location = repositories::avatar::find_by_student_id(&self.db, student.id)
            .await?
            .and_then(|a| a.file_path);

        let active = avatar::ActiveModel {
            student_id: Set(student.id),
            file_path: Set(Some(location.clone())),
            file_size: Set(file_size),
            media_type: Set(upload.content_type),
            data: Set(inline),
            ..Default::default()
        };

        let txn = self.db.begin().await?;
        repositories::avatar::upsert(&txn, active).await?;
        let saved = repositories::avatar::find_by_student_id(&txn, student.id)
            .await?
            .ok_or_else(|| AppError::not_found(EntityKind::Avatar, student.id))?;
        txn.commit().await?;

        if let Some(previous) = previous_location.filter(|p| *p != location) {
            remove_blobs(self.blobs.as_ref(), vec![previous]).await;
        }

        tracing::debug!(student_id, avatar_id = saved.id, location = %location, "Avatar stored");
        Ok(saved)
    }

    pub async fn find_avatar(&self, id: i32) -> Result<Option<avatar::Model>, AppError> {
        Ok(repositories::avatar::find_by_id(&self.db, id).await?)
    }

    pub async fn find_avatar_by_student(&self, student_id: i32) -> Result<Option<avatar::Model>, AppError> {
        Ok(repositories::avatar::find_by_student_id(&self.db, student_id).await?)
    }

    /// `page` is 1-based.
    pub async fn get_all_avatars(&self, page: u64, limit: u64) -> Result<AvatarPage, AppError> {
        tracing::info!(page, limit, "Listing avatars");
        Ok(repositories::avatar::page(&self.db, page, limit).await?)
    }

    /// Bytes kept inline in the avatar row.
    pub async fn read_avatar_from_db(&self, student_id: i32) -> Result<AvatarContent, AppError> {
        let avatar = self
            .find_avatar_by_student(student_id)
            .await?
            .ok_or_else(|| AppError::not_found(EntityKind::Avatar, student_id))?;

        match avatar.data {
            Some(data) => Ok(AvatarContent {
                media_type: avatar.media_type,
                data,
            }),
            None => {
                tracing::warn!(student_id, "Avatar has no inline copy");
                Err(AppError::not_found(EntityKind::Avatar, student_id))
            }
        }
    }

    /// Bytes read back from the blob store. Any read failure is reported as
    /// a missing avatar.
    pub async fn read_avatar_from_file(&self, student_id: i32) -> Result<AvatarContent, AppError> {
        let avatar = self
            .find_avatar_by_student(student_id)
            .await?
            .ok_or_else(|| AppError::not_found(EntityKind::Avatar, student_id))?;

        let location = avatar
            .file_path
            .ok_or_else(|| AppError::not_found(EntityKind::Avatar, student_id))?;

        match self.blobs.get(&location).await {
            Ok(data) => Ok(AvatarContent {
                media_type: avatar.media_type,
                data,
            }),
            Err(e) => {
                tracing::warn!(student_id, location = %location, error = %e, "Failed to read avatar file");
                Err(AppError::not_found(EntityKind::Avatar, student_id))
            }
        }
    }
}
