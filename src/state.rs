use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::services::avatar::AvatarService;
use crate::services::blob_store::BlobStore;
use crate::services::faculty::FacultyService;
use crate::services::student::StudentService;

#[derive(Clone)]
pub struct AppState {
    pub students: StudentService,
    pub faculties: FacultyService,
    pub avatars: AvatarService,
    pub port: u16,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        blobs: Arc<dyn BlobStore>,
        avatar_store_in_db: bool,
        port: u16,
    ) -> Self {
        Self {
            students: StudentService::new(db.clone(), blobs.clone()),
            faculties: FacultyService::new(db.clone(), blobs.clone()),
            avatars: AvatarService::new(db, blobs, avatar_store_in_db),
            port,
        }
    }
}
