use std::sync::Arc;

use sea_orm::{DatabaseConnection, IntoActiveModel, Set, TransactionTrait};

use crate::entities::{faculty, student};
use crate::error::{AppError, EntityKind};
use crate::models::faculty::FacultyInput;
use crate::repositories;
use crate::services::blob_store::BlobStore;

use super::remove_blobs;

#[derive(Clone)]
pub struct FacultyService {
    db: DatabaseConnection,
    blobs: Arc<dyn BlobStore>,
}

impl FacultyService {
    pub fn new(db: DatabaseConnection, blobs: Arc<dyn BlobStore>) -> Self {
        Self { db, blobs }
    }

    pub async fn create_faculty(&self, input: FacultyInput) -> Result<faculty::Model, AppError> {
        tracing::info!(name = %input.name, color = %input.color, "Creating faculty");
        Ok(repositories::faculty::insert(&self.db, input).await?)
    }

    pub async fn find_faculty(&self, id: i32) -> Result<faculty::Model, AppError> {
        tracing::info!(id, "Finding faculty");
        repositories::faculty::find_by_id(&self.db, id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(id, "Faculty not found");
                AppError::not_found(EntityKind::Faculty, id)
            })
    }

    pub async fn edit_faculty(&self, id: i32, input: FacultyInput) -> Result<faculty::Model, AppError> {
        tracing::info!(id, "Editing faculty");
        let existing = self.find_faculty(id).await?;

        let mut active = existing.into_active_model();
        active.name = Set(input.name);
        active.color = Set(input.color);

        Ok(repositories::faculty::update(&self.db, active).await?)
    }

    /// Deletes the faculty and cascades to its students and their avatars.
    pub async fn delete_faculty(&self, id: i32) -> Result<(), AppError> {
        tracing::info!(id, "Deleting faculty");
        let txn = self.db.begin().await?;

        if repositories::faculty::find_by_id(&txn, id).await?.is_none() {
            tracing::warn!(id, "Faculty not found");
            return Err(AppError::not_found(EntityKind::Faculty, id));
        }

        let student_ids = repositories::student::ids_by_faculty(&txn, id).await?;
        let blob_paths =
            repositories::avatar::file_paths_for_students(&txn, student_ids.clone()).await?;
        repositories::avatar::delete_by_student_ids(&txn, student_ids).await?;
        let removed_students = repositories::student::delete_by_faculty(&txn, id).await?;
        repositories::faculty::delete_by_id(&txn, id).await?;
        txn.commit().await?;

        remove_blobs(self.blobs.as_ref(), blob_paths).await;
        tracing::debug!(id, removed_students, "Faculty deleted");
        Ok(())
    }

    pub async fn find_by_color(&self, color: &str) -> Result<Vec<faculty::Model>, AppError> {
        tracing::info!(color, "Finding faculties by color");
        Ok(repositories::faculty::find_by_color_containing(&self.db, color).await?)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Vec<faculty::Model>, AppError> {
        tracing::info!(name, "Finding faculties by name");
        Ok(repositories::faculty::find_by_name_containing(&self.db, name).await?)
    }

    pub async fn find_all_faculty(&self) -> Result<Vec<faculty::Model>, AppError> {
        tracing::info!("Finding all faculties");
        Ok(repositories::faculty::find_all(&self.db).await?)
    }

    pub async fn get_students_by_faculty(&self, id: i32) -> Result<Vec<student::Model>, AppError> {
        tracing::info!(id, "Finding students of faculty");
        let faculty = self.find_faculty(id).await?;
        Ok(repositories::student::find_by_faculty(&self.db, faculty.id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::avatar::AvatarUpload;
    use crate::models::student::StudentInput;
    use crate::services::avatar::AvatarService;
    use crate::services::blob_store::FsBlobStore;
    use crate::services::student::StudentService;
    use crate::test_support::test_db;

    struct Fixture {
        faculties: FacultyService,
        students: StudentService,
        avatars: AvatarService,
        _dir: tempfile::TempDir,
    }

    async fn fixture() -> Fixture {
        let db = test_db().await;
        let dir = tempfile::tempdir().unwrap();
        let blobs: Arc<dyn BlobStore> = Arc::new(FsBlobStore::new(dir.path()));
        Fixture {
            faculties: FacultyService::new(db.clone(), blobs.clone()),
            students: StudentService::new(db.clone(), blobs.clone()),
            avatars: AvatarService::new(db, blobs, true),
            _dir: dir,
        }
    }

    fn java() -> FacultyInput {
        FacultyInput {
            name: "Java".into(),
            color: "Black".into(),
        }
    }

    #[tokio::test]
    async fn edit_replaces_name_and_color() {
        let f = fixture().await;
        let created = f.faculties.create_faculty(java()).await.unwrap();

        let edited = f
            .faculties
            .edit_faculty(
                created.id,
                FacultyInput {
                    name: "Kotlin".into(),
                    color: "Purple".into(),
                },
            )
            .await
            .unwrap();

        assert_eq!(edited.id, created.id);
        assert_eq!(f.faculties.find_faculty(created.id).await.unwrap(), edited);
    }

    #[tokio::test]
    async fn missing_faculty_is_not_found() {
        let f = fixture().await;

        let err = f.faculties.find_faculty(5).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { kind: EntityKind::Faculty, id: 5 }));

        let err = f.faculties.get_students_by_faculty(5).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { kind: EntityKind::Faculty, id: 5 }));

        let err = f.faculties.delete_faculty(5).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { kind: EntityKind::Faculty, id: 5 }));
    }

    #[tokio::test]
    async fn students_of_faculty_only_lists_members() {
        let f = fixture().await;
        let faculty = f.faculties.create_faculty(java()).await.unwrap();
        assert!(f.faculties.get_students_by_faculty(faculty.id).await.unwrap().is_empty());

        let member = f
            .students
            .create_student(StudentInput { name: "Oleg".into(), age: 18 })
            .await
            .unwrap();
        f.students
            .create_student(StudentInput { name: "Ivan".into(), age: 19 })
            .await
            .unwrap();
        f.students.assign_faculty_to_student(member.id, faculty.id).await.unwrap();

        let members = f.faculties.get_students_by_faculty(faculty.id).await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].id, member.id);
    }

    #[tokio::test]
    async fn delete_cascades_to_students_and_avatars() {
        let f = fixture().await;
        let faculty = f.faculties.create_faculty(java()).await.unwrap();
        let member = f
            .students
            .create_student(StudentInput { name: "Oleg".into(), age: 18 })
            .await
            .unwrap();
        let outsider = f
            .students
            .create_student(StudentInput { name: "Ivan".into(), age: 19 })
            .await
            .unwrap();
        f.students.assign_faculty_to_student(member.id, faculty.id).await.unwrap();
        let avatar = f
            .avatars
            .upload_avatar(
                member.id,
                AvatarUpload {
                    filename: "oleg.png".into(),
                    content_type: "image/png".into(),
                    data: b"PNG".to_vec(),
                },
            )
            .await
            .unwrap();
        let blob_path = avatar.file_path.clone().unwrap();

        f.faculties.delete_faculty(faculty.id).await.unwrap();

        assert!(f.faculties.find_faculty(faculty.id).await.is_err());
        assert!(f.students.find_student(member.id).await.is_err());
        assert!(f.students.find_student(outsider.id).await.is_ok());
        assert_eq!(f.avatars.find_avatar(avatar.id).await.unwrap(), None);
        assert!(!std::path::Path::new(&blob_path).exists());
    }
}
