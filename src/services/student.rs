use std::sync::Arc;

use sea_orm::{DatabaseConnection, IntoActiveModel, Set, TransactionTrait};

use crate::entities::{faculty, student};
use crate::error::{AppError, EntityKind};
use crate::models::student::{StudentInput, StudentSummary};
use crate::repositories;
use crate::services::blob_store::BlobStore;

use super::remove_blobs;

const LAST_STUDENTS_PAGE_SIZE: u64 = 5;

#[derive(Clone)]
pub struct StudentService {
    db: DatabaseConnection,
    blobs: Arc<dyn BlobStore>,
}

impl StudentService {
    pub fn new(db: DatabaseConnection, blobs: Arc<dyn BlobStore>) -> Self {
        Self { db, blobs }
    }

    pub async fn create_student(&self, input: StudentInput) -> Result<student::Model, AppError> {
        tracing::info!(name = %input.name, age = input.age, "Creating student");
        let created = repositories::student::insert(&self.db, input).await?;
        tracing::debug!(id = created.id, "Student created");
        Ok(created)
    }

    pub async fn find_student(&self, id: i32) -> Result<student::Model, AppError> {
        tracing::info!(id, "Finding student");
        repositories::student::find_by_id(&self.db, id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(id, "Student not found");
                AppError::not_found(EntityKind::Student, id)
            })
    }

    /// Replaces name and age. The faculty association is left as it is.
    pub async fn edit_student(&self, id: i32, input: StudentInput) -> Result<student::Model, AppError> {
        tracing::info!(id, "Editing student");
        let existing = self.find_student(id).await?;

        let mut active = existing.into_active_model();
        active.name = Set(input.name);
        active.age = Set(input.age);

        Ok(repositories::student::update(&self.db, active).await?)
    }

    /// Deletes the student together with its avatar row and stored file.
    pub async fn delete_student(&self, id: i32) -> Result<(), AppError> {
        tracing::info!(id, "Deleting student");
        let txn = self.db.begin().await?;

        if repositories::student::find_by_id(&txn, id).await?.is_none() {
            tracing::warn!(id, "Student not found");
            return Err(AppError::not_found(EntityKind::Student, id));
        }

        let blob_paths = repositories::avatar::file_paths_for_students(&txn, vec![id]).await?;
        repositories::avatar::delete_by_student_ids(&txn, vec![id]).await?;
        repositories::student::delete_by_id(&txn, id).await?;
        txn.commit().await?;

        remove_blobs(self.blobs.as_ref(), blob_paths).await;
        tracing::debug!(id, "Student deleted");
        Ok(())
    }

    pub async fn find_by_age_between(&self, min_age: i32, max_age: i32) -> Result<Vec<student::Model>, AppError> {
        tracing::info!(min_age, max_age, "Finding students by age");
        Ok(repositories::student::find_by_age_between(&self.db, min_age, max_age).await?)
    }

    pub async fn find_all_students(&self) -> Result<Vec<student::Model>, AppError> {
        tracing::info!("Finding all students");
        Ok(repositories::student::find_all(&self.db).await?)
    }

    pub async fn find_by_name(&self, fragment: &str) -> Result<Vec<student::Model>, AppError> {
        tracing::info!(fragment, "Finding students by name");
        Ok(repositories::student::find_by_name_containing(&self.db, fragment).await?)
    }

    /// Students whose name starts with `prefix`, names upper-cased and sorted.
    pub async fn names_starting_with(&self, prefix: &str) -> Result<Vec<student::Model>, AppError> {
        tracing::info!(prefix, "Listing students by name prefix");
        let mut students = repositories::student::find_by_name_prefix(&self.db, prefix).await?;
        for s in students.iter_mut() {
            s.name = s.name.to_uppercase();
        }
        students.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(students)
    }

    /// `Ok(None)` means the student exists but has no faculty.
    pub async fn get_faculty_by_student_id(&self, id: i32) -> Result<Option<faculty::Model>, AppError> {
        tracing::info!(id, "Finding faculty of student");
        let student = self.find_student(id).await?;

        match student.faculty_id {
            Some(faculty_id) => Ok(repositories::faculty::find_by_id(&self.db, faculty_id).await?),
            None => Ok(None),
        }
    }

    pub async fn assign_faculty_to_student(
        &self,
        student_id: i32,
        faculty_id: i32,
    ) -> Result<student::Model, AppError> {
        tracing::info!(student_id, faculty_id, "Assigning faculty to student");
        let student = repositories::student::find_by_id(&self.db, student_id)
            .await?
            .ok_or_else(|| AppError::not_found(EntityKind::Student, student_id))?;
        let faculty = repositories::faculty::find_by_id(&self.db, faculty_id)
            .await?
            .ok_or_else(|| AppError::not_found(EntityKind::Faculty, faculty_id))?;

        let mut active = student.into_active_model();
        active.faculty_id = Set(Some(faculty.id));
        Ok(repositories::student::update(&self.db, active).await?)
    }

    pub async fn count_all_students(&self) -> Result<u64, AppError> {
        tracing::info!("Counting students");
        Ok(repositories::student::count(&self.db).await?)
    }

    pub async fn get_average_age(&self) -> Result<Option<f64>, AppError> {
        tracing::info!("Computing average student age");
        Ok(repositories::student::average_age(&self.db).await?)
    }

    pub async fn find_last_five_students(&self) -> Result<Vec<StudentSummary>, AppError> {
        tracing::info!("Finding last five students");
        let latest = repositories::student::find_latest(&self.db, LAST_STUDENTS_PAGE_SIZE).await?;
        Ok(latest.into_iter().map(StudentSummary::from).collect())
    }
}
