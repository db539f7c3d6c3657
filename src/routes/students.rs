use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::entities::faculty;
use crate::error::AppError;
use crate::models::student::{StudentInput, StudentResponse, StudentSummary};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeRange {
    pub min_age: i32,
    pub max_age: i32,
}

#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: String,
}

/// Cyrillic lower-case "а".
const DEFAULT_NAME_PREFIX: &str = "\u{430}";

#[derive(Debug, Deserialize)]
pub struct PrefixQuery {
    pub prefix: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub message: String,
    pub id: i32,
}

fn students(models: Vec<crate::entities::student::Model>) -> Json<Vec<StudentResponse>> {
    Json(models.into_iter().map(StudentResponse::from).collect())
}

// GET /student
pub async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<StudentResponse>>, AppError> {
    Ok(students(state.students.find_all_students().await?))
}

// GET /student/{id}/find-student
pub async fn find_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<StudentResponse>, AppError> {
    let student = state.students.find_student(id).await?;
    Ok(Json(StudentResponse::from(student)))
}

// POST /student/add-student
pub async fn create_student(
    State(state): State<AppState>,
    Json(payload): Json<StudentInput>,
) -> Result<Json<StudentResponse>, AppError> {
    let created = state.students.create_student(payload).await?;
    Ok(Json(StudentResponse::from(created)))
}

// PUT /student/{id}/edite
pub async fn edit_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<StudentInput>,
) -> Result<Json<StudentResponse>, AppError> {
    let updated = state.students.edit_student(id, payload).await?;
    Ok(Json(StudentResponse::from(updated)))
}

// DELETE /student/{id}/delete-student
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DeletedResponse>, AppError> {
    state.students.delete_student(id).await?;
    Ok(Json(DeletedResponse {
        message: "Student deleted successfully".to_string(),
        id,
    }))
}

// GET /student/by-age?minAge=&maxAge=
pub async fn students_by_age(
    State(state): State<AppState>,
    query: Result<Query<AgeRange>, QueryRejection>,
) -> Result<Json<Vec<StudentResponse>>, AppError> {
    let Query(range) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    if range.min_age > range.max_age {
        return Err(AppError::BadRequest(format!(
            "minAge ({}) must not be greater than maxAge ({})",
            range.min_age, range.max_age
        )));
    }

    Ok(students(
        state.students.find_by_age_between(range.min_age, range.max_age).await?,
    ))
}

// GET /student/by-name?name=
pub async fn students_by_name(
    State(state): State<AppState>,
    query: Result<Query<NameQuery>, QueryRejection>,
) -> Result<Json<Vec<StudentResponse>>, AppError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    Ok(students(state.students.find_by_name(&query.name).await?))
}

// GET /student/names-starting-with?prefix=
pub async fn names_starting_with(
    State(state): State<AppState>,
    Query(query): Query<PrefixQuery>,
) -> Result<Json<Vec<StudentResponse>>, AppError> {
    let prefix = query.prefix.unwrap_or_else(|| DEFAULT_NAME_PREFIX.to_string());
    Ok(students(state.students.names_starting_with(&prefix).await?))
}

// GET /student/{id}/faculty-by-student
pub async fn faculty_by_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Option<faculty::Model>>, AppError> {
    Ok(Json(state.students.get_faculty_by_student_id(id).await?))
}

// PUT /student/{id}/faculty/{faculty_id}
pub async fn assign_faculty(
    State(state): State<AppState>,
    Path((id, faculty_id)): Path<(i32, i32)>,
) -> Result<Json<StudentResponse>, AppError> {
    let student = state.students.assign_faculty_to_student(id, faculty_id).await?;
    Ok(Json(StudentResponse::from(student)))
}

// GET /student/count
pub async fn count_students(State(state): State<AppState>) -> Result<Json<u64>, AppError> {
    Ok(Json(state.students.count_all_students().await?))
}

// GET /student/average-age
pub async fn average_age(State(state): State<AppState>) -> Result<Json<Option<f64>>, AppError> {
    Ok(Json(state.students.get_average_age().await?))
}

// GET /student/last-five
pub async fn last_five(State(state): State<AppState>) -> Result<Json<Vec<StudentSummary>>, AppError> {
    Ok(Json(state.students.find_last_five_students().await?))
}
