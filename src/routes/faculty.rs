use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::entities::faculty;
use crate::error::AppError;
use crate::models::faculty::FacultyInput;
use crate::models::student::StudentResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ColorQuery {
    pub color: String,
}

#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub message: String,
    pub id: i32,
}

// GET /faculty
pub async fn list_faculty(State(state): State<AppState>) -> Result<Json<Vec<faculty::Model>>, AppError> {
    Ok(Json(state.faculties.find_all_faculty().await?))
}

// GET /faculty/{id}/find-faculty
pub async fn find_faculty(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<faculty::Model>, AppError> {
    Ok(Json(state.faculties.find_faculty(id).await?))
}

// POST /faculty/add-faculty
pub async fn create_faculty(
    State(state): State<AppState>,
    Json(payload): Json<FacultyInput>,
) -> Result<Json<faculty::Model>, AppError> {
    Ok(Json(state.faculties.create_faculty(payload).await?))
}

// PUT /faculty/{id}/update
pub async fn update_faculty(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<FacultyInput>,
) -> Result<Json<faculty::Model>, AppError> {
    Ok(Json(state.faculties.edit_faculty(id, payload).await?))
}

// DELETE /faculty/{id}/delete
pub async fn delete_faculty(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DeletedResponse>, AppError> {
    state.faculties.delete_faculty(id).await?;
    Ok(Json(DeletedResponse {
        message: "Faculty deleted successfully".to_string(),
        id,
    }))
}

// GET /faculty/color?color=
pub async fn faculty_by_color(
    State(state): State<AppState>,
    query: Result<Query<ColorQuery>, QueryRejection>,
) -> Result<Json<Vec<faculty::Model>>, AppError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    Ok(Json(state.faculties.find_by_color(&query.color).await?))
}

// GET /faculty/by-name?name=
pub async fn faculty_by_name(
    State(state): State<AppState>,
    query: Result<Query<NameQuery>, QueryRejection>,
) -> Result<Json<Vec<faculty::Model>>, AppError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    Ok(Json(state.faculties.find_by_name(&query.name).await?))
}

// GET /faculty/{id}/students-faculty
pub async fn students_of_faculty(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<StudentResponse>>, AppError> {
    let students = state.faculties.get_students_by_faculty(id).await?;
    Ok(Json(students.into_iter().map(StudentResponse::from).collect()))
}
