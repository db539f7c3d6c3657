use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::services::blob_store::BlobError;

/// The kind of record a failed lookup was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Student,
    Faculty,
    Avatar,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Student => "Student",
            EntityKind::Faculty => "Faculty",
            EntityKind::Avatar => "Avatar",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub enum AppError {
    DatabaseError(sea_orm::DbErr),
    Storage(BlobError),
    NotFound { kind: EntityKind, id: i32 },
    BadRequest(String),
}

impl AppError {
    pub fn not_found(kind: EntityKind, id: i32) -> Self {
        AppError::NotFound { kind, id }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DatabaseError(e) => write!(f, "database error: {}", e),
            AppError::Storage(e) => write!(f, "storage error: {}", e),
            AppError::NotFound { kind, id } => write!(f, "{} with id {} not found", kind, id),
            AppError::BadRequest(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::DatabaseError(e) => {
                tracing::error!(error = %e, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::Storage(e) => {
                tracing::error!(error = %e, "Avatar storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            not_found @ AppError::NotFound { .. } => (StatusCode::NOT_FOUND, not_found.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::DatabaseError(err)
    }
}

impl From<BlobError> for AppError {
    fn from(err: BlobError) -> Self {
        AppError::Storage(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_kind_and_id() {
        let err = AppError::not_found(EntityKind::Faculty, 42);
        assert_eq!(err.to_string(), "Faculty with id 42 not found");
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = AppError::not_found(EntityKind::Student, 1).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn database_error_is_hidden_behind_500() {
        let response = AppError::from(sea_orm::DbErr::Custom("boom".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
