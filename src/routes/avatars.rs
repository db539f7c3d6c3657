use axum::{
    extract::{rejection::QueryRejection, Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};

use crate::error::AppError;
use crate::models::avatar::{AvatarContent, AvatarMeta, AvatarUpload};
use crate::pagination::{PaginatedResponse, Pagination};
use crate::state::AppState;

/// Multipart field carrying the image.
const AVATAR_FIELD: &str = "avatar";

fn avatar_response(content: AvatarContent) -> Response {
    ([(header::CONTENT_TYPE, content.media_type)], content.data).into_response()
}

// POST /avatar/{id}/avatar
pub async fn upload_avatar(
    State(state): State<AppState>,
    Path(student_id): Path<i32>,
    mut multipart: Multipart,
) -> Result<StatusCode, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(AVATAR_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or("avatar").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        state
            .avatars
            .upload_avatar(
                student_id,
                AvatarUpload {
                    filename,
                    content_type,
                    data: data.to_vec(),
                },
            )
            .await?;

        return Ok(StatusCode::NO_CONTENT);
    }

    tracing::warn!(student_id, "Avatar upload without an avatar field");
    Err(AppError::BadRequest("No avatar field found".to_string()))
}

// GET /avatar?page=&limit=
pub async fn list_avatars(
    State(state): State<AppState>,
    query: Result<Query<Pagination>, QueryRejection>,
) -> Result<Json<PaginatedResponse<AvatarMeta>>, AppError> {
    let Query(pagination) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let (page, limit) = pagination.resolve()?;

    let result = state.avatars.get_all_avatars(page, limit).await?;
    Ok(Json(PaginatedResponse::new(result.items, result.total_items, page, limit)))
}

// GET /avatar/{id}/avatar-from-db
pub async fn avatar_from_db(
    State(state): State<AppState>,
    Path(student_id): Path<i32>,
) -> Result<Response, AppError> {
    let content = state.avatars.read_avatar_from_db(student_id).await?;
    Ok(avatar_response(content))
}

// GET /avatar/{id}/avatar-from-file
pub async fn avatar_from_file(
    State(state): State<AppState>,
    Path(student_id): Path<i32>,
) -> Result<Response, AppError> {
    let content = state.avatars.read_avatar_from_file(student_id).await?;
    Ok(avatar_response(content))
}
