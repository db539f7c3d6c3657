use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use crate::entities::avatar;

/// Avatar row without the inline bytes.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult, Serialize, Deserialize)]
pub struct AvatarMeta {
    pub id: i32,
    pub file_path: Option<String>,
    pub file_size: i64,
    pub media_type: String,
    pub student_id: i32,
}

impl From<avatar::Model> for AvatarMeta {
    fn from(model: avatar::Model) -> Self {
        Self {
            id: model.id,
            file_path: model.file_path,
            file_size: model.file_size,
            media_type: model.media_type,
            student_id: model.student_id,
        }
    }
}

/// An uploaded avatar file as received from the client.
#[derive(Debug, Clone)]
pub struct AvatarUpload {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl AvatarUpload {
    /// File extension of the original filename, `bin` when there is none.
    pub fn extension(&self) -> String {
        std::path::Path::new(&self.filename)
            .extension()
            .and_then(std::ffi::OsStr::to_str)
            .unwrap_or("bin")
            .to_ascii_lowercase()
    }
}

/// Avatar bytes ready to be sent back with their media type.
#[derive(Debug, Clone)]
pub struct AvatarContent {
    pub media_type: String,
    pub data: Vec<u8>,
}
