use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    pub endpoints: Vec<String>,
}

// GET /
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "School registry".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: vec![
            "/student".to_string(),
            "/faculty".to_string(),
            "/avatar".to_string(),
            "/port".to_string(),
        ],
    })
}

// GET /port
pub async fn port(State(state): State<AppState>) -> Json<u16> {
    Json(state.port)
}
