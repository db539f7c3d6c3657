#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use school_registry::routes::create_routes;
use school_registry::services::blob_store::{BlobStore, FsBlobStore};
use school_registry::state::AppState;

const BOUNDARY: &str = "school-registry-test-boundary";

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.bytes).unwrap_or(Value::Null)
    }
}

pub struct TestApp {
    router: Router,
    pub avatar_dir: TempDir,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).sqlx_logging(false);
        let db = Database::connect(options).await.expect("Failed to open test database");
        Migrator::up(&db, None).await.expect("Failed to migrate test database");

        let avatar_dir = tempfile::tempdir().expect("Failed to create avatar dir");
        let blobs: Arc<dyn BlobStore> = Arc::new(FsBlobStore::new(avatar_dir.path()));
        let state = AppState::new(db, blobs, true, 3000);

        Self {
            router: create_routes(state, Duration::from_secs(10), 1024 * 1024),
            avatar_dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();

        TestResponse {
            status,
            content_type,
            bytes,
        }
    }

    pub async fn call(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.call(Method::GET, uri, None).await
    }

    pub async fn create_student(&self, name: &str, age: i32) -> i64 {
        let res = self
            .call(
                Method::POST,
                "/student/add-student",
                Some(serde_json::json!({ "name": name, "age": age })),
            )
            .await;
        assert_eq!(res.status, StatusCode::OK);
        res.json()["id"].as_i64().unwrap()
    }

    pub async fn create_faculty(&self, name: &str, color: &str) -> i64 {
        let res = self
            .call(
                Method::POST,
                "/faculty/add-faculty",
                Some(serde_json::json!({ "name": name, "color": color })),
            )
            .await;
        assert_eq!(res.status, StatusCode::OK);
        res.json()["id"].as_i64().unwrap()
    }

    pub async fn upload_avatar(
        &self,
        student_id: i64,
        field: &str,
        filename: &str,
        content_type: &str,
        data: &[u8],
    ) -> TestResponse {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                field, filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

        let request = Request::builder()
            .method(Method::POST)
            .uri(format!("/avatar/{}/avatar", student_id))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }
}
