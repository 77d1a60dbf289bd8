//! Shared harness for router-level tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use callboard_core::domains::auth::{AdminCredentials, JwtService};
use callboard_core::kernel::{FsTranscriptStore, MockTwilioService, ServerDeps};
use callboard_core::server::build_app;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";

pub struct TestApp {
    pub router: Router,
    pub twilio: Arc<MockTwilioService>,
    pub jwt_service: Arc<JwtService>,
    pub transcript_dir: TempDir,
}

impl TestApp {
    pub fn new(twilio: MockTwilioService) -> Self {
        let transcript_dir = tempfile::tempdir().unwrap();
        let twilio = Arc::new(twilio);
        let jwt_service = Arc::new(JwtService::new("test_secret_key", "test_issuer".to_string()));
        let admin = AdminCredentials::with_cost(ADMIN_EMAIL, ADMIN_PASSWORD, 4).unwrap();

        let deps = ServerDeps::new(
            twilio.clone(),
            Arc::new(FsTranscriptStore::new(transcript_dir.path())),
            jwt_service.clone(),
            Arc::new(admin),
        );

        Self {
            router: build_app(deps, &[]),
            twilio,
            jwt_service,
            transcript_dir,
        }
    }

    pub fn token(&self) -> String {
        self.jwt_service.create_token(ADMIN_EMAIL).unwrap()
    }

    pub fn write_transcript(&self, recording_id: &str, body: &Value) {
        std::fs::write(
            self.transcript_dir
                .path()
                .join(format!("{}.json", recording_id)),
            body.to_string(),
        )
        .unwrap();
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    /// GET with the admin's bearer token
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .header("authorization", format!("Bearer {}", self.token()))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn login(&self, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/login")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }
}
