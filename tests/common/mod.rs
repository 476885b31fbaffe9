//! Shared harness for the HTTP integration tests
//!
//! Every test gets its own in-memory state and a throwaway media directory,
//! and drives the full router with `oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use recipe_app_api::api::{create_router_with_state, AppState};
use recipe_app_api::domain::recipe::FixedIdGenerator;
use recipe_app_api::domain::User;
use recipe_app_api::infrastructure::user::{Argon2Hasher, CreateUserRequest};
use recipe_app_api::{build_app_state, AppConfig, Repositories};

pub const PASSWORD: &str = "testpass123";
pub const IMAGE_ID: &str = "test-uuid";
const BOUNDARY: &str = "recipe-app-test-boundary";

pub struct TestApp {
    pub state: AppState,
    pub router: Router,
    pub media: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl TestApp {
    pub fn new() -> Self {
        let media = tempfile::tempdir().unwrap();

        let mut config = AppConfig::default();
        config.auth.jwt_secret = Some("integration-test-secret".to_string());
        config.media.root = media.path().to_string_lossy().into_owned();

        // Cheap Argon2 parameters keep the suite fast
        let hasher = Argon2Hasher::with_cost(1024, 1).unwrap();

        let state = build_app_state(
            &config,
            Repositories::in_memory(),
            Arc::new(hasher),
            Arc::new(FixedIdGenerator::new(IMAGE_ID)),
        )
        .unwrap();

        let router = create_router_with_state(state.clone());

        Self {
            state,
            router,
            media,
        }
    }

    pub async fn create_user(&self, email: &str, name: &str) -> User {
        self.state
            .user_service
            .create_user(CreateUserRequest::new(email, PASSWORD).with_name(name))
            .await
            .unwrap()
    }

    pub async fn create_superuser(&self, email: &str) -> User {
        self.state
            .user_service
            .create_superuser(CreateUserRequest::new(email, PASSWORD).with_name("Admin"))
            .await
            .unwrap()
    }

    /// Create a user and return a bearer token for it
    pub async fn login(&self, email: &str) -> String {
        self.create_user(email, "Test User").await;
        self.token_for(email).await
    }

    pub async fn token_for(&self, email: &str) -> String {
        let response = self
            .request(
                Method::POST,
                "/api/user/token/",
                None,
                Some(json!({ "email": email, "password": PASSWORD })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text());

        response.json()["token"].as_str().unwrap().to_string()
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&value).unwrap())
            }
            None => Body::empty(),
        };

        self.send(builder.body(body).unwrap()).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    /// POST a multipart body with a single file field
    pub async fn upload(
        &self,
        uri: &str,
        token: &str,
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
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap();

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Names from a JSON array of `{id, name}` objects, in response order
pub fn names(value: &Value) -> Vec<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap().to_string())
        .collect()
}

pub fn ids(value: &Value) -> Vec<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}
