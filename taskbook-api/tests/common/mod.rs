/// Common test utilities for API integration tests
///
/// Builds the full router over the in-memory store, so these tests need no
/// database. Requests are driven through `tower::ServiceExt::oneshot`.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use taskbook_api::app::{build_router, AppState};
use taskbook_api::config::{ApiConfig, Config, DatabaseConfig, LogFormat};
use tower::ServiceExt;

/// Test context holding the router under test
pub struct TestContext {
    pub app: Router,
}

impl TestContext {
    pub fn new() -> Self {
        let state = AppState::in_memory(test_config());
        Self {
            app: build_router(state),
        }
    }

    /// Sends a request and returns the status and the decoded JSON body
    ///
    /// An empty body decodes to `Value::Null`.
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = body.map(|json| json.to_string());
        self.send_raw(method, uri, body.as_deref()).await
    }

    /// Like [`TestContext::send`], with the request body passed verbatim
    pub async fn send_raw(&self, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = match body {
            Some(raw) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(raw.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }

    /// Creates a user and returns its id
    pub async fn create_user(&self, email: &str) -> i64 {
        let (status, body) = self
            .post(
                "/users",
                serde_json::json!({ "email": email, "password": "secret" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create user failed: {}", body);
        body["id"].as_i64().unwrap()
    }

    /// Creates a task for `user_id` and returns its id
    pub async fn create_task(&self, description: &str, user_id: i64) -> i64 {
        let (status, body) = self
            .post(
                "/tasks",
                serde_json::json!({ "task": description, "user_id": user_id }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create task failed: {}", body);
        body["id"].as_i64().unwrap()
    }
}

fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
        },
        database: DatabaseConfig {
            url: String::new(),
            max_connections: 1,
            min_connections: 0,
            connect_timeout_seconds: 1,
            run_migrations: false,
        },
        log_format: LogFormat::Pretty,
    }
}
