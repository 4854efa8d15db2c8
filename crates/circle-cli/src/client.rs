//! HTTP client for the backend API.
//!
//! Every request carries `Authorization: Bearer <token>`. API calls never
//! fail the run: a transport error or a non-success status is logged with
//! whatever the server sent back and the call yields `None`.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::error::PopulateError;

/// Body of `POST /users`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self, PopulateError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Probe `GET /health` until it succeeds, at most `attempts` times.
    pub async fn wait_for_health(
        &self,
        attempts: u32,
        interval: Duration,
    ) -> Result<(), PopulateError> {
        let url = self.url("/health");

        for attempt in 1..=attempts {
            match self.http.get(&url).send().await {
                Ok(resp) if resp.status().is_success() => {
                    info!(attempt, "Server is ready");
                    return Ok(());
                }
                Ok(resp) => debug!(attempt, status = %resp.status(), "Health check not ready"),
                Err(e) => debug!(attempt, error = %e, "Health check failed"),
            }
            tokio::time::sleep(interval).await;
        }

        Err(PopulateError::NotHealthy(
            (interval * attempts).as_secs(),
        ))
    }

    /// `POST /users` with a JSON body.
    pub async fn create_user(&self, user: &NewUser) -> Option<Value> {
        let result = self
            .http
            .post(self.url("/users"))
            .bearer_auth(&self.token)
            .json(user)
            .send()
            .await;

        let body = finish(result).await;
        match &body {
            Some(_) => info!(username = %user.username, "User created successfully"),
            None => error!(username = %user.username, "Failed to create user"),
        }
        body
    }

    /// `POST /upload` with the bytes in the multipart field `file`.
    pub async fn upload_file(&self, file_name: &str, bytes: Vec<u8>) -> Option<Value> {
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.to_string()));

        let result = self
            .http
            .post(self.url("/upload"))
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await;

        let body = finish(result).await;
        match &body {
            Some(_) => info!(file = %file_name, "File uploaded successfully"),
            None => error!(file = %file_name, "Failed to upload file"),
        }
        body
    }
}

/// Turn a response into its body, logging failures.
///
/// A success body that is not JSON is returned as a JSON string.
async fn finish(result: reqwest::Result<Response>) -> Option<Value> {
    let resp = match result {
        Ok(resp) => resp,
        Err(e) => {
            error!(error = %e, "Request failed");
            return None;
        }
    };

    let status = resp.status();
    let text = match resp.text().await {
        Ok(text) => text,
        Err(e) => {
            error!(%status, error = %e, "Failed to read response body");
            return None;
        }
    };

    if !status.is_success() {
        error!(%status, body = %text, "Server rejected request");
        return None;
    }

    Some(serde_json::from_str(&text).unwrap_or(Value::String(text)))
}

#[cfg(test)]
pub(crate) mod tests {
    use std::net::SocketAddr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::extract::{Multipart, State};
    use axum::http::header::AUTHORIZATION;
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;

    use super::*;

    /// Requests that reached `/health` so far.
    #[derive(Clone, Default)]
    pub(crate) struct MockState {
        pub health_calls: Arc<AtomicUsize>,
        pub healthy_after: usize,
    }

    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(|v| v == "Bearer dummy_token")
            .unwrap_or(false)
    }

    async fn health(State(state): State<MockState>) -> StatusCode {
        let seen = state.health_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if seen > state.healthy_after {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }

    async fn users(headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
        if !authorized(&headers) {
            return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "bad token" })));
        }
        if body["username"] == "taken" {
            return (StatusCode::CONFLICT, Json(json!({ "error": "username exists" })));
        }
        (
            StatusCode::CREATED,
            Json(json!({
                "username": body["username"],
                "firstName": body["firstName"],
            })),
        )
    }

    async fn upload(headers: HeaderMap, mut multipart: Multipart) -> impl IntoResponse {
        if !authorized(&headers) {
            return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "bad token" })));
        }
        while let Ok(Some(field)) = multipart.next_field().await {
            if field.name() == Some("file") {
                let name = field.file_name().map(str::to_string);
                let size = field.bytes().await.map(|b| b.len()).unwrap_or(0);
                return (StatusCode::OK, Json(json!({ "name": name, "size": size })));
            }
        }
        (StatusCode::BAD_REQUEST, Json(json!({ "error": "no file field" })))
    }

    /// Serve a stand-in backend on an ephemeral port.
    pub(crate) async fn spawn_mock(healthy_after: usize) -> (SocketAddr, MockState) {
        let state = MockState {
            health_calls: Arc::new(AtomicUsize::new(0)),
            healthy_after,
        };
        let app = Router::new()
            .route("/health", get(health))
            .route("/users", post(users))
            .route("/upload", post(upload))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (addr, state)
    }

    fn client(addr: SocketAddr, token: &str) -> ApiClient {
        ApiClient::new(&format!("http://{addr}/"), token).unwrap()
    }

    fn user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
        }
    }

    #[tokio::test]
    async fn test_health_retries_until_ready() {
        let (addr, state) = spawn_mock(2).await;
        client(addr, "dummy_token")
            .wait_for_health(5, Duration::from_millis(10))
            .await
            .unwrap();
        assert_eq!(state.health_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_health_gives_up() {
        let (addr, state) = spawn_mock(usize::MAX).await;
        let err = client(addr, "dummy_token")
            .wait_for_health(3, Duration::from_millis(10))
            .await
            .unwrap_err();
        assert!(matches!(err, PopulateError::NotHealthy(_)));
        assert_eq!(state.health_calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_not_healthy_message() {
        let err = PopulateError::NotHealthy((Duration::from_secs(1) * 30).as_secs());
        assert_eq!(err.to_string(), "Server failed to start within 30 seconds");
    }

    #[tokio::test]
    async fn test_create_user_sends_camel_case_json() {
        let (addr, _) = spawn_mock(0).await;
        let body = client(addr, "dummy_token")
            .create_user(&user("john_doe"))
            .await
            .unwrap();
        assert_eq!(body["username"], "john_doe");
        assert_eq!(body["firstName"], "John");
    }

    #[tokio::test]
    async fn test_rejections_become_none() {
        let (addr, _) = spawn_mock(0).await;
        assert!(client(addr, "wrong").create_user(&user("john_doe")).await.is_none());
        assert!(client(addr, "dummy_token").create_user(&user("taken")).await.is_none());
        assert!(client(addr, "wrong").upload_file("a.txt", b"x".to_vec()).await.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_none() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        assert!(client(addr, "dummy_token").create_user(&user("x")).await.is_none());
    }

    #[tokio::test]
    async fn test_upload_multipart_file_field() {
        let (addr, _) = spawn_mock(0).await;
        let body = client(addr, "dummy_token")
            .upload_file("Rome Colosseum.jpg", vec![0u8; 1024])
            .await
            .unwrap();
        assert_eq!(body["name"], "Rome Colosseum.jpg");
        assert_eq!(body["size"], 1024);
    }
}
