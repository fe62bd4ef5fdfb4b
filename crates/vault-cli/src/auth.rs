//! Client for the remote authentication service
//!
//! `POST /login` and `POST /register` with a JSON body of
//! `{"username", "password"}`. A 2xx status is success; anything else is a
//! rejection whose optional `message` field is shown to the user verbatim.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";

/// Authentication error types
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid authentication URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP client error: {0}")]
    Client(String),

    #[error("Network error. Please try again.")]
    Network(#[source] reqwest::Error),

    #[error("{message}")]
    Rejected { status: u16, message: String },
}

#[derive(Serialize)]
struct AuthRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct AuthFailure {
    message: Option<String>,
}

/// Authentication service client
pub struct AuthClient {
    client: Client,
    base_url: Url,
}

impl AuthClient {
    /// Create a client for the service at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AuthError> {
        let mut base_url =
            Url::parse(base_url).map_err(|e| AuthError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        // Url::join replaces the last path segment unless the path ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::Client(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Endpoint URL for `path` relative to the service base
    pub fn endpoint(&self, path: &str) -> Result<Url, AuthError> {
        self.base_url
            .join(path)
            .map_err(|e| AuthError::InvalidUrl(e.to_string()))
    }

    /// Verify credentials with the service
    pub async fn login(&self, username: &str, password: &str) -> Result<(), AuthError> {
        self.post("login", username, password, LOGIN_FAILED).await?;
        info!("Login accepted for {}", username);
        Ok(())
    }

    /// Create an account with the service
    pub async fn register(&self, username: &str, password: &str) -> Result<(), AuthError> {
        self.post("register", username, password, REGISTRATION_FAILED).await?;
        info!("Registration accepted for {}", username);
        Ok(())
    }

    async fn post(
        &self,
        path: &str,
        username: &str,
        password: &str,
        fallback: &str,
    ) -> Result<(), AuthError> {
        let url = self.endpoint(path)?;
        debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .json(&AuthRequest { username, password })
            .send()
            .await
            .map_err(|e| {
                warn!("Authentication request failed: {}", e);
                AuthError::Network(e)
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        // A missing or malformed body still counts as a rejection
        let message = response
            .json::<AuthFailure>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| fallback.to_string());

        debug!("Authentication rejected with status {}", status);
        Err(AuthError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    async fn login(Json(body): Json<Value>) -> Response {
        if body["username"] == "alice" && body["password"] == "right" {
            (StatusCode::OK, Json(json!({"message": "ok"}))).into_response()
        } else {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"message": "Invalid username or password"})),
            )
                .into_response()
        }
    }

    async fn register() -> Response {
        StatusCode::CONFLICT.into_response()
    }

    async fn spawn_server() -> String {
        let app = Router::new()
            .route("/login", post(login))
            .route("/register", post(register));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }

    fn client(base_url: &str) -> AuthClient {
        AuthClient::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let auth = client("https://auth.example.com/api");
        assert_eq!(
            auth.endpoint("login").unwrap().as_str(),
            "https://auth.example.com/api/login"
        );

        let auth = client("http://localhost:8000");
        assert_eq!(
            auth.endpoint("register").unwrap().as_str(),
            "http://localhost:8000/register"
        );
    }

    #[test]
    fn test_invalid_url() {
        let result = AuthClient::new("not a url", Duration::from_secs(5));
        assert!(matches!(result, Err(AuthError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_login_success() {
        let base = spawn_server().await;
        client(&base).login("alice", "right").await.unwrap();
    }

    #[tokio::test]
    async fn test_login_rejected_uses_server_message() {
        let base = spawn_server().await;
        let err = client(&base).login("alice", "wrong").await.unwrap_err();

        match err {
            AuthError::Rejected { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid username or password");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_rejected_without_body_uses_fallback() {
        let base = spawn_server().await;
        let err = client(&base).register("alice", "pw").await.unwrap_err();

        assert!(matches!(err, AuthError::Rejected { status: 409, .. }));
        assert_eq!(err.to_string(), "Registration failed");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{}", addr))
            .login("alice", "right")
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Network(_)));
        assert_eq!(err.to_string(), "Network error. Please try again.");
    }
}
