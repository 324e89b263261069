//! Integration tests for Catalog Keeper.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p catalog-keeper-integration-tests
//! ```
//!
//! No external services are needed: catalogs live in temporary
//! directories and login requests go to a local stand-in server.
//!
//! # Test Categories
//!
//! - `catalog_file_store` - Catalog behavior over the file-backed store
//! - `auth_login` - Login client against a local endpoint

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::path::Path;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use catalog_keeper::{FileStore, RetryPolicy, RetryingStore, SessionGate, SessionToken};
use serde_json::{Value, json};
use tempfile::TempDir;
use url::Url;

/// Email the stand-in login server accepts.
pub const VALID_EMAIL: &str = "eve.holt@reqres.in";
/// Email for which the server answers 200 without a token.
pub const TOKENLESS_EMAIL: &str = "tokenless@example.com";
/// Token the server issues.
pub const ISSUED_TOKEN: &str = "QpwL5tke4Pnpja7X4";
/// API key the server requires.
pub const API_KEY: &str = "reqres-free-v1";

/// A data directory that is deleted when the context is dropped.
pub struct TestContext {
    dir: TempDir,
}

impl TestContext {
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    /// A fresh gate over the data directory, as a new process would open it.
    pub async fn gate(&self) -> SessionGate {
        let files = FileStore::open(self.dir.path()).await.unwrap();
        SessionGate::new(Arc::new(RetryingStore::new(files, RetryPolicy::NONE)))
    }

    /// A gate with an active session.
    pub async fn logged_in_gate(&self) -> SessionGate {
        let gate = self.gate().await;
        gate.begin_session(&SessionToken::new("test-token").unwrap())
            .await
            .unwrap();
        gate
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

async fn login(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if headers.get("x-api-key").and_then(|v| v.to_str().ok()) != Some(API_KEY) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Missing API key" })),
        );
    }

    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    match email {
        _ if password.is_empty() => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing password" })),
        ),
        VALID_EMAIL => (StatusCode::OK, Json(json!({ "token": ISSUED_TOKEN }))),
        TOKENLESS_EMAIL => (StatusCode::OK, Json(json!({}))),
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "user not found" })),
        ),
    }
}

async fn failing() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded")
}

/// Start a stand-in login server on an ephemeral port.
///
/// `POST /api/login` behaves like the real endpoint; `POST /broken` always
/// answers 500 with a plain-text body. Returns the server's base URL.
pub async fn start_login_server() -> Url {
    let app = Router::new()
        .route("/api/login", post(login))
        .route("/broken", post(failing));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}").parse().unwrap()
}

/// A URL on a local port with nothing listening.
pub async fn unreachable_url() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api/login").parse().unwrap()
}
