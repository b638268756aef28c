// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Router-level tests for the portfolio API.

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use folio_core::{ContactStore, FileStore};
use folio_gateway::{router, ContactIngestor, GatewayState, PortfolioContent, ServerConfig};
use folio_storage::{DiskFileStore, SqliteContactStore};
use folio_test_utils::{MemoryContactStore, MemoryFileStore};

const BOUNDARY: &str = "folio-test-boundary";

fn config(uploads_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        uploads_dir: uploads_dir.to_path_buf(),
        url_prefix: "/uploads".to_string(),
        max_body_bytes: 64 * 1024,
    }
}

fn app_with(
    store: Arc<dyn ContactStore>,
    files: Arc<dyn FileStore>,
    uploads_dir: &Path,
) -> Router {
    let state = GatewayState::new(
        ContactIngestor::new(store, files),
        PortfolioContent::embedded().unwrap(),
    );
    router(&config(uploads_dir), state)
}

fn memory_app() -> (Arc<MemoryContactStore>, Arc<MemoryFileStore>, Router) {
    let store = Arc::new(MemoryContactStore::new());
    let files = Arc::new(MemoryFileStore::default());
    let app = app_with(store.clone(), files.clone(), Path::new("unused-uploads"));
    (store, files, app)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, body)
}

fn post(uri: &str, content_type: Option<&str>, body: impl Into<Body>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    builder.body(body.into()).unwrap()
}

enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        filename: &'a str,
        content_type: Option<&'a str>,
        bytes: &'a [u8],
    },
}

fn multipart(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
            Part::File {
                name,
                filename,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
                    )
                    .as_bytes(),
                );
                if let Some(content_type) = content_type {
                    body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
                }
                body.extend_from_slice(b"\r\n");
                body.extend_from_slice(bytes);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

#[tokio::test]
async fn static_sections_return_json_documents() {
    let (_, _, app) = memory_app();
    for path in [
        "/api/about",
        "/api/experience",
        "/api/projects",
        "/api/skills",
        "/api/achievements",
    ] {
        let request = Request::get(path).body(Body::empty()).unwrap();
        let (status, body) = send(app.clone(), request).await;
        assert_eq!(status, StatusCode::OK, "{path}");
        assert!(body.is_object(), "{path} should return an object");
    }
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let (_, _, app) = memory_app();
    let request = Request::get("/api/nope").body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
}

#[tokio::test]
async fn empty_submission_returns_400_and_stores_nothing() {
    let (store, _, app) = memory_app();
    let (status, body) = send(app, post("/api/contact", None, Body::empty())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"success": false, "error": "No data given"}));
    assert_eq!(store.count().await, 0);
}

#[tokio::test]
async fn whitespace_json_body_counts_as_empty() {
    let (store, _, app) = memory_app();
    let (status, _) = send(app, post("/api/contact", Some("application/json"), "  \n ")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(store.count().await, 0);
}

#[tokio::test]
async fn json_body_is_stored() {
    let (store, _, app) = memory_app();
    let (status, body) = send(
        app,
        post("/api/contact", Some("application/json"), r#"{"a":1}"#),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert!(!body["contactId"].as_str().unwrap().is_empty());
    assert_eq!(body["data"]["a"], 1);
    assert!(body["data"]["createdAt"].is_string());
    assert!(body["data"]["updatedAt"].is_string());

    let records = store.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].fields["a"], json!(1));
    assert_eq!(body["contactId"], json!(records[0].id.0));
}

#[tokio::test]
async fn body_overrides_query() {
    let (store, _, app) = memory_app();
    let (status, body) = send(
        app,
        post("/api/contact?a=1&b=q", Some("application/json"), r#"{"a":2}"#),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["a"], 2);
    assert_eq!(body["data"]["b"], "q");
    assert_eq!(store.records().await[0].fields["a"], json!(2));
}

#[tokio::test]
async fn query_only_submission_is_stored_with_string_values() {
    let (_, _, app) = memory_app();
    let (status, body) = send(app, post("/api/contact?name=Ada&age=36", None, Body::empty())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["name"], "Ada");
    assert_eq!(body["data"]["age"], "36");
}

#[tokio::test]
async fn malformed_json_with_no_query_is_400() {
    let (_, _, app) = memory_app();
    let (status, _) = send(app, post("/api/contact", Some("application/json"), "{oops")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn text_body_becomes_message() {
    let (_, _, app) = memory_app();
    let (status, body) = send(
        app,
        post("/api/contact", Some("text/plain; charset=utf-8"), "Hello there"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["message"], "Hello there");
}

#[tokio::test]
async fn unlabelled_body_tries_json_first() {
    let (_, _, app) = memory_app();
    let (_, body) = send(app.clone(), post("/api/contact", None, r#"{"k":"v"}"#)).await;
    assert_eq!(body["data"]["k"], "v");

    let (_, body) = send(app, post("/api/contact", Some("application/xml"), "<a/>")).await;
    assert_eq!(body["data"]["message"], "<a/>");
}

#[tokio::test]
async fn multipart_data_object_is_expanded() {
    let (store, _, app) = memory_app();
    let body = multipart(&[Part::Text("data", r#"{"x":5}"#), Part::Text("name", "Ada")]);
    let (status, response) = send(
        app,
        post("/api/contact", Some(multipart_type().as_str()), body),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(response["data"]["x"], 5);
    assert_eq!(response["data"]["name"], "Ada");
    let records = store.records().await;
    assert!(!records[0].fields.contains_key("data"));
}

#[tokio::test]
async fn multipart_data_text_becomes_message() {
    let (_, _, app) = memory_app();
    let body = multipart(&[Part::Text("data", "hello")]);
    let (status, response) = send(app, post("/api/contact", Some(multipart_type().as_str()), body)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(response["data"]["message"], "hello");
    assert!(response["data"].get("data").is_none());
}

#[tokio::test]
async fn multipart_file_produces_attachment_descriptor() {
    let (_, files, app) = memory_app();
    let body = multipart(&[Part::File {
        name: "document",
        filename: "cv.pdf",
        content_type: Some("application/pdf"),
        bytes: b"%PDF-1.7 fake",
    }]);
    let (status, response) = send(app, post("/api/contact", Some(multipart_type().as_str()), body)).await;

    assert_eq!(status, StatusCode::CREATED);
    let listed = response["data"]["files"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed[0]["url"].as_str().unwrap().starts_with("/uploads/"));
    assert_eq!(listed[0]["filename"], "cv.pdf");
    assert_eq!(listed[0]["size"], 13);
    assert_eq!(listed[0]["type"], "application/pdf");
    assert_eq!(files.saved().await[0].bytes, b"%PDF-1.7 fake");
}

#[tokio::test]
async fn empty_file_part_is_ignored() {
    let (store, files, app) = memory_app();
    let body = multipart(&[Part::File {
        name: "document",
        filename: "",
        content_type: Some("application/octet-stream"),
        bytes: b"",
    }]);
    let (status, _) = send(app, post("/api/contact", Some(multipart_type().as_str()), body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(files.saved().await.is_empty());
    assert_eq!(store.count().await, 0);
}

#[tokio::test]
async fn malformed_multipart_is_500() {
    let (store, _, app) = memory_app();
    let (status, body) = send(
        app,
        post("/api/contact", Some("multipart/form-data"), "no boundary here"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Failed to create contact");
    assert!(body["message"].is_string());
    assert_eq!(store.count().await, 0);
}

#[tokio::test]
async fn persistence_failure_is_500() {
    let (store, _, app) = memory_app();
    store.fail_inserts(true);
    let (status, body) = send(
        app,
        post("/api/contact", Some("application/json"), r#"{"a":1}"#),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to create contact");
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let (store, _, app) = memory_app();
    let huge = format!(r#"{{"blob":"{}"}}"#, "x".repeat(128 * 1024));
    let (status, _) = send(app, post("/api/contact", Some("application/json"), huge)).await;

    assert!(status.is_client_error() || status.is_server_error());
    assert_eq!(store.count().await, 0);
}

#[tokio::test]
async fn health_reports_adapters() {
    let (store, _, app) = memory_app();
    let request = Request::get("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app.clone(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["adapters"].as_array().unwrap().len(), 2);

    store.fail_inserts(true);
    let request = Request::get("/health").body(Body::empty()).unwrap();
    let (_, body) = send(app, request).await;
    assert_eq!(body["status"], "degraded");
}

#[tokio::test]
async fn sqlite_and_disk_round_trip_serves_upload() {
    let dir = tempfile::tempdir().unwrap();
    let uploads = dir.path().join("uploads");
    let db_path = dir.path().join("folio.db");

    let store = Arc::new(SqliteContactStore::new(folio_config_storage(&db_path)));
    store.initialize().await.unwrap();
    let files = Arc::new(DiskFileStore::new(&uploads, "/uploads"));
    let app = app_with(store.clone(), files, &uploads);

    let body = multipart(&[
        Part::Text("data", r#"{"email":"ada@example.com"}"#),
        Part::File {
            name: "document",
            filename: "notes.txt",
            content_type: Some("text/plain"),
            bytes: b"hello file",
        },
    ]);
    let (status, response) = send(
        app.clone(),
        post("/api/contact?source=test", Some(multipart_type().as_str()), body),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let id = folio_core::ContactId(response["contactId"].as_str().unwrap().to_string());
    let stored = store.get(&id).await.unwrap().unwrap();
    assert_eq!(stored.fields["email"], json!("ada@example.com"));
    assert_eq!(stored.fields["source"], json!("test"));

    let url = response["data"]["files"][0]["url"].as_str().unwrap().to_string();
    let request = Request::get(&url).body(Body::empty()).unwrap();
    let served = app.oneshot(request).await.unwrap();
    assert_eq!(served.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(served.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"hello file");
}

fn folio_config_storage(path: &Path) -> folio_config::model::StorageConfig {
    folio_config::model::StorageConfig {
        database_path: path.to_string_lossy().to_string(),
        wal_mode: true,
    }
}
