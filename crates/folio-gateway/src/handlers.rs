// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the portfolio API.
//!
//! Handles GET /api/<section>, POST /api/contact, and GET /health.

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, MethodRouter},
    Json,
};
use serde::Serialize;
use tracing::debug;

use folio_core::{Fields, FolioError, HealthStatus, PluginAdapter, Upload};

use crate::content::Section;
use crate::encoding::{apply_form_field, query_fields, BodyEncoding};
use crate::ingest::{IngestError, ParsedBody};
use crate::server::GatewayState;

const HEALTHY: &str = "healthy";

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` when every adapter is healthy, otherwise `degraded`.
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Seconds since the server started.
    pub uptime_secs: u64,
    pub adapters: Vec<AdapterHealth>,
}

/// Health of a single adapter.
#[derive(Debug, Serialize)]
pub struct AdapterHealth {
    pub name: String,
    pub status: String,
}

/// Error response body for unmatched routes.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// GET route serving one portfolio section.
pub fn section_route(section: Section) -> MethodRouter<GatewayState> {
    get(move |State(state): State<GatewayState>| async move {
        Json(state.content.get(section).clone())
    })
}

/// POST /api/contact
///
/// Accepts multipart, JSON, text, or unlabelled bodies plus query parameters,
/// and stores them as one contact record.
pub async fn post_contact(State(state): State<GatewayState>, request: Request) -> Response {
    let query = query_fields(request.uri().query());
    let encoding = BodyEncoding::classify(
        request
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
    );
    debug!(?encoding, "contact submission received");

    let result = match read_body(encoding, request).await {
        Ok(body) => state.ingestor.submit(query, body).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(created) => created.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Read and decode the request body according to its encoding.
pub async fn read_body(encoding: BodyEncoding, request: Request) -> Result<ParsedBody, IngestError> {
    if encoding == BodyEncoding::Multipart {
        return read_multipart(request).await;
    }
    let bytes = Bytes::from_request(request, &())
        .await
        .map_err(|e| IngestError::Body(e.body_text()))?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(ParsedBody {
        fields: encoding.decode(&text),
        uploads: Vec::new(),
    })
}

async fn read_multipart(request: Request) -> Result<ParsedBody, IngestError> {
    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| IngestError::Body(e.body_text()))?;

    let mut fields = Fields::new();
    let mut uploads = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| IngestError::Body(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(filename) => {
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| IngestError::Body(e.body_text()))?;
                if filename.is_empty() && bytes.is_empty() {
                    debug!(field = %name, "skipping empty file part");
                    continue;
                }
                uploads.push(Upload {
                    filename,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            None => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| IngestError::Body(e.body_text()))?;
                apply_form_field(&mut fields, &name, value);
            }
        }
    }

    Ok(ParsedBody {
        fields: (!fields.is_empty()).then_some(fields),
        uploads,
    })
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    let store = state.ingestor.store();
    let files = state.ingestor.files();
    let adapters = vec![
        adapter_health(store.name(), store.health_check().await),
        adapter_health(files.name(), files.health_check().await),
    ];
    let all_healthy = adapters.iter().all(|a| a.status == HEALTHY);

    Json(HealthResponse {
        status: if all_healthy { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.started_at.elapsed().as_secs(),
        adapters,
    })
}

fn adapter_health(name: &str, result: Result<HealthStatus, FolioError>) -> AdapterHealth {
    let status = match result {
        Ok(HealthStatus::Healthy) => HEALTHY.to_string(),
        Ok(HealthStatus::Degraded(reason)) => format!("degraded: {reason}"),
        Ok(HealthStatus::Unhealthy(reason)) => format!("unhealthy: {reason}"),
        Err(e) => format!("unhealthy: {e}"),
    };
    AdapterHealth {
        name: name.to_string(),
        status,
    }
}

/// Fallback for unmatched routes.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_string(),
        }),
    )
}

