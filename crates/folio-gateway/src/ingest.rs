// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contact submission ingestion: store attachments, merge, validate, persist.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info};

use folio_core::types::{Attachment, ContactId, Upload, FILES_FIELD};
use folio_core::{ContactStore, Fields, FileStore, FolioError, NewContact};

/// Error text for an empty submission.
pub const NO_DATA: &str = "No data given";

/// Error text for a submission that failed after validation.
pub const CREATE_FAILED: &str = "Failed to create contact";

/// A request body after decoding, before anything is written.
#[derive(Debug, Default)]
pub struct ParsedBody {
    /// Body-derived fields, `None` when the body was absent or degraded.
    pub fields: Option<Fields>,
    /// Files received in a multipart body.
    pub uploads: Vec<Upload>,
}

/// Why a submission did not produce a record.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Query, body, and attachments were all empty.
    #[error("no data given")]
    NoData,
    /// The body or multipart stream could not be read.
    #[error("failed to read request body: {0}")]
    Body(String),
    /// The store rejected the record.
    #[error(transparent)]
    Persist(#[from] FolioError),
}

/// Failure payload shared by every error response.
#[derive(Debug, Serialize)]
pub struct FailureResponse {
    pub success: bool,
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        match self {
            Self::NoData => (
                StatusCode::BAD_REQUEST,
                Json(FailureResponse {
                    success: false,
                    error: NO_DATA,
                    message: None,
                }),
            )
                .into_response(),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FailureResponse {
                    success: false,
                    error: CREATE_FAILED,
                    message: Some(other.to_string()),
                }),
            )
                .into_response(),
        }
    }
}

/// Body of a 201 response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactCreated {
    pub success: bool,
    pub contact_id: ContactId,
    /// The stored document, timestamps included.
    pub data: Fields,
}

impl IntoResponse for ContactCreated {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

/// Turns decoded submissions into persisted contact records.
pub struct ContactIngestor {
    store: Arc<dyn ContactStore>,
    files: Arc<dyn FileStore>,
}

impl ContactIngestor {
    pub fn new(store: Arc<dyn ContactStore>, files: Arc<dyn FileStore>) -> Self {
        Self { store, files }
    }

    pub fn store(&self) -> &Arc<dyn ContactStore> {
        &self.store
    }

    pub fn files(&self) -> &Arc<dyn FileStore> {
        &self.files
    }

    /// Ingest one submission.
    ///
    /// Attachments are written first, each best-effort. The record is then
    /// assembled in memory (query, then body, then `files`) and inserted once.
    pub async fn submit(
        &self,
        query: Fields,
        body: ParsedBody,
    ) -> Result<ContactCreated, IngestError> {
        let attachments = self.store_uploads(body.uploads).await;
        let fields = merge(query, body.fields, &attachments);
        if fields.is_empty() {
            return Err(IngestError::NoData);
        }

        let contact = NewContact::stamped(fields, Utc::now());
        let contact_id = self.store.insert(&contact).await.inspect_err(|e| {
            error!(error = %e, "failed to persist contact");
        })?;
        info!(
            contact_id = %contact_id,
            fields = contact.fields.len(),
            attachments = attachments.len(),
            "contact created"
        );

        Ok(ContactCreated {
            success: true,
            contact_id,
            data: contact.to_document(),
        })
    }

    async fn store_uploads(&self, uploads: Vec<Upload>) -> Vec<Attachment> {
        let mut attachments = Vec::with_capacity(uploads.len());
        for upload in uploads {
            let filename = upload.filename.clone();
            match self.files.save(upload).await {
                Ok(attachment) => attachments.push(attachment),
                Err(e) => error!(filename = %filename, error = %e, "dropping attachment"),
            }
        }
        attachments
    }
}

/// Merge the three field sources; later sources overwrite earlier keys.
pub fn merge(query: Fields, body: Option<Fields>, attachments: &[Attachment]) -> Fields {
    let mut fields = query;
    if let Some(body) = body {
        fields.extend(body);
    }
    if !attachments.is_empty() {
        let files = attachments
            .iter()
            .filter_map(|a| serde_json::to_value(a).ok())
            .collect::<Vec<Value>>();
        fields.insert(FILES_FIELD.to_string(), Value::Array(files));
    }
    fields
}
