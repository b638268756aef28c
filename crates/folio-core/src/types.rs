// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contact, attachment, and adapter types shared across the workspace.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Free-form contact fields, kept in insertion order.
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// Field name holding the attachment list on a stored contact.
pub const FILES_FIELD: &str = "files";

/// Field name for the server-assigned creation timestamp.
pub const CREATED_AT_FIELD: &str = "createdAt";

/// Field name for the server-assigned update timestamp.
pub const UPDATED_AT_FIELD: &str = "updatedAt";

/// Store-assigned identifier of a contact record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(pub String);

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Metadata referencing an uploaded file in durable file storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Public URL of the stored file, under the uploads prefix.
    pub url: String,
    /// Original file name as sent by the client.
    pub filename: String,
    /// Size in bytes.
    pub size: u64,
    /// Declared media type.
    #[serde(rename = "type")]
    pub content_type: String,
}

/// A file received in a multipart submission, not yet stored.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Original file name as sent by the client.
    pub filename: String,
    /// Declared media type, if the part carried one.
    pub content_type: Option<String>,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// A fully merged contact ready to be persisted.
///
/// Built entirely in memory by the ingestor; the store only assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewContact {
    pub fields: Fields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewContact {
    /// Stamps `fields` with identical creation and update times.
    pub fn stamped(fields: Fields, now: DateTime<Utc>) -> Self {
        Self {
            fields,
            created_at: now,
            updated_at: now,
        }
    }

    /// The stored document: fields followed by both timestamps.
    ///
    /// Timestamps always win over same-named submitted keys.
    pub fn to_document(&self) -> Fields {
        document(&self.fields, self.created_at, self.updated_at)
    }
}

/// A persisted contact record.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactRecord {
    pub id: ContactId,
    pub fields: Fields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContactRecord {
    /// The stored document: fields followed by both timestamps.
    pub fn to_document(&self) -> Fields {
        document(&self.fields, self.created_at, self.updated_at)
    }
}

fn document(fields: &Fields, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Fields {
    let mut doc = fields.clone();
    doc.insert(CREATED_AT_FIELD.to_string(), timestamp(created_at).into());
    doc.insert(UPDATED_AT_FIELD.to_string(), timestamp(updated_at).into());
    doc
}

/// Formats a timestamp as RFC 3339 with millisecond precision and a `Z` suffix.
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }
}

/// Identifies the kind of adapter behind a trait object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    ContactStore,
    FileStore,
}
