// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory file store for deterministic testing.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::Mutex;

use folio_core::types::{Attachment, Upload};
use folio_core::{AdapterType, FileStore, FolioError, HealthStatus, PluginAdapter};

/// A file store that captures uploads instead of writing them.
///
/// Descriptors mirror the disk store: `url` is `<prefix>/<n>-<filename>`
/// and a missing media type becomes `application/octet-stream`.
pub struct MemoryFileStore {
    url_prefix: String,
    saved: Mutex<Vec<Upload>>,
    failing: Mutex<HashSet<String>>,
}

impl MemoryFileStore {
    pub fn new(url_prefix: impl Into<String>) -> Self {
        Self {
            url_prefix: url_prefix.into(),
            saved: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
        }
    }

    /// Make every save of an upload named `filename` fail.
    pub async fn fail_on(&self, filename: impl Into<String>) {
        self.failing.lock().await.insert(filename.into());
    }

    /// Uploads accepted so far, in save order.
    pub async fn saved(&self) -> Vec<Upload> {
        self.saved.lock().await.clone()
    }
}

impl Default for MemoryFileStore {
    fn default() -> Self {
        Self::new("/uploads")
    }
}

#[async_trait]
impl PluginAdapter for MemoryFileStore {
    fn name(&self) -> &str {
        "memory-files"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::FileStore
    }

    async fn health_check(&self) -> Result<HealthStatus, FolioError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), FolioError> {
        Ok(())
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn save(&self, upload: Upload) -> Result<Attachment, FolioError> {
        if self.failing.lock().await.contains(&upload.filename) {
            return Err(FolioError::Upload {
                message: format!("injected failure for {}", upload.filename),
                source: None,
            });
        }

        let mut saved = self.saved.lock().await;
        let attachment = Attachment {
            url: format!("{}/{}-{}", self.url_prefix, saved.len(), upload.filename),
            filename: upload.filename.clone(),
            size: upload.bytes.len() as u64,
            content_type: upload
                .content_type
                .clone()
                .unwrap_or_else(|| "application/octet-stream".to_string()),
        };
        saved.push(upload);
        Ok(attachment)
    }
}
