// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Write-once on-disk storage for uploaded attachments.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use tracing::debug;

use folio_config::model::UploadsConfig;
use folio_core::types::{Attachment, Upload};
use folio_core::{AdapterType, FileStore, FolioError, HealthStatus, PluginAdapter};

/// Media type recorded when an upload declared none.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

const FALLBACK_NAME: &str = "upload";

/// Stores each upload as its own file under a root directory.
///
/// Stored names are `<unix-millis>-<random>-<sanitized original name>`, so
/// concurrent writes never target the same path.
pub struct DiskFileStore {
    root: PathBuf,
    url_prefix: String,
}

impl DiskFileStore {
    pub fn new(root: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            url_prefix: url_prefix.into(),
        }
    }

    pub fn from_config(config: &UploadsConfig) -> Self {
        Self::new(&config.dir, &config.url_prefix)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the upload directory if it does not exist yet.
    pub async fn ensure_root(&self) -> Result<(), FolioError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| FolioError::Upload {
                message: format!("cannot create upload directory {}", self.root.display()),
                source: Some(Box::new(e)),
            })
    }
}

/// Reduce a client-supplied file name to a safe single path component.
///
/// Only the final component is kept (both `/` and `\` separate components)
/// and every character outside `[A-Za-z0-9._-]` becomes `_`.
pub fn sanitize_filename(name: &str) -> String {
    let last = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = last
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        cleaned
    }
}

fn stored_name(original: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let nonce: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!("{millis}-{nonce}-{}", sanitize_filename(original))
}

#[async_trait]
impl PluginAdapter for DiskFileStore {
    fn name(&self) -> &str {
        "disk"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::FileStore
    }

    async fn health_check(&self) -> Result<HealthStatus, FolioError> {
        match tokio::fs::metadata(&self.root).await {
            Ok(meta) if meta.is_dir() => Ok(HealthStatus::Healthy),
            Ok(_) => Ok(HealthStatus::Unhealthy(format!(
                "{} is not a directory",
                self.root.display()
            ))),
            Err(e) => Ok(HealthStatus::Degraded(format!(
                "{}: {e}",
                self.root.display()
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), FolioError> {
        Ok(())
    }
}

#[async_trait]
impl FileStore for DiskFileStore {
    async fn save(&self, upload: Upload) -> Result<Attachment, FolioError> {
        self.ensure_root().await?;

        let name = stored_name(&upload.filename);
        let path = self.root.join(&name);
        tokio::fs::write(&path, &upload.bytes)
            .await
            .map_err(|e| FolioError::Upload {
                message: format!("cannot write {}", path.display()),
                source: Some(Box::new(e)),
            })?;
        debug!(path = %path.display(), size = upload.bytes.len(), "upload stored");

        Ok(Attachment {
            url: format!("{}/{name}", self.url_prefix),
            size: upload.bytes.len() as u64,
            filename: upload.filename,
            content_type: upload
                .content_type
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
        })
    }
}
