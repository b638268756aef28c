// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! File store trait for uploaded attachments.

use async_trait::async_trait;

use crate::error::FolioError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{Attachment, Upload};

/// Durable, write-once storage for uploaded files.
#[async_trait]
pub trait FileStore: PluginAdapter {
    /// Stores `upload` under a generated unique name and describes where it went.
    async fn save(&self, upload: Upload) -> Result<Attachment, FolioError>;
}
