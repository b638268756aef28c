// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contact store trait for persistence backends (SQLite, in-memory).

use async_trait::async_trait;

use crate::error::FolioError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ContactId, ContactRecord, NewContact};

/// A single logical collection of contact records.
///
/// Records are insert-only: there is no update or delete path.
#[async_trait]
pub trait ContactStore: PluginAdapter {
    /// Initializes the backend (migrations, connection, etc.).
    async fn initialize(&self) -> Result<(), FolioError>;

    /// Persists a contact and returns the identifier the store assigned.
    async fn insert(&self, contact: &NewContact) -> Result<ContactId, FolioError>;

    /// Looks up a single contact by id.
    async fn get(&self, id: &ContactId) -> Result<Option<ContactRecord>, FolioError>;

    /// Lists contacts, newest first, optionally capped at `limit`.
    async fn list(&self, limit: Option<i64>) -> Result<Vec<ContactRecord>, FolioError>;

    /// Closes the backend, flushing pending writes.
    async fn close(&self) -> Result<(), FolioError>;
}
