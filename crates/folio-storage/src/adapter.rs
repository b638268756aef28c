// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the ContactStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use folio_config::model::StorageConfig;
use folio_core::types::{ContactId, ContactRecord, NewContact};
use folio_core::{AdapterType, ContactStore, FolioError, HealthStatus, PluginAdapter};

use crate::database::{map_tr_err, Database};
use crate::queries;

/// SQLite-backed contact store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily initialized on the first
/// call to [`ContactStore::initialize`].
pub struct SqliteContactStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteContactStore {
    /// Create a new store with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`] is called.
    ///
    /// [`initialize`]: ContactStore::initialize
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, FolioError> {
        self.db.get().ok_or_else(|| FolioError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteContactStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::ContactStore
    }

    async fn health_check(&self) -> Result<HealthStatus, FolioError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), FolioError> {
        if let Some(db) = self.db.get() {
            db.checkpoint().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl ContactStore for SqliteContactStore {
    async fn initialize(&self) -> Result<(), FolioError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| FolioError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite contact store initialized");
        Ok(())
    }

    async fn insert(&self, contact: &NewContact) -> Result<ContactId, FolioError> {
        queries::contacts::insert_contact(self.db()?, contact).await
    }

    async fn get(&self, id: &ContactId) -> Result<Option<ContactRecord>, FolioError> {
        queries::contacts::get_contact(self.db()?, id).await
    }

    async fn list(&self, limit: Option<i64>) -> Result<Vec<ContactRecord>, FolioError> {
        queries::contacts::list_contacts(self.db()?, limit).await
    }

    async fn close(&self) -> Result<(), FolioError> {
        self.db()?.checkpoint().await?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}
