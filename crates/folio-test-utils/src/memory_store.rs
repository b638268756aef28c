// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory contact store for deterministic testing.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use folio_core::types::{ContactId, ContactRecord, NewContact};
use folio_core::{AdapterType, ContactStore, FolioError, HealthStatus, PluginAdapter};

/// A contact store that keeps records in insertion order.
///
/// `fail_inserts(true)` makes every subsequent insert return a storage
/// error, for exercising persistence fault paths.
#[derive(Default)]
pub struct MemoryContactStore {
    records: Mutex<Vec<ContactRecord>>,
    failing: AtomicBool,
}

impl MemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle insert failure injection.
    pub fn fail_inserts(&self, fail: bool) {
        self.failing.store(fail, Ordering::SeqCst);
    }

    /// All stored records, oldest first.
    pub async fn records(&self) -> Vec<ContactRecord> {
        self.records.lock().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.records.lock().await.len()
    }
}

#[async_trait]
impl PluginAdapter for MemoryContactStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::ContactStore
    }

    async fn health_check(&self) -> Result<HealthStatus, FolioError> {
        if self.failing.load(Ordering::SeqCst) {
            Ok(HealthStatus::Unhealthy("insert failures injected".into()))
        } else {
            Ok(HealthStatus::Healthy)
        }
    }

    async fn shutdown(&self) -> Result<(), FolioError> {
        Ok(())
    }
}

#[async_trait]
impl ContactStore for MemoryContactStore {
    async fn initialize(&self) -> Result<(), FolioError> {
        Ok(())
    }

    async fn insert(&self, contact: &NewContact) -> Result<ContactId, FolioError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(FolioError::Storage {
                source: "injected insert failure".into(),
            });
        }
        let id = ContactId(uuid::Uuid::new_v4().to_string());
        self.records.lock().await.push(ContactRecord {
            id: id.clone(),
            fields: contact.fields.clone(),
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        });
        Ok(id)
    }

    async fn get(&self, id: &ContactId) -> Result<Option<ContactRecord>, FolioError> {
        Ok(self
            .records
            .lock()
            .await
            .iter()
            .find(|r| &r.id == id)
            .cloned())
    }

    async fn list(&self, limit: Option<i64>) -> Result<Vec<ContactRecord>, FolioError> {
        let records = self.records.lock().await;
        let take = limit
            .and_then(|l| usize::try_from(l).ok())
            .unwrap_or(records.len());
        Ok(records.iter().rev().take(take).cloned().collect())
    }

    async fn close(&self) -> Result<(), FolioError> {
        Ok(())
    }
}
