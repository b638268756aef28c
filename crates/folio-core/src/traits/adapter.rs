// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait that all storage adapters implement.

use async_trait::async_trait;

use crate::error::FolioError;
use crate::types::{AdapterType, HealthStatus};

/// The base trait for all Folio adapters.
///
/// Provides identity, lifecycle, and health check capabilities. The gateway's
/// `/health` endpoint reports every registered adapter through this trait.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version;

    /// Returns the kind of adapter.
    fn adapter_type(&self) -> AdapterType;

    /// Performs a health check and returns the adapter's current status.
    async fn health_check(&self) -> Result<HealthStatus, FolioError>;

    /// Gracefully shuts down the adapter, releasing any held resources.
    async fn shutdown(&self) -> Result<(), FolioError>;
}
