// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `folio serve` command implementation.
//!
//! Opens the SQLite contact store and the upload directory, loads the
//! portfolio documents, and runs the gateway until SIGINT or SIGTERM.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use folio_config::FolioConfig;
use folio_core::{ContactStore, FolioError, PluginAdapter};
use folio_gateway::{ContactIngestor, GatewayState, PortfolioContent, ServerConfig};
use folio_storage::{DiskFileStore, SqliteContactStore};
use tracing::{info, warn};

use crate::shutdown;

/// Runs the `folio serve` command.
pub async fn run_serve(config: FolioConfig) -> Result<(), FolioError> {
    init_tracing(&config.server.log_level);

    let store = Arc::new(SqliteContactStore::new(config.storage.clone()));
    store.initialize().await?;
    info!(path = %config.storage.database_path, "contact store ready");

    let files = Arc::new(DiskFileStore::from_config(&config.uploads));
    files.ensure_root().await?;
    info!(dir = %files.root().display(), "upload directory ready");

    let content = PortfolioContent::load(config.content.dir.as_deref().map(Path::new))?;

    let server_config = gateway_config(&config);
    let listener = folio_gateway::bind(&server_config).await?;
    let cancel = shutdown::install_signal_handler();

    let ingestor = ContactIngestor::new(store.clone(), files.clone());
    let app = folio_gateway::router(&server_config, GatewayState::new(ingestor, content));
    let result = folio_gateway::serve(listener, app, cancel).await;

    if let Err(e) = store.close().await {
        warn!(error = %e, "contact store did not close cleanly");
    }
    if let Err(e) = files.shutdown().await {
        warn!(error = %e, "file store did not shut down cleanly");
    }

    info!("folio serve shutdown complete");
    result
}

fn gateway_config(config: &FolioConfig) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        uploads_dir: PathBuf::from(&config.uploads.dir),
        url_prefix: config.uploads.url_prefix.clone(),
        max_body_bytes: config.uploads.max_bytes,
    }
}

/// Initializes the tracing subscriber. `RUST_LOG` wins over `log_level`.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "folio={log_level},folio_gateway={log_level},folio_storage={log_level},tower_http={log_level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
