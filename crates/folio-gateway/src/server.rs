// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use strum::IntoEnumIterator;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use folio_core::FolioError;

use crate::content::{PortfolioContent, Section};
use crate::handlers;
use crate::ingest::ContactIngestor;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub ingestor: Arc<ContactIngestor>,
    pub content: Arc<PortfolioContent>,
    /// Process start time for uptime calculation.
    pub started_at: Instant,
}

impl GatewayState {
    pub fn new(ingestor: ContactIngestor, content: PortfolioContent) -> Self {
        Self {
            ingestor: Arc::new(ingestor),
            content: Arc::new(content),
            started_at: Instant::now(),
        }
    }
}

/// Gateway server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind. `0` picks a free port.
    pub port: u16,
    /// Directory stored uploads are served from.
    pub uploads_dir: PathBuf,
    /// URL prefix uploads are served under.
    pub url_prefix: String,
    /// Largest accepted contact body, in bytes.
    pub max_body_bytes: usize,
}

/// Build the application router.
///
/// Routes:
/// - GET /api/{about,experience,projects,skills,achievements}
/// - POST /api/contact (body limited to `max_body_bytes`)
/// - GET /health
/// - GET <url_prefix>/<name> (stored uploads)
pub fn router(config: &ServerConfig, state: GatewayState) -> Router {
    let sections = Section::iter().fold(Router::new(), |router, section| {
        router.route(&section.path(), handlers::section_route(section))
    });

    let api = sections
        .route(
            "/api/contact",
            post(handlers::post_contact).layer(DefaultBodyLimit::max(config.max_body_bytes)),
        )
        .route("/health", get(handlers::get_health))
        .fallback(handlers::not_found)
        .with_state(state);

    api.nest_service(&config.url_prefix, ServeDir::new(&config.uploads_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind the listener for `config`.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener, FolioError> {
    let addr = format!("{}:{}", config.host, config.port);
    TcpListener::bind(&addr)
        .await
        .map_err(|e| FolioError::Gateway {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })
}

/// Serve `app` on `listener` until `cancel` fires, then drain in-flight requests.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    cancel: CancellationToken,
) -> Result<(), FolioError> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Gateway server listening on {addr}");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .map_err(|e| FolioError::Gateway {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("Gateway server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_test_utils::{MemoryContactStore, MemoryFileStore};

    fn test_config() -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            uploads_dir: PathBuf::from("uploads"),
            url_prefix: "/uploads".to_string(),
            max_body_bytes: 1024,
        }
    }

    fn test_state() -> GatewayState {
        GatewayState::new(
            ContactIngestor::new(
                Arc::new(MemoryContactStore::new()),
                Arc::new(MemoryFileStore::default()),
            ),
            PortfolioContent::embedded().unwrap(),
        )
    }

    #[test]
    fn gateway_state_is_clone() {
        let state = test_state();
        let cloned = state.clone();
        assert!(Arc::ptr_eq(&state.ingestor, &cloned.ingestor));
    }

    #[test]
    fn server_config_debug() {
        let debug = format!("{:?}", test_config());
        assert!(debug.contains("127.0.0.1"));
    }

    #[tokio::test]
    async fn bind_port_zero_picks_free_port() {
        let listener = bind(&test_config()).await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn serve_stops_when_cancelled() {
        let config = test_config();
        let listener = bind(&config).await.unwrap();
        let app = router(&config, test_state());
        let cancel = CancellationToken::new();

        let handle = tokio::spawn(serve(listener, app, cancel.clone()));
        cancel.cancel();
        handle.await.unwrap().unwrap();
    }
}
