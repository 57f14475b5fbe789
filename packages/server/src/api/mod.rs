//! HTTP API layer
//!
//! A thin axum REST surface over the map service. Each handler performs one
//! service call (or a small composition) and serializes the result as JSON.
//!
//! # Architecture
//!
//! The router is assembled from modular endpoint groups merged here:
//! - `map_endpoints`: map CRUD, import/export, health
//! - `node_endpoints`: node mutation within a map
//! - `connection_endpoints`: connection queries and link removal
//!
//! The full application router additionally serves the static frontend from
//! the configured directory, with `index.html` at the root and the embed
//! page at `/embed`.

use std::sync::Arc;

use axum::http::{header::HeaderValue, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use sysmap_core::{MapService, MapStore};

use crate::config::Config;

mod connection_endpoints;
mod http_error;
mod map_endpoints;
mod node_endpoints;

pub use http_error::ApiError;

/// Application state shared across all endpoints.
///
/// The service is behind one `Arc` for the process lifetime; there is no
/// per-request state and no request-level locking (see the service docs for
/// the resulting lost-update window).
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<MapService>,
}

/// Create the API router with all endpoint modules.
///
/// This covers the `/api` surface and `/health` only; static assets are
/// layered on by [`app`]. Integration tests drive this router directly.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(map_endpoints::routes(state.clone()))
        .merge(node_endpoints::routes(state.clone()))
        .merge(connection_endpoints::routes(state))
}

/// Create the full application router: API, CORS, request tracing, and the
/// static frontend.
pub fn app(state: AppState, config: &Config) -> Router {
    let embed = ServeFile::new(config.static_dir.join("embed.html"));

    create_router(state)
        .route_service("/embed", embed)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// Build the CORS layer from the configured origins.
///
/// `*` allows any origin without credentials; a comma-separated list allows
/// exactly those origins with credentials, skipping entries that are not
/// valid header values.
fn cors_layer(origins: &str) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::PUT, Method::DELETE];

    if origins.trim() == "*" {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .split(',')
        .filter_map(|o| o.trim().parse::<HeaderValue>().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(Any)
        .allow_credentials(true)
}

/// Bind and serve until ctrl-c, then flush the store.
pub async fn start_server(
    service: Arc<MapService>,
    store: MapStore,
    config: &Config,
) -> anyhow::Result<()> {
    let state = AppState { service };
    let router = app(state, config);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("🚀 Server running on http://localhost:{}", config.port);
    tracing::info!("📦 Store: {}", store.path().display());
    tracing::info!("Press Ctrl+C to stop the server");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down gracefully...");
    store.flush()?;
    tracing::info!("Store flushed, goodbye");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
}
