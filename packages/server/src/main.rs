//! System Mapper server binary.
//!
//! Starts the HTTP API plus static frontend over an embedded store:
//!
//! 1. read configuration from the environment
//! 2. open (or create) the store under `DATA_DIR`
//! 3. seed the default map on first start
//! 4. serve until ctrl-c, then flush the store
//!
//! # Environment Variables
//!
//! - `PORT`: listen port (default 3000)
//! - `DATA_DIR`: store directory (default `./data`)
//! - `STATIC_DIR`: frontend directory (default `./public`)
//! - `DEFAULT_MAP_NAME`, `MAX_MAPS`, `MAX_NODES_PER_MAP`, `CORS_ORIGINS`
//! - `RUST_LOG`: logging filter (e.g. "info", "debug")

use std::sync::Arc;

use sysmap_core::{MapService, MapStore};
use sysmap_server::{api, config::Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();

    tracing::info!("🚀 System Mapper starting...");
    tracing::info!("📡 Port: {}", config.port);
    tracing::info!("📦 Data dir: {}", config.data_dir.display());

    tokio::fs::create_dir_all(&config.data_dir).await?;

    let store = MapStore::open(config.data_dir.join("store"))?;
    let service = Arc::new(MapService::with_limits(store.clone(), config.limits()));

    if service.bootstrap(&config.default_map_name)? {
        tracing::info!("Seeded default map '{}'", config.default_map_name);
    }

    api::start_server(service, store, &config).await
}
