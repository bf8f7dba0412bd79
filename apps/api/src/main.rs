mod auth;
mod config;
mod errors;
mod models;
mod routes;
mod scoring;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::scoring::KeywordScorer;
use crate::state::AppState;
use crate::store::{FileStorage, MemoryStorage, MockStore, StateStorage, StoreOptions};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Recruiter API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize snapshot storage
    let storage: Arc<dyn StateStorage> = match &config.storage_dir {
        Some(dir) => {
            info!("Persisting snapshots under {}", dir.display());
            Arc::new(FileStorage::new(dir.clone()))
        }
        None => {
            info!("STORAGE_DIR not set, state is kept in memory only");
            Arc::new(MemoryStorage::new())
        }
    };

    // Initialize store with the keyword scorer
    let store = MockStore::open(
        storage,
        Arc::new(KeywordScorer),
        StoreOptions {
            analyze_delay: config.analyze_delay,
            seed_demo_data: config.seed_demo_data,
        },
    )
    .await
    .context("Failed to open the store")?;
    info!(
        "Store ready (scorer: {}, analyze delay: {:?})",
        store.scorer_backend(),
        config.analyze_delay
    );

    let state = AppState { store };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
