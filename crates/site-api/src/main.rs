//! # site-api — Binary Entry Point
//!
//! Starts the Axum HTTP server serving the site configuration.
//! Binds to configurable port (default 8080).

use anyhow::Context as _;
use site_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(?config, "configuration loaded");

    let store = site_api::store::open(config.store_dir.as_deref())?;
    let state = AppState::new(config.clone(), store).map_err(|e| {
        tracing::error!("Schema registry failed to compile: {e}");
        e
    })?;

    if let Some(path) = &config.seed_path {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read seed document {}", path.display()))?;
        let seeded = state
            .seed(&raw)
            .with_context(|| format!("failed to seed from {}", path.display()))?;
        if !seeded {
            tracing::info!(path = %path.display(), "store already holds a site config; seed skipped");
        }
    }

    let app = site_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("site-api listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
