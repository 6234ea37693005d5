//! News relay: boots the Axum HTTP server that proxies the news API by source key.

use anyhow::Context;
use news_fusion::{config::RelayConfig, create_router, logging, sources};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when the file is absent.
    let _ = dotenvy::dotenv();
    logging::init_tracing();

    // Fails fast when NEWS_API_KEY is missing.
    let config = RelayConfig::from_env().context("loading relay configuration")?;
    info!(?config, "relay configuration loaded");

    let app = create_router(&config)?;

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    info!("Server running on port {}", config.port);
    info!("Server accessible at: http://localhost:{}", config.port);
    info!("Available news sources: {}", sources::keys().join(", "));

    axum::serve(listener, app).await.context("relay server")?;
    Ok(())
}
