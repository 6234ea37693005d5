//! News reader: serves the rendered article page, fetching through the relay.

use anyhow::Context;
use news_fusion::client::{ui::ui_router, ui::UiState, RelayClient};
use news_fusion::{config::UiConfig, logging};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    logging::init_tracing();

    let config = UiConfig::from_env().context("loading reader configuration")?;
    let relay = RelayClient::new(config.relay_base.clone())?;
    let app = ui_router(UiState::new(relay));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(relay = %config.relay_base, "reader available at http://localhost:{}", config.port);

    axum::serve(listener, app).await.context("reader server")?;
    Ok(())
}
