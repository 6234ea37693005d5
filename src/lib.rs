// src/lib.rs
// Public library surface shared by the relay binary, the reader binary and integration tests.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod sources;
pub mod upstream;

// Reader side (relay client, view state, rendering, UI router)
pub mod client;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, router, AppState};
pub use crate::config::{RelayConfig, UiConfig};
pub use crate::error::RelayError;
pub use crate::model::Article;

/// Build the relay app from the process environment (credential, base URL, timeout).
pub fn app() -> anyhow::Result<axum::Router> {
    let config = RelayConfig::from_env()?;
    create_router(&config)
}
