// src/client/ui.rs
//! Reader HTTP surface: `/?source=<key>` selects, fetches through the relay and
//! renders. Each request owns its view; nothing is shared between browsers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::info;

use super::fetch::RelayClient;
use super::render::render_page;
use super::view::NewsView;
use crate::sources::DEFAULT_SOURCE;

#[derive(Clone)]
pub struct UiState {
    relay: RelayClient,
}

impl UiState {
    pub fn new(relay: RelayClient) -> Self {
        Self { relay }
    }
}

pub fn ui_router(state: UiState) -> Router {
    Router::new()
        .route("/", get(select_source))
        .route("/health", get(|| async { "ok" }))
        .fallback(|| async { (StatusCode::NOT_FOUND, Html("<h1>Not found</h1>")) })
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct SourceParams {
    source: Option<String>,
}

async fn select_source(
    State(state): State<UiState>,
    Query(params): Query<SourceParams>,
) -> impl IntoResponse {
    let key = params
        .source
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_SOURCE.to_string());

    let (mut view, ticket) = NewsView::new(&key);
    info!(source = %key, "source selected");

    let result = state.relay.fetch(&key).await;
    view.finish(ticket, result);
    Html(render_page(&view))
}
