use std::time::Instant;

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use metrics::counter;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::metrics::Metrics;
use crate::sources;
use crate::upstream::NewsApiClient;

pub const SERVICE_NAME: &str = "News Fusion API Server";

#[derive(Clone)]
pub struct AppState {
    upstream: NewsApiClient,
}

impl AppState {
    /// Validates the source registry and builds the upstream client.
    pub fn new(config: &RelayConfig) -> anyhow::Result<Self> {
        sources::validate()?;
        Ok(Self {
            upstream: NewsApiClient::new(config)?,
        })
    }
}

/// Full relay app: routes plus `/metrics` when enabled in config.
pub fn create_router(config: &RelayConfig) -> anyhow::Result<Router> {
    let state = AppState::new(config)?;
    let mut app = router(state);
    if config.metrics_enabled {
        let metrics = Metrics::init()?;
        app = app.merge(metrics.router());
    }
    Ok(app)
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(banner))
        .route("/api/{source}", get(fetch_source))
        // Wrong method on a known path reads as an unknown endpoint too.
        .method_not_allowed_fallback(endpoint_not_found)
        .fallback(endpoint_not_found)
        .layer(middleware::from_fn(log_request))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn banner() -> Json<Value> {
    let endpoints = sources::keys()
        .into_iter()
        .map(|k| format!("/api/{k}"))
        .collect::<Vec<_>>();
    Json(json!({
        "message": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "availableEndpoints": endpoints,
    }))
}

async fn fetch_source(
    State(state): State<AppState>,
    Path(source): Path<String>,
) -> Result<Json<Vec<Value>>, RelayError> {
    let Some(spec) = sources::lookup(&source) else {
        warn!(source = %source, "rejected unknown news source");
        // Unknown keys share one label to keep series bounded.
        counter!("relay_requests_total", "source" => "unknown", "outcome" => "unknown_source")
            .increment(1);
        return Err(RelayError::UnknownSource {
            key: source,
            available: sources::keys(),
        });
    };

    match state.upstream.fetch_articles(spec).await {
        Ok(articles) => {
            counter!("relay_requests_total", "source" => spec.key, "outcome" => "ok").increment(1);
            Ok(Json(articles))
        }
        Err(e) => {
            counter!("relay_requests_total", "source" => spec.key, "outcome" => e.kind())
                .increment(1);
            Err(e)
        }
    }
}

async fn endpoint_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Endpoint not found" })),
    )
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();
    info!(%method, %path, "inbound request");

    let resp = next.run(req).await;

    info!(
        %method,
        %path,
        status = resp.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request completed"
    );
    resp
}
