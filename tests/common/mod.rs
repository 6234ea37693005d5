// tests/common/mod.rs
//
// Shared helpers: an in-process fake news API bound to 127.0.0.1:0 that records
// every request it receives, and a relay Router wired to it.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{self, Body},
    http::{header, StatusCode, Uri},
    response::Response,
    Json, Router,
};
use news_fusion::{api, config::RelayConfig};
use parking_lot::Mutex;
use reqwest::Url;
use serde_json::Value;
use tokio::net::TcpListener;

pub const TEST_KEY: &str = "test-key";
pub const BODY_LIMIT: usize = 1024 * 1024;

/// Path + query of every request the fake upstream served, in arrival order.
#[derive(Clone, Default)]
pub struct Hits(Arc<Mutex<Vec<String>>>);

impl Hits {
    pub fn count(&self) -> usize {
        self.0.lock().len()
    }

    pub fn all(&self) -> Vec<String> {
        self.0.lock().clone()
    }

    pub fn clear(&self) {
        self.0.lock().clear();
    }
}

/// Serve `router` on an ephemeral local port; returns `http://127.0.0.1:<port>`.
pub async fn serve(router: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    Url::parse(&format!("http://{addr}")).expect("url")
}

/// Fake upstream answering every path with `status` + `body` after `delay`.
/// Returns the `/v2` base to hand to the relay.
pub async fn spawn_upstream(status: StatusCode, body: Value, delay: Duration) -> (Url, Hits) {
    let hits = Hits::default();
    let recorder = hits.clone();
    let handler = move |uri: Uri| {
        let recorder = recorder.clone();
        let body = body.clone();
        async move {
            recorder.0.lock().push(uri.to_string());
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            (status, Json(body))
        }
    };
    let root = serve(Router::new().fallback(handler)).await;
    let base = root.join("v2").expect("join");
    (base, hits)
}

/// Fake upstream answering every path with a raw `body` under `content_type`,
/// for bodies that are not JSON or need an exact size.
pub async fn spawn_raw_upstream(
    status: StatusCode,
    content_type: &'static str,
    body: String,
) -> (Url, Hits) {
    let hits = Hits::default();
    let recorder = hits.clone();
    let handler = move |uri: Uri| {
        let recorder = recorder.clone();
        let body = body.clone();
        async move {
            recorder.0.lock().push(uri.to_string());
            (status, [(header::CONTENT_TYPE, content_type)], body)
        }
    };
    let root = serve(Router::new().fallback(handler)).await;
    let base = root.join("v2").expect("join");
    (base, hits)
}

/// A base URL nothing listens on.
pub async fn dead_upstream() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    Url::parse(&format!("http://{addr}/v2")).expect("url")
}

pub fn relay_config(base: Url, timeout: Duration) -> RelayConfig {
    RelayConfig::new(TEST_KEY, base).with_timeout(timeout)
}

pub fn relay_router(base: Url, timeout: Duration) -> Router {
    relay_router_with(&relay_config(base, timeout))
}

pub fn relay_router_with(cfg: &RelayConfig) -> Router {
    let state = api::AppState::new(cfg).expect("relay state");
    api::router(state)
}

pub async fn read_json(resp: Response<Body>) -> Value {
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

pub async fn read_text(resp: Response<Body>) -> String {
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf8")
}
