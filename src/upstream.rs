// src/upstream.rs
//! Outbound news-API client: one GET per call, bounded by the configured timeout.
//! The credential lives only inside this client and is never logged.

use std::time::Instant;

use metrics::histogram;
use reqwest::Url;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::RelayConfig;
use crate::error::{RelayError, UNKNOWN_API_ERROR};
use crate::sources::SourceSpec;

#[derive(Clone)]
pub struct NewsApiClient {
    http: reqwest::Client,
    base: Url,
    api_key: String,
    max_body: usize,
}

impl NewsApiClient {
    pub fn new(cfg: &RelayConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("news-fusion/", env!("CARGO_PKG_VERSION")))
            .timeout(cfg.timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("building upstream http client: {e}"))?;
        Ok(Self {
            http,
            base: cfg.upstream_base.clone(),
            api_key: cfg.api_key.clone(),
            max_body: cfg.max_body_bytes,
        })
    }

    /// Fetch the `articles` array for `spec`, returned verbatim and in upstream order.
    pub async fn fetch_articles(&self, spec: &SourceSpec) -> Result<Vec<Value>, RelayError> {
        let url = spec
            .query
            .to_url(&self.base, &self.api_key)
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        info!(
            source = spec.key,
            endpoint = spec.query.endpoint.path(),
            "fetching news from upstream"
        );
        let started = Instant::now();
        let result = self.get_articles(url).await;
        histogram!("relay_upstream_ms", "source" => spec.key)
            .record(started.elapsed().as_secs_f64() * 1000.0);

        match &result {
            Ok(articles) => info!(
                source = spec.key,
                count = articles.len(),
                "fetched articles from upstream"
            ),
            Err(e) => warn!(source = spec.key, kind = e.kind(), error = %e, "upstream fetch failed"),
        }
        result
    }

    async fn get_articles(&self, url: Url) -> Result<Vec<Value>, RelayError> {
        let resp = self.http.get(url).send().await.map_err(classify)?;
        let status = resp.status();
        let bytes = read_capped(resp, self.max_body).await?;

        if !status.is_success() {
            return Err(RelayError::Upstream {
                status,
                details: upstream_message(&bytes),
            });
        }

        // Non-JSON success bodies count as "no articles".
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        extract_articles(body).ok_or(RelayError::NoArticles)
    }
}

/// Buffer the body, refusing anything larger than `cap` bytes. A declared
/// length over the cap fails before reading; otherwise chunks are counted as
/// they arrive.
async fn read_capped(mut resp: reqwest::Response, cap: usize) -> Result<Vec<u8>, RelayError> {
    let too_large = || RelayError::Transport(format!("upstream body exceeds {cap} bytes"));
    if resp.content_length().is_some_and(|len| len > cap as u64) {
        return Err(too_large());
    }
    let mut buf = Vec::new();
    while let Some(chunk) = resp.chunk().await.map_err(classify)? {
        if buf.len() + chunk.len() > cap {
            return Err(too_large());
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}

/// Pull the `articles` array out of an upstream body. Anything other than an
/// array (missing, null, object) yields `None`.
pub fn extract_articles(body: Value) -> Option<Vec<Value>> {
    match body {
        Value::Object(mut map) => match map.remove("articles") {
            Some(Value::Array(items)) => Some(items),
            _ => None,
        },
        _ => None,
    }
}

fn upstream_message(bytes: &[u8]) -> String {
    serde_json::from_slice::<Value>(bytes)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_API_ERROR.to_string())
}

fn classify(e: reqwest::Error) -> RelayError {
    if e.is_timeout() {
        RelayError::Timeout
    } else {
        // The request URL carries the credential.
        RelayError::Transport(e.without_url().to_string())
    }
}
