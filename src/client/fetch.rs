// src/client/fetch.rs
use std::time::Duration;

use reqwest::{StatusCode, Url};
use thiserror::Error;
use serde_json::Value;
use tracing::{debug, warn};

use crate::model::Article;

/// Generous bound for the reader; the relay applies its own upstream timeout.
pub const RELAY_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("relay responded with {0}")]
    Status(StatusCode),
    #[error("relay request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("relay base url cannot carry a path: {0}")]
    BaseUrl(String),
}

#[derive(Clone)]
pub struct RelayClient {
    http: reqwest::Client,
    base: Url,
}

impl RelayClient {
    pub fn new(base: Url) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("news-fusion-ui/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(RELAY_TIMEOUT_SECS))
            .build()
            .map_err(|e| anyhow::anyhow!("building relay http client: {e}"))?;
        Ok(Self { http, base })
    }

    /// `<base>/api/<key>`, with the key escaped as a single path segment.
    pub fn source_url(&self, key: &str) -> Result<Url, FetchError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::BaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .push("api")
            .push(key);
        Ok(url)
    }

    /// One GET against the relay. Any non-2xx status is an error; a body that
    /// is not a JSON array is a transport error. Individual items that are not
    /// article objects are skipped.
    pub async fn fetch(&self, key: &str) -> Result<Vec<Article>, FetchError> {
        let url = self.source_url(key)?;
        debug!(%url, "requesting articles from relay");
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let items = resp.json::<Vec<Value>>().await?;
        Ok(articles_from(key, items))
    }
}

fn articles_from(key: &str, items: Vec<Value>) -> Vec<Article> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value::<Article>(item) {
            Ok(a) => Some(a),
            Err(e) => {
                warn!(source = key, index = i, error = %e, "skipping malformed article");
                None
            }
        })
        .collect()
}
