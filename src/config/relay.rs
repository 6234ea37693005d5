// src/config/relay.rs
use std::fmt;
use std::time::Duration;

use reqwest::Url;

use super::{env_flag, parse_env_or};

pub const ENV_API_KEY: &str = "NEWS_API_KEY";
pub const ENV_PORT: &str = "PORT";
pub const ENV_BASE_URL: &str = "NEWS_API_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "NEWS_API_TIMEOUT_SECS";
pub const ENV_METRICS: &str = "RELAY_METRICS";
pub const ENV_MAX_BODY_BYTES: &str = "NEWS_API_MAX_BODY_BYTES";

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

#[derive(Clone)]
pub struct RelayConfig {
    pub api_key: String,
    pub port: u16,
    pub upstream_base: Url,
    /// Bounded wait for the single upstream call.
    pub timeout: Duration,
    /// Largest upstream body the relay will buffer.
    pub max_body_bytes: usize,
    pub metrics_enabled: bool,
}

impl RelayConfig {
    pub fn new(api_key: impl Into<String>, upstream_base: Url) -> Self {
        Self {
            api_key: api_key.into(),
            port: DEFAULT_PORT,
            upstream_base,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            metrics_enabled: false,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_body(mut self, bytes: usize) -> Self {
        self.max_body_bytes = bytes;
        self
    }

    pub fn with_metrics(mut self, on: bool) -> Self {
        self.metrics_enabled = on;
        self
    }

    /// Read from the process environment. Fails when the credential is missing.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(get: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = get(ENV_API_KEY)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "{ENV_API_KEY} environment variable is not set (add {ENV_API_KEY}=your_api_key_here to .env)"
                )
            })?;

        let base_raw = get(ENV_BASE_URL)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let upstream_base = Url::parse(&base_raw)
            .map_err(|e| anyhow::anyhow!("invalid {ENV_BASE_URL} `{base_raw}`: {e}"))?;

        let port = parse_env_or(ENV_PORT, get(ENV_PORT), DEFAULT_PORT)?;
        let secs = parse_env_or(ENV_TIMEOUT_SECS, get(ENV_TIMEOUT_SECS), DEFAULT_TIMEOUT_SECS)?;
        if secs == 0 {
            anyhow::bail!("{ENV_TIMEOUT_SECS} must be greater than zero");
        }
        let max_body_bytes = parse_env_or(
            ENV_MAX_BODY_BYTES,
            get(ENV_MAX_BODY_BYTES),
            DEFAULT_MAX_BODY_BYTES,
        )?;
        if max_body_bytes == 0 {
            anyhow::bail!("{ENV_MAX_BODY_BYTES} must be greater than zero");
        }

        Ok(Self {
            api_key,
            port,
            upstream_base,
            timeout: Duration::from_secs(secs),
            max_body_bytes,
            metrics_enabled: env_flag(get(ENV_METRICS)),
        })
    }
}

// Never print the credential.
impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("api_key", &format_args!("<{} chars>", self.api_key.len()))
            .field("port", &self.port)
            .field("upstream_base", &self.upstream_base.as_str())
            .field("timeout", &self.timeout)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("metrics_enabled", &self.metrics_enabled)
            .finish()
    }
}
