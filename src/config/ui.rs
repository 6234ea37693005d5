// src/config/ui.rs
use reqwest::Url;

use super::parse_env_or;

pub const ENV_RELAY_URL: &str = "NEWS_RELAY_URL";
pub const ENV_UI_PORT: &str = "UI_PORT";

pub const DEFAULT_RELAY_URL: &str = "http://localhost:5000";
pub const DEFAULT_UI_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Base URL of the relay; `/api/<key>` is appended per request.
    pub relay_base: Url,
    pub port: u16,
}

impl UiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(get: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = get(ENV_RELAY_URL)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_RELAY_URL.to_string());
        let relay_base = Url::parse(&raw)
            .map_err(|e| anyhow::anyhow!("invalid {ENV_RELAY_URL} `{raw}`: {e}"))?;
        let port = parse_env_or(ENV_UI_PORT, get(ENV_UI_PORT), DEFAULT_UI_PORT)?;
        Ok(Self { relay_base, port })
    }
}
