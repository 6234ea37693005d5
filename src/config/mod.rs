// src/config/mod.rs
//! Environment-driven configuration for the relay and the reader UI.
//! `.env` is loaded by the binaries (dotenvy) before these are read.

pub mod relay;
pub mod ui;

pub use relay::RelayConfig;
pub use ui::UiConfig;

/// Parse an optional env value, falling back to `default` when unset or blank.
pub(crate) fn parse_env_or<T: std::str::FromStr>(
    name: &str,
    raw: Option<String>,
    default: T,
) -> anyhow::Result<T>
where
    T::Err: std::fmt::Display,
{
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(s) => s
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("invalid value for {name}: `{s}` ({e})")),
    }
}

/// "1" / "true" / "yes" / "on" (case-insensitive) are truthy.
pub(crate) fn env_flag(raw: Option<String>) -> bool {
    matches!(
        raw.unwrap_or_default().trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
