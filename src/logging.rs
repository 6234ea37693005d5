// src/logging.rs
//! Tracing setup shared by both binaries.
//! `RUST_LOG` drives the filter; `LOG_FORMAT=json` switches to JSON lines.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";
pub const DEFAULT_FILTER: &str = "news_fusion=info,news_relay=info,news_ui=info,warn";

pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let fmt_layer = fmt::layer().with_target(false);
    let builder = tracing_subscriber::registry().with(filter);

    match std::env::var(ENV_LOG_FORMAT).as_deref() {
        Ok("json") => {
            let _ = builder.with(fmt_layer.json().flatten_event(true)).try_init();
        }
        _ => {
            let _ = builder.with(fmt_layer.compact()).try_init();
        }
    }
}
