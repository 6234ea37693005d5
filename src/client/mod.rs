// src/client/mod.rs
//! Reader side: relay client, view state, HTML rendering and the UI router.

pub mod fetch;
pub mod render;
pub mod ui;
pub mod view;

pub use fetch::{FetchError, RelayClient};
pub use view::{NewsView, Phase, Ticket, FETCH_ERROR_MESSAGE};
