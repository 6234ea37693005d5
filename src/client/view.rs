// src/client/view.rs
//! Reader view state: one selection, one outstanding fetch, three derived flags.
//!
//! Every `select` hands out a [`Ticket`]; `finish` ignores results whose ticket is
//! older than the latest selection, so the last selection wins even when
//! responses arrive out of order. On failure the previous article list is kept
//! but hidden behind the error banner.

use tracing::{debug, warn};

use super::fetch::FetchError;
use crate::model::Article;
use crate::sources::DEFAULT_SOURCE;

pub const FETCH_ERROR_MESSAGE: &str =
    "Failed to fetch news. Please make sure the server is running.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// What the page should show right now.
#[derive(Debug, PartialEq)]
pub enum Phase<'a> {
    Loading,
    Failed(&'a str),
    Empty,
    Articles(&'a [Article]),
}

#[derive(Debug, Clone)]
pub struct NewsView {
    selected: String,
    loading: bool,
    error: Option<String>,
    articles: Vec<Article>,
    generation: u64,
}

impl NewsView {
    /// Fresh view with `key` selected and its fetch outstanding. There is no
    /// idle constructor: a view is loading until its first result arrives.
    pub fn new(key: &str) -> (Self, Ticket) {
        let mut view = Self {
            selected: String::new(),
            loading: true,
            error: None,
            articles: Vec::new(),
            generation: 0,
        };
        let ticket = view.select(key);
        (view, ticket)
    }

    /// Fresh view with the default source selected.
    pub fn start() -> (Self, Ticket) {
        Self::new(DEFAULT_SOURCE)
    }

    pub fn select(&mut self, key: &str) -> Ticket {
        self.generation += 1;
        self.selected = key.to_string();
        self.loading = true;
        self.error = None;
        Ticket(self.generation)
    }

    /// Apply a fetch result. Returns `false` when the ticket is stale and the
    /// result was dropped.
    pub fn finish(&mut self, ticket: Ticket, result: Result<Vec<Article>, FetchError>) -> bool {
        if ticket.0 != self.generation {
            debug!(
                ticket = ticket.0,
                current = self.generation,
                "dropping stale fetch result"
            );
            return false;
        }
        match result {
            Ok(articles) => {
                self.articles = articles;
                self.error = None;
            }
            Err(e) => {
                warn!(source = %self.selected, error = %e, "error fetching news");
                self.error = Some(FETCH_ERROR_MESSAGE.to_string());
            }
        }
        self.loading = false;
        true
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn phase(&self) -> Phase<'_> {
        if self.loading {
            Phase::Loading
        } else if let Some(msg) = self.error.as_deref() {
            Phase::Failed(msg)
        } else if self.articles.is_empty() {
            Phase::Empty
        } else {
            Phase::Articles(&self.articles)
        }
    }
}
