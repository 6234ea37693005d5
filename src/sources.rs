// src/sources.rs
//! Static source registry: maps a short source key to its fixed upstream query,
//! plus the display metadata the reader uses for navigation.

use std::collections::HashSet;
use std::fmt;

use reqwest::Url;

/// Navigational group a source is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Technology,
    Business,
    Regional,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Technology => "Technology",
            Domain::Business => "Business",
            Domain::Regional => "Regional",
        }
    }

    /// Small glyph shown next to the group heading.
    pub fn icon(&self) -> &'static str {
        match self {
            Domain::Technology => "💻",
            Domain::Business => "💼",
            Domain::Regional => "🌍",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upstream endpoint family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    TopHeadlines,
    Everything,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::TopHeadlines => "top-headlines",
            Endpoint::Everything => "everything",
        }
    }
}

/// Fixed upstream query: endpoint + filter parameters. The credential is
/// appended when the URL is built, never stored here.
#[derive(Debug, Clone, Copy)]
pub struct UpstreamQuery {
    pub endpoint: Endpoint,
    pub params: &'static [(&'static str, &'static str)],
}

impl UpstreamQuery {
    /// Build the full upstream URL under `base` (e.g. `https://newsapi.org/v2`),
    /// with `apiKey` as the last query parameter.
    pub fn to_url(&self, base: &Url, api_key: &str) -> anyhow::Result<Url> {
        let raw = format!(
            "{}/{}",
            base.as_str().trim_end_matches('/'),
            self.endpoint.path()
        );
        let mut url = Url::parse(&raw)
            .map_err(|e| anyhow::anyhow!("invalid upstream url {raw}: {e}"))?;
        {
            let mut qp = url.query_pairs_mut();
            for (k, v) in self.params {
                qp.append_pair(k, v);
            }
            qp.append_pair("apiKey", api_key);
        }
        Ok(url)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SourceSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub domain: Domain,
    pub query: UpstreamQuery,
}

pub const DEFAULT_SOURCE: &str = "techcrunch";

/// Registry order is also display order.
pub static REGISTRY: &[SourceSpec] = &[
    SourceSpec {
        key: "techcrunch",
        label: "TechCrunch",
        domain: Domain::Technology,
        query: UpstreamQuery {
            endpoint: Endpoint::TopHeadlines,
            params: &[("sources", "techcrunch")],
        },
    },
    SourceSpec {
        key: "apple",
        label: "Apple News",
        domain: Domain::Technology,
        query: UpstreamQuery {
            endpoint: Endpoint::Everything,
            params: &[
                ("q", "apple"),
                ("from", "2025-08-22"),
                ("to", "2025-08-22"),
                ("sortBy", "popularity"),
            ],
        },
    },
    SourceSpec {
        key: "wsj",
        label: "Wall Street Journal",
        domain: Domain::Business,
        query: UpstreamQuery {
            endpoint: Endpoint::Everything,
            params: &[("domains", "wsj.com")],
        },
    },
    SourceSpec {
        key: "business",
        label: "US Business News",
        domain: Domain::Business,
        query: UpstreamQuery {
            endpoint: Endpoint::TopHeadlines,
            params: &[("country", "us"), ("category", "business")],
        },
    },
    SourceSpec {
        key: "india",
        label: "India Headlines",
        domain: Domain::Regional,
        query: UpstreamQuery {
            endpoint: Endpoint::TopHeadlines,
            params: &[("country", "in")],
        },
    },
];

pub fn lookup(key: &str) -> Option<&'static SourceSpec> {
    REGISTRY.iter().find(|s| s.key == key)
}

pub fn keys() -> Vec<&'static str> {
    REGISTRY.iter().map(|s| s.key).collect()
}

/// Group sources by domain, keeping first-seen domain order and registry order
/// within each group.
pub fn grouped_by_domain() -> Vec<(Domain, Vec<&'static SourceSpec>)> {
    let mut groups: Vec<(Domain, Vec<&'static SourceSpec>)> = Vec::new();
    for spec in REGISTRY {
        match groups.iter_mut().find(|(d, _)| *d == spec.domain) {
            Some((_, list)) => list.push(spec),
            None => groups.push((spec.domain, vec![spec])),
        }
    }
    groups
}

/// Startup check: keys unique and non-empty, every query carries at least one filter.
pub fn validate() -> anyhow::Result<()> {
    validate_specs(REGISTRY)
}

fn validate_specs(specs: &[SourceSpec]) -> anyhow::Result<()> {
    if specs.is_empty() {
        anyhow::bail!("source registry is empty");
    }
    let mut seen = HashSet::new();
    for s in specs {
        if s.key.trim().is_empty() {
            anyhow::bail!("source registry contains an empty key");
        }
        if !seen.insert(s.key) {
            anyhow::bail!("duplicate source key `{}`", s.key);
        }
        if s.query.params.is_empty() {
            anyhow::bail!("source `{}` has no upstream filter parameters", s.key);
        }
    }
    Ok(())
}
