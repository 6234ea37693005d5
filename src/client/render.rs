// src/client/render.rs
//! HTML rendering for the reader page. All provider text is escaped; links are
//! only emitted for http(s) URLs.

use std::fmt::Write as _;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use super::view::{NewsView, Phase};
use crate::model::Article;
use crate::sources::{self, SourceSpec};

pub const EMPTY_MESSAGE: &str = "No articles found for the selected source.";
pub const EMPTY_HINT: &str = "Try selecting a different news source.";
pub const LOADING_MESSAGE: &str = "Fetching latest news...";
pub const INVALID_DATE: &str = "Invalid Date";

const STYLE: &str = "body{margin:0;font-family:system-ui,sans-serif;background:#111827;color:#f3f4f6}\
header,main{max-width:72rem;margin:0 auto;padding:1.5rem}\
.group{margin-bottom:1.25rem}.sources{display:flex;flex-wrap:wrap;gap:.75rem}\
.source{padding:.6rem 1.2rem;border-radius:.75rem;background:#374151;color:#d1d5db;text-decoration:none}\
.source.selected{background:#4f46e5;color:#fff}\
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(18rem,1fr));gap:2rem}\
.card{background:#1f2937;border:1px solid #374151;border-radius:.5rem;padding:1.5rem}\
.card img{width:100%;height:12rem;object-fit:cover;border-radius:.5rem}\
.meta{display:flex;justify-content:space-between;font-size:.75rem;color:#9ca3af}\
.tag{background:#374151;padding:.2rem .5rem;border-radius:.25rem}\
.banner{background:#7f1d1d;border:1px solid #b91c1c;color:#fca5a5;padding:1rem 1.5rem;border-radius:.75rem}\
.empty,.loading{text-align:center;padding:4rem 0;color:#9ca3af}";

/// `M/D/YYYY` in UTC, e.g. `2025-01-01T00:00:00Z` -> `1/1/2025`.
pub fn format_published(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return INVALID_DATE.to_string();
    };
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));
    match date {
        Ok(d) => format!("{}/{}/{}", d.month(), d.day(), d.year()),
        Err(_) => INVALID_DATE.to_string(),
    }
}

fn safe_href(url: Option<&str>) -> Option<&str> {
    url.map(str::trim)
        .filter(|u| u.starts_with("https://") || u.starts_with("http://"))
}

pub fn render_card(article: &Article) -> String {
    let title = article.title.as_deref().unwrap_or_default();
    let mut out = String::from("<article class=\"card\">");

    if let Some(img) = safe_href(article.image()) {
        let _ = write!(
            out,
            "<img src=\"{}\" alt=\"{}\">",
            attr(img),
            attr(title)
        );
    }
    let _ = write!(out, "<h3>{}</h3>", text(title));
    let _ = write!(
        out,
        "<p>{}</p>",
        text(article.description.as_deref().unwrap_or_default())
    );
    let _ = write!(
        out,
        "<div class=\"meta\"><span class=\"tag\">{}</span><span>{}</span></div>",
        text(article.source_name().unwrap_or_default()),
        text(&format_published(article.published_at.as_deref()))
    );
    if let Some(href) = safe_href(article.url.as_deref()) {
        let _ = write!(
            out,
            "<a class=\"read\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Read More →</a>",
            attr(href)
        );
    }
    out.push_str("</article>");
    out
}

fn render_source_link(spec: &SourceSpec, selected: &str) -> String {
    let class = if spec.key == selected {
        "source selected"
    } else {
        "source"
    };
    format!(
        "<a class=\"{class}\" href=\"/?source={}\">{}</a>",
        attr(spec.key),
        text(spec.label)
    )
}

/// Source navigation grouped by domain.
pub fn render_nav(selected: &str) -> String {
    let mut out = String::from("<nav><h2>Select News Source by Domain</h2>");
    for (domain, specs) in sources::grouped_by_domain() {
        let _ = write!(
            out,
            "<section class=\"group\"><h3>{} {}</h3><div class=\"sources\">",
            domain.icon(),
            text(domain.as_str())
        );
        for spec in specs {
            out.push_str(&render_source_link(spec, selected));
        }
        out.push_str("</div></section>");
    }
    out.push_str("</nav>");
    out
}

/// Loading indicator, error banner, card grid or empty state.
pub fn render_content(view: &NewsView) -> String {
    match view.phase() {
        Phase::Loading => format!("<div class=\"loading\"><p>{LOADING_MESSAGE}</p></div>"),
        Phase::Failed(msg) => format!("<div class=\"banner\" role=\"alert\">⚠️ {}</div>", text(msg)),
        Phase::Empty => format!(
            "<div class=\"empty\"><div>📰</div><p>{EMPTY_MESSAGE}</p><p>{EMPTY_HINT}</p></div>"
        ),
        Phase::Articles(articles) => {
            let mut out = String::from("<div class=\"grid\">");
            for a in articles {
                out.push_str(&render_card(a));
            }
            out.push_str("</div>");
            out
        }
    }
}

pub fn render_page(view: &NewsView) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
<title>News Fusion</title><style>{STYLE}</style></head><body>\
<header><h1>🌙 News Fusion</h1><p>Stay updated with news from around the world</p></header>\
<main>{}{}</main></body></html>",
        render_nav(view.selected()),
        render_content(view)
    )
}
