// src/model.rs
//! Typed article as consumed by the reader. The relay itself forwards raw JSON.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One news item as produced by the upstream provider. Every field is optional
/// because the provider omits or nulls them freely; scalar fields of the wrong
/// type are coerced to text or dropped rather than failing the whole article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub url_to_image: Option<String>,
    #[serde(default, deserialize_with = "lenient_source")]
    pub source: Option<ArticleSource>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub published_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub author: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleSource {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
}

/// Strings pass through, numbers and booleans become their text, anything
/// else (null, arrays, objects) reads as absent.
fn lenient_text<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_source<'de, D: Deserializer<'de>>(de: D) -> Result<Option<ArticleSource>, D::Error> {
    match Value::deserialize(de)? {
        v @ Value::Object(_) => Ok(ArticleSource::deserialize(v).ok()),
        _ => Ok(None),
    }
}

impl Article {
    pub fn source_name(&self) -> Option<&str> {
        self.source.as_ref().and_then(|s| s.name.as_deref())
    }

    /// Thumbnail link, only when present and non-blank.
    pub fn image(&self) -> Option<&str> {
        self.url_to_image
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
