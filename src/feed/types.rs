// src/feed/types.rs
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::hash::{Hash, Hasher};

/// Derive an article id from its title: 31-multiplier polynomial hash over the
/// title's UTF-16 code units, wrapping i32 arithmetic, absolute value,
/// stringified. Identical titles always map to the same id; the id is the
/// deduplication key across providers.
pub fn article_id(title: &str) -> String {
    let h = title
        .encode_utf16()
        .fold(0i32, |h, c| h.wrapping_mul(31).wrapping_add(c as i32));
    h.unsigned_abs().to_string()
}

/// Normalized, provider-agnostic news article.
///
/// Field names on the wire follow the upstream JSON contract (camelCase,
/// `urlToImage` for the image URL). `category` stays `None` at adapter
/// output; adapters do not record which category query produced a hit.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "urlToImage")]
    pub image_url: Option<String>,
    pub source: Option<String>,
    pub author: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub category: Option<String>,
}

// Equality of two articles is equality of their title-derived id.
impl PartialEq for Article {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for Article {}

impl Hash for Article {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[async_trait::async_trait]
pub trait NewsProvider: Send + Sync {
    /// Fetch up to one page of articles for a category, optionally narrowed by
    /// a keyword. Errors are reported to the caller; the aggregation engine is
    /// the layer that absorbs them.
    async fn fetch(&self, category: &str, keyword: Option<&str>) -> Result<Vec<Article>>;
    fn name(&self) -> &'static str;
}
