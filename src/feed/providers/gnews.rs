use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use metrics::{counter, histogram};
use serde::Deserialize;

use crate::feed::providers::PAGE_SIZE;
use crate::feed::types::{article_id, Article, NewsProvider};

#[derive(Debug, Deserialize)]
struct GNewsResponse {
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
struct RawArticle {
    title: Option<String>,
    description: Option<String>,
    content: Option<String>,
    url: Option<String>,
    image: Option<String>,
    source: Option<RawSource>,
    #[serde(rename = "publishedAt")]
    published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    name: Option<String>,
}

/// Adapter for the GNews top-headlines endpoint. GNews exposes no author
/// field, so `author` is always `None` here.
pub struct GNewsProvider {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl GNewsProvider {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client,
        }
    }

    fn parse_articles(body: &str) -> Result<Vec<Article>> {
        let t0 = std::time::Instant::now();
        let resp: GNewsResponse = serde_json::from_str(body).context("parsing gnews json")?;

        let mut out = Vec::with_capacity(resp.articles.len());
        for raw in resp.articles {
            let title = raw.title.unwrap_or_default();
            if title.is_empty() {
                continue;
            }
            out.push(Article {
                id: article_id(&title),
                title,
                description: raw.description,
                content: raw.content,
                url: raw.url,
                image_url: raw.image,
                source: raw.source.and_then(|s| s.name),
                author: None,
                published_at: raw.published_at,
                category: None,
            });
        }

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("feed_parse_ms").record(ms);
        counter!("feed_articles_total").increment(out.len() as u64);
        Ok(out)
    }
}

#[async_trait]
impl NewsProvider for GNewsProvider {
    async fn fetch(&self, category: &str, keyword: Option<&str>) -> Result<Vec<Article>> {
        let page_size = PAGE_SIZE.to_string();
        let mut req = self.client.get(&self.base_url).query(&[
            ("category", category),
            ("apikey", self.api_key.as_str()),
            ("max", page_size.as_str()),
        ]);
        if let Some(q) = keyword.filter(|q| !q.is_empty()) {
            req = req.query(&[("q", q)]);
        }

        let body = req
            .send()
            .await
            .context("gnews http get()")?
            .error_for_status()
            .context("gnews http status")?
            .text()
            .await
            .context("gnews http .text()")?;

        Self::parse_articles(&body)
    }

    fn name(&self) -> &'static str {
        "GNews"
    }
}
