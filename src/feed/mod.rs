// src/feed/mod.rs
pub mod cache;
pub mod config;
pub mod providers;
pub mod types;

use std::collections::BTreeSet;
use std::sync::Arc;

use futures::future::join_all;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram};
use once_cell::sync::OnceCell;

use crate::feed::cache::{signature, FeedCache};
use crate::feed::types::{Article, NewsProvider};

/// Hard cap on the merged feed, applied after dedup.
pub const MAX_FEED_ARTICLES: usize = 50;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("feed_requests_total", "Feed requests served (cached or not).");
        describe_counter!(
            "feed_cache_miss_total",
            "Feed requests that triggered a provider fan-out."
        );
        describe_counter!(
            "feed_articles_total",
            "Articles parsed from provider responses."
        );
        describe_counter!(
            "feed_provider_errors_total",
            "Provider fetch/parse errors absorbed by the engine."
        );
        describe_histogram!("feed_parse_ms", "Provider response parse time in milliseconds.");
        describe_gauge!("feed_cache_ttl_secs", "Configured feed cache TTL in seconds.");
    });
}

/// Merge per-provider article batches into one feed: concatenate in the order
/// supplied, drop duplicate ids keeping the first occurrence, cap the total.
/// Pure and deterministic; no I/O.
pub fn merge_articles(batches: Vec<Vec<Article>>) -> Vec<Article> {
    let mut seen: std::collections::HashSet<String> = std::collections::HashSet::new();
    let mut out = Vec::new();
    for article in batches.into_iter().flatten() {
        if !seen.insert(article.id.clone()) {
            continue;
        }
        out.push(article);
        if out.len() == MAX_FEED_ARTICLES {
            break;
        }
    }
    out
}

async fn fetch_one(
    provider: &dyn NewsProvider,
    category: &str,
    keyword: Option<&str>,
) -> Vec<Article> {
    match provider.fetch(category, keyword).await {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(
                error = ?e,
                provider = provider.name(),
                category,
                "provider fetch failed"
            );
            counter!("feed_provider_errors_total").increment(1);
            Vec::new()
        }
    }
}

/// Fan out one fetch per (provider, category), all concurrently, then merge.
///
/// A failed or timed-out fetch contributes an empty batch for that pair only;
/// siblings keep running. Provider order is preserved through the merge, so
/// the first provider's articles win title collisions.
pub async fn aggregate(
    providers: &[Box<dyn NewsProvider>],
    categories: &BTreeSet<String>,
    keyword: Option<&str>,
) -> Vec<Article> {
    ensure_metrics_described();

    let per_provider = providers.iter().map(|p| async move {
        let calls = categories
            .iter()
            .map(|category| fetch_one(p.as_ref(), category, keyword));
        join_all(calls)
            .await
            .into_iter()
            .flatten()
            .collect::<Vec<Article>>()
    });

    let batches = join_all(per_provider).await;
    merge_articles(batches)
}

/// The aggregation engine plus its query cache. The only shared mutable state
/// in the core is the cache; results are installed whole, per signature.
pub struct FeedService {
    providers: Vec<Box<dyn NewsProvider>>,
    cache: FeedCache,
}

impl FeedService {
    pub fn new(providers: Vec<Box<dyn NewsProvider>>, cache: FeedCache) -> Self {
        ensure_metrics_described();
        Self { providers, cache }
    }

    /// Serve the feed for a category set and optional keyword. Memoized by the
    /// canonical query signature; concurrent first-callers for one signature
    /// collapse into a single fan-out. Never fails: the worst outcome is an
    /// empty list.
    pub async fn feed(
        &self,
        categories: &BTreeSet<String>,
        keyword: Option<&str>,
    ) -> Arc<Vec<Article>> {
        counter!("feed_requests_total").increment(1);
        let sig = signature(categories, keyword);
        self.cache
            .get_or_compute(sig, async {
                counter!("feed_cache_miss_total").increment(1);
                aggregate(&self.providers, categories, keyword).await
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::types::article_id;

    fn article(title: &str) -> Article {
        Article {
            id: article_id(title),
            title: title.to_string(),
            description: None,
            content: None,
            url: None,
            image_url: None,
            source: None,
            author: None,
            published_at: None,
            category: None,
        }
    }

    #[test]
    fn merge_keeps_first_occurrence_order_stable() {
        let a = article("alpha");
        let b = article("beta");
        let c = article("gamma");
        let out = merge_articles(vec![vec![a.clone(), b.clone()], vec![b.clone(), c.clone()]]);
        let titles: Vec<&str> = out.iter().map(|x| x.title.as_str()).collect();
        assert_eq!(titles, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn merge_caps_at_fifty() {
        let batch: Vec<Article> = (0..80).map(|i| article(&format!("title {i}"))).collect();
        let out = merge_articles(vec![batch]);
        assert_eq!(out.len(), MAX_FEED_ARTICLES);
    }

    #[test]
    fn merge_is_idempotent_on_merged_input() {
        let batches = vec![
            (0..30).map(|i| article(&format!("x {i}"))).collect::<Vec<_>>(),
            (10..40).map(|i| article(&format!("x {i}"))).collect::<Vec<_>>(),
        ];
        let once = merge_articles(batches);
        let twice = merge_articles(vec![once.clone()]);
        assert_eq!(once, twice);
    }
}
