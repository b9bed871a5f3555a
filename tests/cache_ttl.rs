// tests/cache_ttl.rs
// Cached results are never served past their validity window.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use newsfeed_aggregator::feed::cache::FeedCache;
use newsfeed_aggregator::feed::types::{article_id, Article, NewsProvider};
use newsfeed_aggregator::feed::FeedService;

struct CountingProvider {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl NewsProvider for CountingProvider {
    async fn fetch(&self, _category: &str, _keyword: Option<&str>) -> Result<Vec<Article>> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        let title = format!("round {n}");
        Ok(vec![Article {
            id: article_id(&title),
            title,
            description: None,
            content: None,
            url: None,
            image_url: None,
            source: None,
            author: None,
            published_at: None,
            category: None,
        }])
    }
    fn name(&self) -> &'static str {
        "Counting"
    }
}

#[tokio::test]
async fn expired_signature_triggers_fresh_provider_calls() {
    let calls = Arc::new(AtomicUsize::new(0));
    let providers: Vec<Box<dyn NewsProvider>> = vec![Box::new(CountingProvider {
        calls: calls.clone(),
    })];
    let svc = FeedService::new(providers, FeedCache::new(Duration::from_millis(80), 64));

    let cats: BTreeSet<String> = ["general".to_string()].into_iter().collect();

    let first = svc.feed(&cats, None).await;
    let cached = svc.feed(&cats, None).await;
    assert_eq!(first, cached);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    tokio::time::sleep(Duration::from_millis(200)).await;

    let fresh = svc.feed(&cats, None).await;
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_ne!(first, fresh);
}
