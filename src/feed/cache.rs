// src/feed/cache.rs
use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::feed::types::Article;

/// Canonical cache key for a query: sorted categories joined with `,`, a `|`
/// separator, then the keyword (empty when absent). Two calls with the same
/// category set and keyword always produce the same signature, whatever order
/// the set was built in.
pub fn signature(categories: &BTreeSet<String>, keyword: Option<&str>) -> String {
    let mut sig = String::new();
    for (i, c) in categories.iter().enumerate() {
        if i > 0 {
            sig.push(',');
        }
        sig.push_str(c);
    }
    sig.push('|');
    sig.push_str(keyword.unwrap_or(""));
    sig
}

/// Memoizes full aggregation results by query signature.
///
/// Backed by a moka future cache: entries expire after the configured TTL,
/// the entry count is bounded (eviction never disturbs in-flight reads, which
/// hold their own `Arc`), and `get_with` is single-flight per key, so
/// concurrent first-callers for one signature trigger exactly one fan-out.
pub struct FeedCache {
    inner: moka::future::Cache<String, Arc<Vec<Article>>>,
}

impl FeedCache {
    pub fn new(ttl: Duration, max_entries: u64) -> Self {
        let inner = moka::future::Cache::builder()
            .time_to_live(ttl)
            .max_capacity(max_entries)
            .build();
        Self { inner }
    }

    /// Return the cached result for `sig`, or run `compute` and install its
    /// result whole. The computation is expected to be infallible; provider
    /// failures are already absorbed upstream of the cache.
    pub async fn get_or_compute<F>(&self, sig: String, compute: F) -> Arc<Vec<Article>>
    where
        F: Future<Output = Vec<Article>>,
    {
        self.inner
            .get_with(sig, async move { Arc::new(compute.await) })
            .await
    }

    /// Entry count, synced first so expired entries are not counted.
    /// Intended for tests and debug output.
    pub async fn len(&self) -> u64 {
        self.inner.run_pending_tasks().await;
        self.inner.entry_count()
    }
}
