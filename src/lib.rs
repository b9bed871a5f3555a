// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod feed;
pub mod metrics;
pub mod preferences;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::feed::types::{article_id, Article, NewsProvider};
pub use crate::feed::{aggregate, merge_articles, FeedService, MAX_FEED_ARTICLES};
