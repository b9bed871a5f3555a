//! Newsfeed Aggregator — Binary Entrypoint
//! Boots the Axum HTTP server, wiring the provider adapters, feed cache,
//! preference store and metrics exporter.

use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use newsfeed_aggregator::api::{create_router, AppState};
use newsfeed_aggregator::feed::cache::FeedCache;
use newsfeed_aggregator::feed::config::FeedConfig;
use newsfeed_aggregator::feed::providers::{gnews::GNewsProvider, newsapi::NewsApiProvider};
use newsfeed_aggregator::feed::types::NewsProvider;
use newsfeed_aggregator::feed::FeedService;
use newsfeed_aggregator::metrics::Metrics;
use newsfeed_aggregator::preferences::PreferenceStore;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("newsfeed_aggregator=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when the vars come from the environment.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cfg = FeedConfig::from_env()?;
    let metrics = Metrics::init(cfg.cache_ttl.as_secs());

    let client = reqwest::Client::builder()
        .timeout(cfg.http_timeout)
        .build()?;

    let providers: Vec<Box<dyn NewsProvider>> = vec![
        Box::new(NewsApiProvider::new(
            cfg.newsapi_url.clone(),
            cfg.newsapi_key.clone(),
            client.clone(),
        )),
        Box::new(GNewsProvider::new(
            cfg.gnews_url.clone(),
            cfg.gnews_key.clone(),
            client,
        )),
    ];

    let cache = FeedCache::new(cfg.cache_ttl, cfg.cache_max_entries);
    let state = AppState {
        feed: Arc::new(FeedService::new(providers, cache)),
        preferences: PreferenceStore::new(),
    };

    let router = create_router(state).merge(metrics.router());

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "newsfeed aggregator listening");
    axum::serve(listener, router).await?;

    Ok(())
}
