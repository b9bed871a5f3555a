// src/feed/config.rs
use anyhow::{Context, Result};
use std::time::Duration;

const DEFAULT_NEWSAPI_URL: &str = "https://newsapi.org/v2/top-headlines";
const DEFAULT_GNEWS_URL: &str = "https://gnews.io/api/v4/top-headlines";
const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_CACHE_MAX_ENTRIES: u64 = 256;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Provider endpoints, keys and feed tunables, read from the environment
/// (`.env` is loaded by the binary before this runs).
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub newsapi_url: String,
    pub newsapi_key: String,
    pub gnews_url: String,
    pub gnews_key: String,
    pub cache_ttl: Duration,
    pub cache_max_entries: u64,
    pub http_timeout: Duration,
}

impl FeedConfig {
    pub fn from_env() -> Result<Self> {
        let newsapi_key =
            std::env::var("NEWSAPI_KEY").context("NEWSAPI_KEY is not set")?;
        let gnews_key = std::env::var("GNEWS_KEY").context("GNEWS_KEY is not set")?;

        Ok(Self {
            newsapi_url: env_or("NEWSAPI_URL", DEFAULT_NEWSAPI_URL),
            newsapi_key,
            gnews_url: env_or("GNEWS_URL", DEFAULT_GNEWS_URL),
            gnews_key,
            cache_ttl: Duration::from_secs(env_u64("FEED_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)),
            cache_max_entries: env_u64("FEED_CACHE_MAX_ENTRIES", DEFAULT_CACHE_MAX_ENTRIES),
            http_timeout: Duration::from_secs(env_u64(
                "FEED_HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_u64(key: &str, default: u64) -> u64 {
    match std::env::var(key) {
        Ok(raw) => match raw.trim().parse::<u64>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(key, value = %raw, default, "unparseable env value, using default");
                default
            }
        },
        Err(_) => default,
    }
}
