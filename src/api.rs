use std::collections::BTreeSet;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::feed::types::Article;
use crate::feed::FeedService;
use crate::preferences::PreferenceStore;

#[derive(Clone)]
pub struct AppState {
    pub feed: Arc<FeedService>,
    pub preferences: PreferenceStore,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/news", get(news))
        .route("/api/news/search/{keyword}", get(search_news))
        .route(
            "/api/preferences",
            get(get_preferences).put(update_preferences),
        )
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn news(State(state): State<AppState>) -> Json<Vec<Article>> {
    let categories = state.preferences.get();
    let articles = state.feed.feed(&categories, None).await;
    Json(articles.as_ref().clone())
}

async fn search_news(
    State(state): State<AppState>,
    Path(keyword): Path<String>,
) -> Json<Vec<Article>> {
    let categories = state.preferences.get();
    let articles = state.feed.feed(&categories, Some(&keyword)).await;
    Json(articles.as_ref().clone())
}

async fn get_preferences(State(state): State<AppState>) -> Json<BTreeSet<String>> {
    Json(state.preferences.get())
}

async fn update_preferences(
    State(state): State<AppState>,
    Json(body): Json<BTreeSet<String>>,
) -> (StatusCode, &'static str) {
    if state.preferences.set(body) {
        (StatusCode::OK, "Preferences updated successfully")
    } else {
        (StatusCode::BAD_REQUEST, "Preferences cannot be empty")
    }
}
