pub mod feed;
pub mod posts;
pub mod tags;

use std::{collections::HashMap, sync::Arc, sync::MutexGuard};

use axum::{
    http::{HeaderMap, StatusCode},
    routing, Router,
};
use jotter_lib::{
    config::{BaseRef, SiteConfig},
    post::{collection, Collection},
};
use tracing::error;

#[derive(Clone)]
pub struct AppState {
    pub posts: collection::ArcMutex,
    pub config: Arc<SiteConfig>,
    pub base: Arc<BaseRef>,
}

/// Everything is served under the blog's base path.
pub fn router(state: AppState) -> Router {
    let base_path = state.base.base_path();

    let routes = Router::new()
        .route("/feed.xml", routing::get(feed::get))
        .route("/tags", routing::get(tags::get))
        .route("/tags/:tag", routing::get(tags::get_posts))
        .route("/posts", routing::get(posts::get))
        .with_state(state);

    if base_path.is_empty() {
        routes
    } else {
        Router::new().nest(&base_path, routes)
    }
}

fn lock_posts(posts: &collection::ArcMutex) -> Result<MutexGuard<'_, Collection>, StatusCode> {
    posts.lock().map_err(|err| {
        error!("Failed to lock posts: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

fn parse_param(params: &HashMap<String, String>, key: &str) -> Result<Option<usize>, StatusCode> {
    params
        .get(key)
        .map(|x| x.parse())
        .transpose()
        .map_err(|_| StatusCode::BAD_REQUEST)
}

fn assign_headers(total: usize) -> HeaderMap {
    let mut headers = HeaderMap::new();

    headers.insert("x-length", total.into());

    headers
}
