pub mod rss;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::{config::BaseRef, post::Post};

/// The part of a post a syndication feed needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedItem {
    pub title: String,
    pub pub_date: DateTime<Utc>,
    pub description: String,
    pub link: String,
}

/// `{site}/{base}/{slug}`.
#[must_use]
pub fn link(post: &Post, base: &BaseRef) -> String {
    base.join(&post.slug)
}

impl FeedItem {
    #[must_use]
    pub fn from_post(post: &Post, base: &BaseRef) -> Self {
        FeedItem {
            title: post.title.clone(),
            pub_date: post.date,
            description: post.description.clone(),
            link: link(post, base),
        }
    }
}

/// One item per post, in the order given.
#[must_use]
pub fn project(posts: &[Post], base: &BaseRef) -> Vec<FeedItem> {
    let items = posts
        .iter()
        .map(|post| FeedItem::from_post(post, base))
        .collect::<Vec<_>>();

    debug!("Projected {} feed items under {}", items.len(), base.root());

    items
}
