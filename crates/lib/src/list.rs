use serde::Serialize;
use tracing::debug;

use crate::{
    post::{Post, Summary},
    tags,
};

fn paginate<'a>(
    posts: impl Iterator<Item = &'a Post>,
    offset: Option<usize>,
    limit: Option<usize>,
) -> Vec<Summary> {
    posts
        .skip(offset.unwrap_or_default())
        .take(limit.unwrap_or(usize::MAX))
        .map(Summary::from)
        .collect()
}

#[derive(Debug, Default)]
pub struct Args<'a> {
    pub tag: Option<&'a str>,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct Response {
    /// Matches before pagination.
    pub total: usize,
    pub posts: Vec<Summary>,
}

fn inner(posts: &[Post], args: &Args<'_>) -> Response {
    if let Some(tag) = args.tag {
        let matches = tags::filter(posts, tag);
        Response {
            total: matches.len(),
            posts: paginate(matches.into_iter(), args.offset, args.limit),
        }
    } else {
        Response {
            total: posts.len(),
            posts: paginate(posts.iter(), args.offset, args.limit),
        }
    }
}

/// Post summaries in collection order, optionally narrowed to one tag.
#[must_use]
pub fn query(posts: &[Post], args: Args<'_>) -> Response {
    debug!("Received list request: {args:?}");
    let response = inner(posts, &args);
    debug!(
        "Sending list response: {} of {} posts",
        response.posts.len(),
        response.total
    );
    response
}
