use tracing::debug;

use crate::post::Post;

/// Every distinct tag across `posts`, sorted. Posts without tags contribute
/// nothing.
#[must_use]
pub fn collate(posts: &[Post]) -> Vec<String> {
    let mut values = posts
        .iter()
        .flat_map(Post::tags)
        .cloned()
        .collect::<Vec<_>>();

    values.sort();
    values.dedup();

    debug!("Collated {} tags from {} posts", values.len(), posts.len());

    values
}

/// Posts carrying exactly `tag`, in their original order.
#[must_use]
pub fn filter<'a>(posts: &'a [Post], tag: &str) -> Vec<&'a Post> {
    let matches = posts
        .iter()
        .filter(|post| post.has_tag(tag))
        .collect::<Vec<_>>();

    debug!("Tag {tag:?} matched {} posts", matches.len());

    matches
}
