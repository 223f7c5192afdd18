use axum::{
    extract::State,
    http::{header, StatusCode},
};
use jotter_lib::site;
use tracing::error;

use super::{lock_posts, AppState};

const RSS_CONTENT_TYPE: &str = "application/rss+xml; charset=utf-8";

fn get_inner(state: &AppState) -> Result<String, StatusCode> {
    let posts = &*lock_posts(&state.posts)?;

    site::feed_xml(posts.posts(), &state.config, &state.base).map_err(|err| {
        error!("Failed to render feed: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

pub async fn get(
    State(state): State<AppState>,
) -> Result<([(header::HeaderName, &'static str); 1], String), StatusCode> {
    let xml = get_inner(&state)?;

    Ok(([(header::CONTENT_TYPE, RSS_CONTENT_TYPE)], xml))
}

#[cfg(test)]
mod test {
    use crate::route::test::make_state;

    #[test]
    fn get() {
        let xml = super::get_inner(&make_state()).unwrap();

        assert!(xml.contains("<link>http://localhost:4321/blog</link>"));
        assert!(xml.contains("<link>http://localhost:4321/blog/c</link>"));
        assert!(xml.find("/blog/c<").unwrap() < xml.find("/blog/a<").unwrap());
    }
}
