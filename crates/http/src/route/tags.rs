use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use jotter_lib::{list, post::Summary};

use super::{assign_headers, lock_posts, parse_param, AppState};

pub async fn get(State(state): State<AppState>) -> Result<Json<Vec<String>>, StatusCode> {
    let posts = &*lock_posts(&state.posts)?;

    let values = jotter_lib::tags::collate(posts.posts());

    Ok(Json(values))
}

fn get_posts_inner(
    state: &AppState,
    params: &HashMap<String, String>,
    tag: &str,
) -> Result<(HeaderMap, Vec<Summary>), StatusCode> {
    let posts = &*lock_posts(&state.posts)?;

    let response = list::query(
        posts.posts(),
        list::Args {
            tag: Some(tag),
            offset: parse_param(params, "offset")?,
            limit: parse_param(params, "limit")?,
        },
    );

    let headers = assign_headers(response.total);

    Ok((headers, response.posts))
}

pub async fn get_posts(
    State(state): State<AppState>,
    params: Query<HashMap<String, String>>,
    Path(tag): Path<String>,
) -> Result<(HeaderMap, Json<Vec<Summary>>), StatusCode> {
    let (headers, posts) = get_posts_inner(&state, &params, &tag)?;

    Ok((headers, Json(posts)))
}
