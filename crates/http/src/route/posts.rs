use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use jotter_lib::{list, post::Summary};

use super::{assign_headers, lock_posts, parse_param, AppState};

fn get_inner(
    state: &AppState,
    params: &HashMap<String, String>,
) -> Result<(HeaderMap, Vec<Summary>), StatusCode> {
    let posts = &*lock_posts(&state.posts)?;

    let response = list::query(
        posts.posts(),
        list::Args {
            tag: None,
            offset: parse_param(params, "offset")?,
            limit: parse_param(params, "limit")?,
        },
    );

    let headers = assign_headers(response.total);

    Ok((headers, response.posts))
}

pub async fn get(
    State(state): State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<(HeaderMap, Json<Vec<Summary>>), StatusCode> {
    let (headers, posts) = get_inner(&state, &params)?;

    Ok((headers, Json(posts)))
}
